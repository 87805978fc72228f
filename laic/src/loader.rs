//! The collaborators that turn file paths into candidates and list directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::candidate::Candidate;
use crate::error::LoadError;

/// Turns a module path into a registration candidate.
///
/// Paths handed to the loader are absolute locations under the project root
/// with the file extension stripped. Resolving the extension is up to the
/// loader.
pub trait ModuleLoader: Send + Sync {
  fn load_module(&self, path: &Path) -> Result<Candidate, LoadError>;
}

/// Lists the file names in a directory, in a stable order.
pub trait DirectoryLister: Send + Sync {
  fn list_files(&self, dir: &Path) -> Result<Vec<String>, LoadError>;
}

type ModuleFactory = Arc<dyn Fn() -> Candidate + Send + Sync>;

/// An in-memory `ModuleLoader` keyed by module path.
///
/// Each load calls the stored factory again, so every load of the same path
/// produces a fresh candidate.
#[derive(Default)]
pub struct ModuleMap {
  base: PathBuf,
  modules: DashMap<PathBuf, ModuleFactory>,
}

impl ModuleMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// A map whose relative module paths are joined onto `base`.
  pub fn rooted_at(base: impl Into<PathBuf>) -> Self {
    Self {
      base: base.into(),
      modules: DashMap::new(),
    }
  }

  /// Adds a module, returning the map for chaining.
  pub fn module(
    self,
    path: impl AsRef<Path>,
    factory: impl Fn() -> Candidate + Send + Sync + 'static,
  ) -> Self {
    self.insert(path, factory);
    self
  }

  pub fn insert(
    &self,
    path: impl AsRef<Path>,
    factory: impl Fn() -> Candidate + Send + Sync + 'static,
  ) {
    self
      .modules
      .insert(self.base.join(path.as_ref()), Arc::new(factory));
  }

  pub fn contains(&self, path: impl AsRef<Path>) -> bool {
    self.modules.contains_key(&self.base.join(path.as_ref()))
  }
}

impl ModuleLoader for ModuleMap {
  fn load_module(&self, path: &Path) -> Result<Candidate, LoadError> {
    let factory = self
      .modules
      .get(path)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))?;
    Ok(factory())
  }
}

/// Lists directories on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
  fn list_files(&self, dir: &Path) -> Result<Vec<String>, LoadError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
      let entry = entry?;
      if entry.file_type()?.is_file() {
        names.push(entry.file_name().to_string_lossy().into_owned());
      }
    }
    names.sort();
    Ok(names)
  }
}
