//! Loading project files into namespaces through the injected collaborators.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LaicError, Result};
use crate::key::Key;
use crate::namespace::Namespace;

impl Namespace {
  /// Loads a project-relative file and registers it under its base name.
  ///
  /// `"foo/bar"` loads the module at `<project root>/foo/bar` into the
  /// namespace `foo` below this one, creating it if needed, and registers it
  /// there as `bar`. A file without a directory is registered in this
  /// namespace. The extension, if any, is dropped from the registration name.
  ///
  /// Loader failures are logged and otherwise ignored, leaving the name
  /// unregistered. Returns the namespace the file was loaded into.
  pub fn load_file(&self, file: &str) -> Result<Namespace> {
    let (dir, base) = match file.rfind('/') {
      Some(i) => (&file[..i], &file[i + 1..]),
      None => ("", file),
    };
    let name = Path::new(base)
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .filter(|stem| !stem.is_empty())
      .ok_or_else(|| LaicError::InvalidArgument(format!("no file name in {:?}", file)))?;

    let segments: Vec<String> = dir
      .split('/')
      .filter(|segment| !segment.is_empty() && *segment != ".")
      .map(str::to_owned)
      .collect();

    let _guard = self.lock_tree();
    let target = self.materialize(&segments)?;

    let location = segments
      .iter()
      .fold(self.tree().config.project_root.clone(), |path, segment| path.join(segment));
    let module_path = location.join(&name);

    match self.tree().loader.load_module(&module_path) {
      Ok(candidate) => {
        if let Err(e) = target.register(Key::from(&name), candidate) {
          debug!(file, error = %e, "failed to register loaded module");
        }
      }
      Err(e) => debug!(file, error = %e, "failed to load module"),
    }

    target.set_source_path(location);
    Ok(target)
  }

  /// Loads every recognized file of a project directory with `load_file`.
  ///
  /// Only directory paths such as `"foo/bar"` are accepted. Anything else, and
  /// any listing failure, leaves the tree untouched. Returns `self`.
  pub fn load_dir(&self, dir: &str) -> Namespace {
    if !Key::from(dir).is_valid_path() {
      debug!(dir, "not a directory path, nothing to load");
      return self.clone();
    }

    let config = &self.tree().config;
    let location: PathBuf = config.project_root.join(dir);
    let files = match self.tree().lister.list_files(&location) {
      Ok(files) => files,
      Err(e) => {
        debug!(dir, error = %e, "failed to list directory");
        return self.clone();
      }
    };

    let dir = dir.trim_end_matches('/');
    for file in files.iter().filter(|file| config.accepts_file(file)) {
      if let Err(e) = self.load_file(&format!("{}/{}", dir, file)) {
        debug!(dir, file = %file, error = %e, "failed to load file");
      }
    }
    self.clone()
  }
}
