//! The process-wide container handle.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::LaicConfig;
use crate::error::Result;
use crate::key::Key;
use crate::loader::{DirectoryLister, FsDirectoryLister, ModuleLoader, ModuleMap};
use crate::namespace::{Namespace, Tree};

// The one live container of the process, if one has been constructed.
static INSTANCE: Lazy<RwLock<Option<Laic>>> = Lazy::new(|| RwLock::new(None));

/// The process-wide dependency container.
///
/// There is at most one live `Laic` per process. Constructing another one
/// returns the existing instance. `Laic` dereferences to its root
/// [`Namespace`], so every namespace operation is available on the handle.
///
/// # Examples
///
/// ```
/// use laic::{Candidate, Laic};
///
/// let laic = Laic::instance();
/// laic.register("greeting", Candidate::literal(String::from("hello"))).unwrap();
///
/// let greeting = Laic::instance().get_as::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "hello");
/// # Laic::reset();
/// ```
#[derive(Clone)]
pub struct Laic {
  root: Namespace,
  global: Namespace,
}

impl Laic {
  fn create(
    config: LaicConfig,
    loader: Arc<dyn ModuleLoader>,
    lister: Arc<dyn DirectoryLister>,
  ) -> Self {
    let tree = Arc::new(Tree::new(config, loader, lister));
    let root = Namespace::new_root(tree);
    let global = root.add_global_namespace();
    debug!(project_root = ?root.tree().config.project_root, "created container");
    Self { root, global }
  }

  pub fn builder() -> LaicBuilder {
    LaicBuilder::default()
  }

  /// Returns the live container, constructing a default one if none exists.
  pub fn instance() -> Laic {
    if let Some(existing) = INSTANCE.read().as_ref() {
      return existing.clone();
    }
    INSTANCE
      .write()
      .get_or_insert_with(|| {
        Laic::create(
          LaicConfig::default(),
          Arc::new(ModuleMap::new()),
          Arc::new(FsDirectoryLister),
        )
      })
      .clone()
  }

  /// Returns the live container after adding the namespace `key` to it,
  /// constructing a default container first if none exists.
  pub fn with_namespace(key: impl Into<Key>) -> Result<Laic> {
    Self::builder().namespace(key).build()
  }

  /// Forgets the live container. The next construction starts a fresh tree.
  ///
  /// Handles and namespaces obtained earlier stay usable but are no longer
  /// reachable through `instance()`. Namespaces only hold a weak reference to
  /// their root, so once every `Laic` handle of the old tree is dropped, the
  /// dependencies of later registrations on a kept namespace resolve as absent.
  pub fn reset() -> Option<Laic> {
    let previous = INSTANCE.write().take();
    if previous.is_some() {
      debug!("container reset");
    }
    previous
  }

  /// The `global` namespace holding name-only registrations made on the root.
  pub fn global(&self) -> &Namespace {
    &self.global
  }

  pub fn namespace(&self) -> &Namespace {
    &self.root
  }

  pub fn config(&self) -> &LaicConfig {
    &self.root.tree().config
  }

  /// True when both handles refer to the same container.
  pub fn ptr_eq(&self, other: &Laic) -> bool {
    self.root == other.root
  }
}

impl Deref for Laic {
  type Target = Namespace;

  fn deref(&self) -> &Namespace {
    &self.root
  }
}

impl fmt::Debug for Laic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Laic")
      .field("root", &self.root)
      .finish_non_exhaustive()
  }
}

/// Configures the container constructed by the first `build()` of the process.
///
/// Once a container is live, `build()` returns it and only the namespace
/// setting still has an effect.
#[derive(Default)]
pub struct LaicBuilder {
  config: Option<LaicConfig>,
  loader: Option<Arc<dyn ModuleLoader>>,
  lister: Option<Arc<dyn DirectoryLister>>,
  namespace: Option<Key>,
}

impl LaicBuilder {
  pub fn config(mut self, config: LaicConfig) -> Self {
    self.config = Some(config);
    self
  }

  pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
    self.loader = Some(Arc::new(loader));
    self
  }

  pub fn lister(mut self, lister: impl DirectoryLister + 'static) -> Self {
    self.lister = Some(Arc::new(lister));
    self
  }

  /// A namespace, or namespace path, to add to the container.
  pub fn namespace(mut self, key: impl Into<Key>) -> Self {
    self.namespace = Some(key.into());
    self
  }

  /// Returns the live container, constructing it from this builder when there
  /// is none yet.
  pub fn build(self) -> Result<Laic> {
    let mut slot = INSTANCE.write();
    if let Some(existing) = slot.as_ref() {
      let existing = existing.clone();
      drop(slot);
      if self.config.is_some() || self.loader.is_some() || self.lister.is_some() {
        warn!("a container is already live, ignoring the supplied config and collaborators");
      }
      if let Some(key) = self.namespace {
        existing.add_namespace(key)?;
      }
      return Ok(existing);
    }

    let laic = Laic::create(
      self.config.unwrap_or_default(),
      self.loader.unwrap_or_else(|| Arc::new(ModuleMap::new())),
      self.lister.unwrap_or_else(|| Arc::new(FsDirectoryLister)),
    );
    if let Some(key) = self.namespace {
      laic.add_namespace(key)?;
    }
    *slot = Some(laic.clone());
    Ok(laic)
  }
}

impl fmt::Debug for LaicBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LaicBuilder")
      .field("config", &self.config)
      .field("has_loader", &self.loader.is_some())
      .field("has_lister", &self.lister.is_some())
      .field("namespace", &self.namespace)
      .finish()
  }
}
