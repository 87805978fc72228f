//! The namespace tree and name/path resolution.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::ReentrantMutex;
use tracing::{debug, trace};

use crate::candidate::{Candidate, Value};
use crate::config::LaicConfig;
use crate::error::{LaicError, Result};
use crate::key::{split_path, Key};
use crate::loader::{DirectoryLister, ModuleLoader};
use crate::resolver;

/// The key of the root's `global` child, where name-only registrations on the
/// root are stored.
pub const GLOBAL_NAMESPACE: &str = "global";

/// State shared by every namespace of one tree.
pub(crate) struct Tree {
  // Serializes all mutation. Re-entrant so that instantiation can load and
  // register dependencies on the same thread.
  lock: ReentrantMutex<()>,
  pub(crate) config: LaicConfig,
  pub(crate) loader: Arc<dyn ModuleLoader>,
  pub(crate) lister: Arc<dyn DirectoryLister>,
}

impl Tree {
  pub(crate) fn new(
    config: LaicConfig,
    loader: Arc<dyn ModuleLoader>,
    lister: Arc<dyn DirectoryLister>,
  ) -> Self {
    Self {
      lock: ReentrantMutex::new(()),
      config,
      loader,
      lister,
    }
  }
}

#[derive(Clone)]
enum Entry {
  Namespace(Namespace),
  // `None` is a declared slot that has not been filled yet.
  Value(Option<Value>),
}

struct Inner {
  is_global: bool,
  // Back-reference, not ownership. Children are owned through `children`.
  root: Weak<Inner>,
  tree: Arc<Tree>,
  source_path: OnceCell<PathBuf>,
  children: DashMap<Key, Entry>,
}

/// A node of the container tree, holding child namespaces and registered
/// values.
///
/// `Namespace` is a cheap handle. Clones refer to the same node, and equality
/// is node identity.
#[derive(Clone)]
pub struct Namespace {
  inner: Arc<Inner>,
}

impl Namespace {
  /// Creates the root of a new tree. The root is global and is its own root.
  pub(crate) fn new_root(tree: Arc<Tree>) -> Self {
    let inner = Arc::new_cyclic(|weak| Inner {
      is_global: true,
      root: weak.clone(),
      tree,
      source_path: OnceCell::new(),
      children: DashMap::new(),
    });
    Self { inner }
  }

  fn new_child(&self, root: &Namespace, is_global: bool) -> Self {
    Self {
      inner: Arc::new(Inner {
        is_global,
        root: Arc::downgrade(&root.inner),
        tree: self.inner.tree.clone(),
        source_path: OnceCell::new(),
        children: DashMap::new(),
      }),
    }
  }

  /// Creates the `global` child of a root namespace.
  pub(crate) fn add_global_namespace(&self) -> Namespace {
    let _guard = self.inner.tree.lock.lock();
    if let Some(existing) = self.child(GLOBAL_NAMESPACE) {
      return existing;
    }
    let global = self.new_child(self, true);
    self
      .inner
      .children
      .insert(Key::from(GLOBAL_NAMESPACE), Entry::Namespace(global.clone()));
    global
  }

  pub(crate) fn tree(&self) -> &Tree {
    &self.inner.tree
  }

  pub(crate) fn lock_tree(&self) -> parking_lot::ReentrantMutexGuard<'_, ()> {
    self.inner.tree.lock.lock()
  }

  pub fn is_global(&self) -> bool {
    self.inner.is_global
  }

  /// The namespace dependency names are resolved against. `None` once that
  /// namespace has been dropped.
  pub fn root(&self) -> Option<Namespace> {
    self.inner.root.upgrade().map(|inner| Namespace { inner })
  }

  /// The filesystem directory this namespace was first loaded from.
  pub fn source_path(&self) -> Option<&Path> {
    self.inner.source_path.get().map(PathBuf::as_path)
  }

  pub(crate) fn set_source_path(&self, path: PathBuf) {
    let _ = self.inner.source_path.set(path);
  }

  /// The direct child keys, namespaces and values alike.
  pub fn keys(&self) -> Vec<Key> {
    self
      .inner
      .children
      .iter()
      .map(|entry| entry.key().clone())
      .collect()
  }

  /// The direct child namespace under `key`, if there is one.
  pub fn child(&self, key: impl Into<Key>) -> Option<Namespace> {
    match self.entry(&key.into())? {
      Entry::Namespace(namespace) => Some(namespace),
      Entry::Value(_) => None,
    }
  }

  fn entry(&self, key: &Key) -> Option<Entry> {
    self
      .inner
      .children
      .get(key)
      .map(|entry| entry.value().clone())
  }

  fn value_slot(&self, key: &Key) -> Option<Value> {
    match self.entry(key)? {
      Entry::Value(slot) => slot,
      Entry::Namespace(_) => None,
    }
  }

  // Name-only keys on a global namespace go to its `global` child when it has one.
  fn routed(&self, key: &Key) -> Namespace {
    if self.inner.is_global && key.is_name() {
      if let Some(global) = self.child(GLOBAL_NAMESPACE) {
        return global;
      }
    }
    self.clone()
  }

  // Follows child namespaces only. Any missing segment, or one that holds a
  // value, ends the descent.
  fn descend_strict<S: AsRef<str>>(&self, segments: &[S]) -> Option<Namespace> {
    let mut current = self.clone();
    for segment in segments {
      current = current.child(segment.as_ref())?;
    }
    Some(current)
  }

  // Creates every missing namespace along `segments`, rooted at `self`, and
  // returns the innermost one.
  pub(crate) fn materialize(&self, segments: &[String]) -> Result<Namespace> {
    let mut current = self.clone();
    for segment in segments {
      current = current.add_namespace_rooted(Key::from(segment), Some(self))?;
    }
    Ok(current)
  }

  /// Adds a child namespace, or returns the existing one under `key`.
  ///
  /// A string key containing `/` is handed to `add_namespace_path`.
  pub fn add_namespace(&self, key: impl Into<Key>) -> Result<Namespace> {
    self.add_namespace_rooted(key.into(), None)
  }

  fn add_namespace_rooted(&self, key: Key, root: Option<&Namespace>) -> Result<Namespace> {
    if key.is_empty() {
      return Err(LaicError::InvalidArgument(
        "must provide a name for the namespace".to_string(),
      ));
    }
    if matches!(&key, Key::Name(name) if name.contains('/')) {
      return self.add_namespace_path(key);
    }

    let _guard = self.lock_tree();
    match self.entry(&key) {
      Some(Entry::Namespace(existing)) => return Ok(existing),
      Some(Entry::Value(_)) => {
        return Err(LaicError::InvalidArgument(format!(
          "key {} already holds a registered value",
          key
        )))
      }
      None => {}
    }

    let namespace = self.new_child(root.unwrap_or(self), false);
    debug!(key = %key, "added namespace");
    self
      .inner
      .children
      .insert(key, Entry::Namespace(namespace.clone()));
    Ok(namespace)
  }

  /// Adds a chain of nested namespaces described by `path`, for example
  /// `"foo/bar"`, and returns the outermost one.
  ///
  /// Every namespace along the path is rooted at `self`.
  pub fn add_namespace_path(&self, path: impl Into<Key>) -> Result<Namespace> {
    let key = path.into();
    let segments = match &key {
      Key::Name(path) if key.is_valid_path() => split_path(path),
      _ => {
        return Err(LaicError::InvalidArgument(format!(
          "must supply path in form path/to/namespace, got {:?}",
          key
        )))
      }
    };

    if segments.iter().any(String::is_empty) {
      return Err(LaicError::InvalidArgument(format!(
        "namespace path {:?} has an empty segment",
        key
      )));
    }

    let _guard = self.lock_tree();
    self.materialize(&segments)?;
    self.child(segments[0].as_str()).ok_or_else(|| {
      LaicError::InvalidArgument(format!("namespace path {:?} could not be created", key))
    })
  }

  /// Looks up a registered value by name or by path.
  ///
  /// Names are resolved in this namespace, except on the root, where they
  /// resolve in the `global` namespace. Paths descend through existing child
  /// namespaces only. Returns `None` when nothing is registered there.
  pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
    let key = key.into();
    let value = if key.is_name() {
      self.routed(&key).value_slot(&key)
    } else if let (true, Key::Name(path)) = (key.is_valid_path(), &key) {
      let mut segments = split_path(path);
      let name = Key::from(segments.pop()?);
      self.descend_strict(&segments)?.value_slot(&name)
    } else {
      None
    };
    trace!(key = %key, found = value.is_some(), "lookup");
    value
  }

  /// Looks up a registered value and downcasts it to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, key: impl Into<Key>) -> Option<Arc<T>> {
    self.get(key)?.downcast::<T>().ok()
  }

  /// Returns the namespace identified by `key`.
  ///
  /// For a name, this is the own child namespace under that key, or `self`
  /// when there is none. For a path, the descent is permissive: the deepest
  /// namespace reached before the first missing segment is returned, or `None`
  /// when even the first segment is missing.
  pub fn get_namespace(&self, key: impl Into<Key>) -> Option<Namespace> {
    let key = key.into();
    if key.is_name() {
      return Some(self.child(&key).unwrap_or_else(|| self.clone()));
    }
    let path = match (&key, key.is_valid_path()) {
      (Key::Name(path), true) => path,
      _ => return Some(self.clone()),
    };

    let mut resolved: Option<Namespace> = None;
    for segment in split_path(path) {
      let next = resolved.as_ref().unwrap_or(self).child(segment.as_str());
      match next {
        Some(namespace) => resolved = Some(namespace),
        None => break,
      }
    }
    resolved
  }

  /// True when every segment of `path` names a child namespace.
  pub fn has_namespace_path(&self, path: &str) -> bool {
    let key = Key::from(path);
    key.is_valid_path() && self.descend_strict(&split_path(path)).is_some()
  }

  /// Registers `candidate` under a name or path and returns the namespace the
  /// value was stored in.
  ///
  /// Path keys create any missing namespaces along the way. A singleton
  /// candidate registered over an occupied slot leaves the existing value in
  /// place.
  pub fn register(&self, key: impl Into<Key>, candidate: Candidate) -> Result<Namespace> {
    let key = key.into();
    if key.is_empty() {
      return Err(LaicError::InvalidArgument(
        "cannot register under an empty name".to_string(),
      ));
    }
    let _guard = self.lock_tree();

    let (parent, name) = if key.is_name() {
      (self.routed(&key), key)
    } else if let (true, Key::Name(path)) = (key.is_valid_path(), &key) {
      let mut segments = split_path(path);
      let name = segments.pop().unwrap_or_default();
      // Nothing is created unless every segment and the final name are usable.
      if name.is_empty() || segments.iter().any(String::is_empty) {
        return Err(LaicError::InvalidArgument(format!(
          "cannot register under {:?}: empty path segment",
          key
        )));
      }
      (self.materialize(&segments)?, Key::from(name))
    } else {
      return Err(LaicError::InvalidArgument(format!(
        "cannot register under {:?}",
        key
      )));
    };

    parent.store(name, candidate)?;
    Ok(parent)
  }

  fn store(&self, name: Key, candidate: Candidate) -> Result<()> {
    let occupied = match self.entry(&name) {
      Some(Entry::Namespace(_)) => {
        return Err(LaicError::InvalidArgument(format!(
          "key {} already holds a namespace",
          name
        )))
      }
      Some(Entry::Value(slot)) => slot.is_some(),
      None => {
        self.inner.children.insert(name.clone(), Entry::Value(None));
        false
      }
    };

    if occupied && candidate.is_singleton() {
      debug!(key = %name, "singleton already registered, keeping existing instance");
      return Ok(());
    }

    let value = resolver::instantiate(self, candidate);
    debug!(key = %name, "registered value");
    self.inner.children.insert(name, Entry::Value(Some(value)));
    Ok(())
  }
}

impl PartialEq for Namespace {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Eq for Namespace {}

impl fmt::Debug for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Namespace")
      .field("is_global", &self.inner.is_global)
      .field("source_path", &self.source_path())
      .field("keys", &self.keys())
      .finish()
  }
}
