//! Child keys and the lexical rules that tell names from paths.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) const PATH_SEPARATOR: char = '/';

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque key that is only equal to itself and its clones.
///
/// Two symbols created with the same description are distinct keys. A symbol
/// is always a name, never a path, even when its description contains `/`.
#[derive(Clone)]
pub struct Symbol {
  id: u64,
  description: Arc<str>,
}

impl Symbol {
  pub fn new(description: &str) -> Self {
    Self {
      id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
      description: Arc::from(description),
    }
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Symbol {}

impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Symbol({})", self.description)
  }
}

/// A key under which a namespace holds a child namespace or a value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
  /// A string key. Contains `/` when used as a path.
  Name(String),
  /// An opaque symbolic key.
  Symbol(Symbol),
}

impl Key {
  /// True for symbols and for strings without a path separator.
  pub fn is_name(&self) -> bool {
    match self {
      Key::Name(name) => !name.contains(PATH_SEPARATOR),
      Key::Symbol(_) => true,
    }
  }

  /// True for strings whose first separator is not in the leading position.
  pub fn is_valid_path(&self) -> bool {
    match self {
      Key::Name(name) => matches!(name.find(PATH_SEPARATOR), Some(i) if i > 0),
      Key::Symbol(_) => false,
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      Key::Name(name) => name.is_empty(),
      Key::Symbol(_) => false,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Key::Name(name) => Some(name),
      Key::Symbol(_) => None,
    }
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Name(name) => write!(f, "{:?}", name),
      Key::Symbol(symbol) => write!(f, "{:?}", symbol),
    }
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Name(name) => f.write_str(name),
      Key::Symbol(symbol) => write!(f, "{:?}", symbol),
    }
  }
}

impl From<&str> for Key {
  fn from(name: &str) -> Self {
    Key::Name(name.to_owned())
  }
}

impl From<String> for Key {
  fn from(name: String) -> Self {
    Key::Name(name)
  }
}

impl From<&String> for Key {
  fn from(name: &String) -> Self {
    Key::Name(name.clone())
  }
}

impl From<Symbol> for Key {
  fn from(symbol: Symbol) -> Self {
    Key::Symbol(symbol)
  }
}

impl From<&Symbol> for Key {
  fn from(symbol: &Symbol) -> Self {
    Key::Symbol(symbol.clone())
  }
}

impl From<&Key> for Key {
  fn from(key: &Key) -> Self {
    key.clone()
  }
}

/// Splits a path into its segments, ignoring a single trailing separator.
pub(crate) fn split_path(path: &str) -> Vec<String> {
  let path = path.strip_suffix(PATH_SEPARATOR).unwrap_or(path);
  path.split(PATH_SEPARATOR).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_names_and_paths_are_told_apart() {
    assert!(Key::from("foo").is_name());
    assert!(!Key::from("foo").is_valid_path());

    assert!(!Key::from("foo/bar").is_name());
    assert!(Key::from("foo/bar").is_valid_path());

    // A leading separator disqualifies the key as a path.
    assert!(!Key::from("/foo").is_valid_path());
    assert!(!Key::from("/foo/bar").is_valid_path());
    assert!(!Key::from("/foo").is_name());
  }

  #[test]
  fn test_symbols_are_never_paths() {
    let symbol = Symbol::new("foo/bar");
    let key = Key::from(&symbol);
    assert!(key.is_name());
    assert!(!key.is_valid_path());
    assert!(!key.is_empty());
  }

  #[test]
  fn test_symbols_compare_by_identity() {
    let a = Symbol::new("same");
    let b = Symbol::new("same");
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
    assert_eq!(a.description(), "same");
  }

  #[test]
  fn test_split_path_strips_one_trailing_separator() {
    assert_eq!(split_path("a/b/c"), vec!["a", "b", "c"]);
    assert_eq!(split_path("a/b/"), vec!["a", "b"]);
    assert_eq!(split_path("a//"), vec!["a", ""]);
  }
}
