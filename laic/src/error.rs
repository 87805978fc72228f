use std::path::PathBuf;

use thiserror::Error;

/// The main error type for `laic` operations.
#[derive(Debug, Error)]
pub enum LaicError {
  /// A namespace or registration call was given a key it cannot use: an empty
  /// name, a malformed path, or a key already occupied by the other kind of
  /// entry.
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),
}

/// Errors reported by the `ModuleLoader` and `DirectoryLister` collaborators.
///
/// The container never propagates these. They are logged and the affected
/// registration is left absent.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("No module resolves at {0:?}")]
  NotFound(PathBuf),

  #[error("I/O error while loading: {0}")]
  Io(#[from] std::io::Error),

  #[error("Module at {path:?} failed to load: {reason}")]
  Module { path: PathBuf, reason: String },
}

/// A specialized `Result` type for `laic` operations.
pub type Result<T, E = LaicError> = std::result::Result<T, E>;
