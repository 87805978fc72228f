//! Container configuration, parsed from YAML.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LaicError, Result};

/// Settings that control how files are located and which ones `load_dir` picks up.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LaicConfig {
  /// Directory that project-relative file paths are resolved against.
  #[serde(default = "default_project_root")]
  pub project_root: PathBuf,
  /// File extensions, without the dot, that `load_dir` loads.
  #[serde(default = "default_extensions")]
  pub extensions: Vec<String>,
  /// Files whose names begin with this prefix are skipped by `load_dir`.
  #[serde(default = "default_skip_prefix")]
  pub skip_prefix: String,
}

fn default_project_root() -> PathBuf {
  env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn default_extensions() -> Vec<String> {
  vec!["js".to_string(), "json".to_string()]
}

fn default_skip_prefix() -> String {
  "index".to_string()
}

impl Default for LaicConfig {
  fn default() -> Self {
    Self {
      project_root: default_project_root(),
      extensions: default_extensions(),
      skip_prefix: default_skip_prefix(),
    }
  }
}

impl LaicConfig {
  pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
    Self {
      project_root: project_root.into(),
      ..Self::default()
    }
  }

  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| LaicError::ConfigParse(e.to_string()))
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).map_err(|e| LaicError::ConfigParse(e.to_string()))
  }

  /// Whether `load_dir` should load a file with this name.
  pub(crate) fn accepts_file(&self, file_name: &str) -> bool {
    if !self.skip_prefix.is_empty() && file_name.starts_with(self.skip_prefix.as_str()) {
      return false;
    }
    let extension = match Path::new(file_name).extension() {
      Some(ext) => ext.to_string_lossy().to_lowercase(),
      None => return false,
    };
    self.extensions.iter().any(|known| known.to_lowercase() == extension)
  }
}
