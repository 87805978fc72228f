#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use laic::{Candidate, DirectoryLister, Laic, LaicConfig, LoadError, ModuleMap, Value};
use tracing_subscriber::EnvFilter;

pub const PROJECT_ROOT: &str = "/srv/app";

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
pub struct Literal {
  pub foo: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Built {
  pub bar: u32,
}

// Holds whatever its constructor was handed for `test/lib/literal`.
pub struct Foo {
  pub bar: Option<Arc<Literal>>,
}

impl Foo {
  pub fn print(&self) -> String {
    self.bar.as_ref().map(|l| l.foo.clone()).unwrap_or_default()
  }
}

pub fn literal_module() -> Candidate {
  Candidate::literal(Literal { foo: "bar".into() })
}

pub fn foo_constructor() -> Candidate {
  Candidate::constructor(["test/lib/literal"], |deps| Foo {
    bar: deps.get_as::<Literal>(0),
  })
}

/// The modules of a small project rooted at `PROJECT_ROOT`.
pub fn project_modules() -> ModuleMap {
  ModuleMap::rooted_at(PROJECT_ROOT)
    .module("test/lib/literal", literal_module)
    .module("test/lib/constructor", foo_constructor)
    .module("test/lib/emptyBuilder", || {
      Candidate::factory(Vec::<String>::new(), |_| Arc::new(Built { bar: 42 }) as Value)
    })
    .module("settings", || Candidate::literal(String::from("from project root")))
}

/// A `DirectoryLister` serving fixed listings.
#[derive(Default)]
pub struct StaticLister {
  listings: HashMap<PathBuf, Vec<String>>,
}

impl StaticLister {
  pub fn dir(mut self, dir: impl AsRef<Path>, files: &[&str]) -> Self {
    self.listings.insert(
      Path::new(PROJECT_ROOT).join(dir),
      files.iter().map(|f| f.to_string()).collect(),
    );
    self
  }
}

impl DirectoryLister for StaticLister {
  fn list_files(&self, dir: &Path) -> Result<Vec<String>, LoadError> {
    self
      .listings
      .get(dir)
      .cloned()
      .ok_or_else(|| LoadError::NotFound(dir.to_path_buf()))
  }
}

pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

/// Drops any live container and builds a new one over `modules`.
pub fn fresh_container(modules: ModuleMap) -> Laic {
  fresh_container_with_lister(modules, StaticLister::default())
}

pub fn fresh_container_with_lister(modules: ModuleMap, lister: StaticLister) -> Laic {
  init_tracing();
  Laic::reset();
  Laic::builder()
    .config(LaicConfig::with_project_root(PROJECT_ROOT))
    .loader(modules)
    .lister(lister)
    .build()
    .unwrap()
}
