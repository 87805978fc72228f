//! # Laic
//!
//! A namespaced, lazily-instantiating dependency container.
//!
//! Laic keeps one process-wide tree of namespaces. Values are registered under
//! names or slash-separated paths and retrieved elsewhere in the application.
//! A registration is a [`Candidate`] that says how the stored value comes to
//! be: a literal stored as-is, a plain factory, a constructor, or a singleton
//! that is never replaced once set. Factories and constructors declare the
//! names they require. Those are resolved from the tree before the call, and
//! anything missing is loaded on demand through the injected [`ModuleLoader`].
//!
//! ## Core Concepts
//!
//! - **Laic**: the process-wide handle, reachable via `Laic::instance()`. It
//!   dereferences to the root [`Namespace`].
//! - **Namespaces**: nested registries. Names registered on the root land in
//!   its `global` namespace. Paths such as `"db/pool"` address nested
//!   namespaces and create them on registration.
//! - **Lookups**: `get` and `get_namespace` return `None` instead of failing.
//! - **Loading**: `load_file` and `load_dir` pull project files in through the
//!   [`ModuleLoader`] and [`DirectoryLister`] collaborators.
//!
//! ## Quick Start
//!
//! ```
//! use laic::{Candidate, Laic, ModuleMap};
//!
//! #[derive(Debug)]
//! struct Settings {
//!   url: String,
//! }
//!
//! struct Database {
//!   url: String,
//! }
//!
//! let laic = Laic::builder()
//!   .loader(ModuleMap::new())
//!   .build()
//!   .unwrap();
//!
//! let settings = Settings {
//!   url: "postgres://localhost".into(),
//! };
//! laic
//!   .register("config/settings", Candidate::literal(settings))
//!   .unwrap();
//!
//! // The constructor receives `config/settings` as its first argument.
//! laic
//!   .register(
//!     "db",
//!     Candidate::constructor(["config/settings"], |deps| Database {
//!       url: deps.get_as::<Settings>(0).map(|s| s.url.clone()).unwrap_or_default(),
//!     }),
//!   )
//!   .unwrap();
//!
//! let db = laic.get_as::<Database>("db").unwrap();
//! assert_eq!(db.url, "postgres://localhost");
//! # Laic::reset();
//! ```

mod candidate;
mod config;
mod error;
mod files;
mod global;
mod key;
mod loader;
mod macros;
mod namespace;
mod resolver;

pub use candidate::{Candidate, Dependencies, Value};
pub use config::LaicConfig;
pub use error::{LaicError, LoadError, Result};
pub use global::{Laic, LaicBuilder};
pub use key::{Key, Symbol};
pub use loader::{DirectoryLister, FsDirectoryLister, ModuleLoader, ModuleMap};
pub use namespace::{Namespace, GLOBAL_NAMESPACE};
