//! Turns registration candidates into stored values.

use tracing::debug;

use crate::candidate::{Candidate, Dependencies, Value};
use crate::namespace::Namespace;

/// Produces the value to store for `candidate`, resolving its declared
/// dependencies against the root of `namespace` first.
pub(crate) fn instantiate(namespace: &Namespace, candidate: Candidate) -> Value {
  match candidate {
    Candidate::Literal(value) => value,
    Candidate::Singleton(inner) => instantiate(namespace, *inner),
    Candidate::Plain { requires, call } => {
      let deps = resolve_dependencies(namespace, &requires);
      call(&deps)
    }
    Candidate::Constructor {
      requires,
      type_name,
      build,
    } => {
      let deps = resolve_dependencies(namespace, &requires);
      debug!(constructor = type_name, "constructing instance");
      build(&deps)
    }
  }
}

// Entries are resolved strictly in order. A later entry may rely on an earlier
// one having been loaded and registered.
fn resolve_dependencies(namespace: &Namespace, requires: &[String]) -> Dependencies {
  let root = match namespace.root() {
    Some(root) => root,
    None => return Dependencies::new(vec![None; requires.len()]),
  };

  let args = requires
    .iter()
    .map(|name| {
      if let Some(value) = root.get(name) {
        return Some(value);
      }
      debug!(dependency = %name, "dependency not registered, loading it");
      if let Err(e) = root.load_file(name) {
        debug!(dependency = %name, error = %e, "failed to load dependency");
      }
      let value = root.get(name);
      if value.is_none() {
        debug!(dependency = %name, "dependency unresolved, passing an absent argument");
      }
      value
    })
    .collect();

  Dependencies::new(args)
}
