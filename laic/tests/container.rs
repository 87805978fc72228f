mod common;

use common::{fresh_container, init_tracing, project_modules, Literal, PROJECT_ROOT};
use laic::{resolve, Candidate, Laic, LaicConfig, LaicError, ModuleMap};
use serial_test::serial;

#[test]
#[serial]
fn test_container_is_a_singleton() {
  init_tracing();
  Laic::reset();

  let laic = Laic::instance();
  let laic2 = Laic::instance();
  laic.add_namespace("foo").unwrap();

  assert!(laic.ptr_eq(&laic2));
  assert_eq!(laic2.child("foo"), laic.child("foo"));

  // After a reset, construction starts from an empty tree.
  Laic::reset();
  let laic3 = Laic::instance();
  assert!(!laic3.ptr_eq(&laic));
  assert!(laic3.child("foo").is_none());
}

#[test]
#[serial]
fn test_builder_returns_the_live_container() {
  let laic = fresh_container(project_modules());

  // The second build ignores its config and loader.
  let again = Laic::builder()
    .config(LaicConfig::with_project_root("/elsewhere"))
    .loader(ModuleMap::new())
    .build()
    .unwrap();

  assert!(again.ptr_eq(&laic));
  assert_eq!(again.config().project_root, std::path::PathBuf::from(PROJECT_ROOT));
}

#[test]
#[serial]
fn test_creates_a_namespace_on_construction() {
  init_tracing();
  Laic::reset();

  let laic = Laic::with_namespace("foo").unwrap();

  assert!(laic.child("foo").is_some());
}

#[test]
#[serial]
fn test_construction_merges_namespaces_into_the_live_container() {
  let laic = fresh_container(ModuleMap::new());

  let same = Laic::with_namespace("foo/bar").unwrap();

  assert!(same.ptr_eq(&laic));
  assert!(laic.has_namespace_path("foo/bar"));
}

#[test]
#[serial]
fn test_failed_first_construction_records_nothing() {
  init_tracing();
  Laic::reset();

  let result = Laic::with_namespace("");

  assert!(matches!(result, Err(LaicError::InvalidArgument(_))));
  assert!(Laic::reset().is_none());
}

#[test]
#[serial]
fn test_namespaces_stay_usable_after_reset() {
  let laic = fresh_container(ModuleMap::new());
  let foo = laic.add_namespace("foo").unwrap();

  let previous = Laic::reset().unwrap();
  foo.register("value", Candidate::literal(5u8)).unwrap();

  assert!(previous.ptr_eq(&laic));
  assert_eq!(*foo.get_as::<u8>("value").unwrap(), 5);
}

#[test]
#[serial]
fn test_dependencies_resolve_absent_once_the_root_is_dropped() {
  let laic = fresh_container(ModuleMap::new());
  let global = laic.global().clone();
  drop(laic);
  Laic::reset();

  global.register("x", Candidate::literal(1u8)).unwrap();
  global
    .register(
      "needs_x",
      Candidate::constructor(["x"], |deps| deps.get(0).is_some()),
    )
    .unwrap();

  assert!(global.root().is_none());
  assert!(global.get("x").is_some());
  assert!(!*global.get_as::<bool>("needs_x").unwrap());
}

#[test]
#[serial]
fn test_resolve_macro_reads_the_live_container() {
  let laic = fresh_container(project_modules());
  laic.load_file("test/lib/literal").unwrap();
  laic.register("answer", Candidate::literal(42u32)).unwrap();

  let literal = resolve!(Literal, "test/lib/literal");
  assert_eq!(literal.foo, "bar");
  let answer = resolve!("answer");
  assert!(answer.is::<u32>());
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required dependency")]
fn test_resolve_panics_on_missing_dependency() {
  fresh_container(ModuleMap::new());
  resolve!(Literal, "missing");
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required dependency")]
fn test_resolve_panics_on_wrong_type() {
  let laic = fresh_container(ModuleMap::new());
  laic.register("number", Candidate::literal(1u8)).unwrap();
  resolve!(String, "number");
}
