use laic::{Candidate, Laic, Symbol};

fn main() {
  // Constructing with a path creates the nested namespaces.
  let laic = Laic::with_namespace("app/http").unwrap();

  let http = laic.get_namespace("app/http").unwrap();
  http.register("port", Candidate::literal(8080u16)).unwrap();

  // Registering by path creates what is missing along the way.
  laic.register("app/db/url", Candidate::literal("postgres://localhost")).unwrap();

  println!("port = {:?}", laic.get_as::<u16>("app/http/port"));
  println!("url  = {:?}", laic.get_as::<&str>("app/db/url"));

  // Names on the root live in the `global` namespace.
  laic.register("version", Candidate::literal("1.0.0")).unwrap();
  assert!(laic.global().get("version").is_some());

  // Symbols make keys nobody else can collide with.
  let private = Symbol::new("private");
  let hidden = laic.add_namespace(&private).unwrap();
  hidden.register("secret", Candidate::literal(7u8)).unwrap();
  assert_eq!(laic.get_namespace(&private), Some(hidden));

  // Missing entries are reported as `None`, never as errors.
  assert!(laic.get("app/cache/url").is_none());
}
