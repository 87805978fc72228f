use laic::{resolve, Candidate, Laic, Value};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tracker() -> Candidate {
  Candidate::factory(Vec::<String>::new(), |_| {
    println!("Creating RequestTracker...");
    Arc::new(RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }) as Value
  })
}

fn main() {
  let laic = Laic::instance();

  // --- Singleton Registration ---
  // The second registration is ignored, so the factory only runs once.
  laic.register("singleton_tracker", Candidate::singleton(tracker())).unwrap();
  laic.register("singleton_tracker", Candidate::singleton(tracker())).unwrap();

  let s1 = resolve!(RequestTracker, "singleton_tracker");
  println!("Singleton ID after two registrations: {}", s1.id);
  assert_eq!(s1.id, 0);

  // --- Plain Registration ---
  // Re-registering a plain factory runs it again and replaces the value.
  laic.register("plain_tracker", tracker()).unwrap();
  let p1 = resolve!(RequestTracker, "plain_tracker");
  laic.register("plain_tracker", tracker()).unwrap();
  let p2 = resolve!(RequestTracker, "plain_tracker");
  println!("Plain IDs: {}, {}", p1.id, p2.id);
  assert_eq!((p1.id, p2.id), (1, 2));
  assert!(!Arc::ptr_eq(&p1, &p2));
}
