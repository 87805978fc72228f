//! Registration candidates and the arguments passed to their factories.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A value stored in a namespace.
pub type Value = Arc<dyn Any + Send + Sync>;

type PlainFn = Arc<dyn Fn(&Dependencies) -> Value + Send + Sync>;
type ConstructorFn = Arc<dyn Fn(&Dependencies) -> Value + Send + Sync>;

/// A raw registration, tagged with how it turns into the stored value.
#[derive(Clone)]
pub enum Candidate {
  /// Stored and returned unchanged. Never invoked.
  Literal(Value),
  /// Instantiates the inner candidate, but only when the target slot is empty.
  /// Registering a singleton over an occupied slot keeps the original value.
  Singleton(Box<Candidate>),
  /// Builds a new instance of a known type from the resolved dependencies.
  Constructor {
    requires: Vec<String>,
    type_name: &'static str,
    build: ConstructorFn,
  },
  /// Calls a factory with the resolved dependencies and stores whatever it
  /// returns.
  Plain { requires: Vec<String>, call: PlainFn },
}

impl Candidate {
  pub fn literal<T: Any + Send + Sync>(value: T) -> Self {
    Candidate::Literal(Arc::new(value))
  }

  pub fn value(value: Value) -> Self {
    Candidate::Literal(value)
  }

  pub fn singleton(inner: Candidate) -> Self {
    Candidate::Singleton(Box::new(inner))
  }

  /// A factory invoked as a plain function. The returned value is stored
  /// as-is and may be of any type.
  pub fn factory<I, S, F>(requires: I, call: F) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&Dependencies) -> Value + Send + Sync + 'static,
  {
    Candidate::Plain {
      requires: requires.into_iter().map(Into::into).collect(),
      call: Arc::new(call),
    }
  }

  /// A constructor for `T`. Every instantiation yields a fresh `T`, retrievable
  /// with `get_as::<T>`.
  pub fn constructor<T, I, S, F>(requires: I, build: F) -> Self
  where
    T: Any + Send + Sync,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&Dependencies) -> T + Send + Sync + 'static,
  {
    Candidate::Constructor {
      requires: requires.into_iter().map(Into::into).collect(),
      type_name: type_name::<T>(),
      build: Arc::new(move |deps| Arc::new(build(deps)) as Value),
    }
  }

  pub fn is_singleton(&self) -> bool {
    matches!(self, Candidate::Singleton(_))
  }

  /// The dependency names or paths this candidate declares, in order.
  pub fn requires(&self) -> &[String] {
    match self {
      Candidate::Literal(_) => &[],
      Candidate::Singleton(inner) => inner.requires(),
      Candidate::Constructor { requires, .. } | Candidate::Plain { requires, .. } => requires,
    }
  }
}

impl fmt::Debug for Candidate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Candidate::Literal(_) => f.write_str("Literal"),
      Candidate::Singleton(inner) => f.debug_tuple("Singleton").field(inner).finish(),
      Candidate::Constructor {
        requires,
        type_name,
        ..
      } => f
        .debug_struct("Constructor")
        .field("type", type_name)
        .field("requires", requires)
        .finish_non_exhaustive(),
      Candidate::Plain { requires, .. } => f
        .debug_struct("Plain")
        .field("requires", requires)
        .finish_non_exhaustive(),
    }
  }
}

/// The positional arguments handed to a factory or constructor.
///
/// Entry `i` holds the value resolved for `requires[i]`, or `None` when that
/// dependency could not be resolved or loaded.
#[derive(Clone, Default)]
pub struct Dependencies {
  args: Vec<Option<Value>>,
}

impl Dependencies {
  pub fn new(args: Vec<Option<Value>>) -> Self {
    Self { args }
  }

  pub fn len(&self) -> usize {
    self.args.len()
  }

  pub fn is_empty(&self) -> bool {
    self.args.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Value> {
    self.args.get(index).and_then(Option::as_ref)
  }

  /// Returns argument `index` downcast to `T`, or `None` if it is absent or of
  /// another type.
  pub fn get_as<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
    self.get(index).cloned()?.downcast::<T>().ok()
  }

  pub fn iter(&self) -> impl Iterator<Item = Option<&Value>> {
    self.args.iter().map(Option::as_ref)
  }
}

impl fmt::Debug for Dependencies {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
      .entries(self.args.iter().map(|arg| arg.is_some()))
      .finish()
  }
}
