//! Public macros for ergonomic dependency resolution.

/// Resolves a dependency from the process-wide container.
///
/// It panics if nothing is registered under the name or path, or if the
/// registered value is not of the requested type. For a non-panicking
/// version, use `Laic::instance().get_as::<T>(...)` directly.
///
/// # Examples
///
/// ```
/// use laic::{resolve, Candidate, Laic};
///
/// Laic::instance()
///   .register("services/port", Candidate::literal(8080u16))
///   .unwrap();
///
/// let port = resolve!(u16, "services/port");
/// assert_eq!(*port, 8080);
///
/// // Untyped resolution returns the stored `Value`.
/// let raw = resolve!("services/port");
/// assert!(raw.is::<u16>());
/// # Laic::reset();
/// ```
#[macro_export]
macro_rules! resolve {
  // Arm for a typed value: resolve!(MyService, "path/to/name")
  ($type:ty, $key:expr) => {{
    let key: $crate::Key = ($key).into();
    $crate::Laic::instance()
      .get_as::<$type>(&key)
      .unwrap_or_else(|| {
        panic!(
          "Failed to resolve required dependency '{}': {}",
          key,
          std::any::type_name::<$type>()
        )
      })
  }};

  // Arm for an untyped value: resolve!("name")
  ($key:expr) => {{
    let key: $crate::Key = ($key).into();
    $crate::Laic::instance()
      .get(&key)
      .unwrap_or_else(|| panic!("Failed to resolve required dependency '{}'", key))
  }};
}
