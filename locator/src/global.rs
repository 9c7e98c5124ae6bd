//! The global locator instance and access function.

use crate::locator::Locator;
use crate::registry::Registry;
use once_cell::sync::Lazy;

// The one and only global locator, over the link-time registry.
// It will be created on its first access in a thread-safe manner.
static GLOBAL_LOCATOR: Lazy<Locator<Registry>> = Lazy::new(Locator::default);

/// Provides a reference to the global locator.
///
/// It enumerates the link-time [`Registry`] and starts without overrides.
/// Overrides set through [`Locator::set_override`] are visible to every
/// caller of `global()`, so prefer a dedicated [`Locator`] where isolation
/// matters, e.g. in tests.
///
/// # Examples
///
/// ```
/// use fibre_locator::{capability, global, register, Provider};
///
/// capability! { Port: Provider<u16> }
///
/// #[derive(Default)]
/// struct DefaultPort;
/// impl Provider<u16> for DefaultPort {
///   fn provide(&self) -> u16 { 8080 }
/// }
///
/// register!(Port => DefaultPort);
///
/// fn main() {
///   let port = global().container::<Port>().unwrap();
///   assert_eq!(*port.get(), 8080);
/// }
/// ```
pub fn global() -> &'static Locator<Registry> {
  &GLOBAL_LOCATOR
}
