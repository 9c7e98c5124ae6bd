//! A runtime catalog of implementations.

use crate::core::{Candidate, Capability, ServiceOf};
use crate::enumerator::{downcast_instance, Enumerator};
use crate::error::{BoxError, LocatorError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

type Factory =
  Arc<dyn Fn() -> std::result::Result<Box<dyn Any + Send + Sync>, BoxError> + Send + Sync>;

struct Entry {
  implementation: &'static str,
  priority: i32,
  factory: Factory,
}

/// An [`Enumerator`] whose registrations are added at runtime.
///
/// This is the counterpart of the link-time [`Registry`](crate::Registry) for
/// implementations that are only known after start-up, and for tests that need
/// an isolated set of implementations. It is thread-safe: registrations may be
/// added or removed while locators enumerate it. Each enumeration invokes the
/// factories again, so every resolution receives fresh instances.
#[derive(Default)]
pub struct Catalog {
  entries: DashMap<&'static str, Vec<Entry>>,
}

impl Catalog {
  /// Creates a new, empty `Catalog`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn add_internal(&self, capability: &'static str, entry: Entry) {
    tracing::trace!(
      capability,
      implementation = entry.implementation,
      priority = entry.priority,
      "Adding implementation to catalog."
    );
    self.entries.entry(capability).or_default().push(entry);
  }

  fn candidate<C: Capability>(
    implementation: &'static str,
    priority: i32,
    factory: &Factory,
  ) -> Result<Candidate<ServiceOf<C>>> {
    let boxed =
      factory().map_err(|source| LocatorError::instantiation(C::NAME, implementation, source))?;
    let instance = downcast_instance::<C>(boxed, implementation)?;
    Ok(Candidate::new(implementation, priority, instance))
  }

  // Snapshot of the entries for `capability`. Factories are cloned out so no
  // shard lock is held while user code runs.
  fn snapshot(&self, capability: &str) -> Vec<(&'static str, i32, Factory)> {
    self
      .entries
      .get(capability)
      .map(|entries| {
        entries
          .iter()
          .map(|e| (e.implementation, e.priority, Arc::clone(&e.factory)))
          .collect()
      })
      .unwrap_or_default()
  }

  // --- PUBLIC API ---

  /// Adds an implementation of `C`. The factory runs on every enumeration.
  pub fn add<C: Capability>(
    &self,
    implementation: &'static str,
    priority: i32,
    factory: impl Fn() -> Arc<ServiceOf<C>> + Send + Sync + 'static,
  ) {
    self.add_internal(
      C::NAME,
      Entry {
        implementation,
        priority,
        factory: Arc::new(move || -> std::result::Result<Box<dyn Any + Send + Sync>, BoxError> {
          Ok(Box::new(factory()))
        }),
      },
    );
  }

  /// Adds an implementation of `C` whose construction may fail. A failure
  /// surfaces as a service configuration error when `C` is enumerated.
  pub fn try_add<C: Capability, E: Into<BoxError>>(
    &self,
    implementation: &'static str,
    priority: i32,
    factory: impl Fn() -> std::result::Result<Arc<ServiceOf<C>>, E> + Send + Sync + 'static,
  ) {
    self.add_internal(
      C::NAME,
      Entry {
        implementation,
        priority,
        factory: Arc::new(move || -> std::result::Result<Box<dyn Any + Send + Sync>, BoxError> {
          match factory() {
            Ok(instance) => Ok(Box::new(instance)),
            Err(error) => Err(error.into()),
          }
        }),
      },
    );
  }

  /// Removes every registration of `implementation` for `C`. Returns whether
  /// anything was removed.
  pub fn remove<C: Capability>(&self, implementation: &str) -> bool {
    let Some(mut entries) = self.entries.get_mut(C::NAME) else {
      return false;
    };
    let before = entries.len();
    entries.retain(|entry| entry.implementation != implementation);
    before != entries.len()
  }

  /// Removes all registrations for `C`.
  pub fn clear<C: Capability>(&self) {
    self.entries.remove(C::NAME);
  }

  /// Implementation names registered for `C`, in registration order.
  pub fn implementations<C: Capability>(&self) -> Vec<&'static str> {
    self
      .entries
      .get(C::NAME)
      .map(|entries| entries.iter().map(|e| e.implementation).collect())
      .unwrap_or_default()
  }
}

impl Enumerator for Catalog {
  fn enumerate<C: Capability>(&self) -> Result<Vec<Candidate<ServiceOf<C>>>> {
    self
      .snapshot(C::NAME)
      .into_iter()
      .map(|(implementation, priority, factory)| {
        Self::candidate::<C>(implementation, priority, &factory)
      })
      .collect()
  }

  fn instantiate<C: Capability>(
    &self,
    implementation: &str,
  ) -> Result<Option<Candidate<ServiceOf<C>>>> {
    self
      .snapshot(C::NAME)
      .into_iter()
      .find(|(name, _, _)| *name == implementation)
      .map(|(name, priority, factory)| Self::candidate::<C>(name, priority, &factory))
      .transpose()
  }
}
