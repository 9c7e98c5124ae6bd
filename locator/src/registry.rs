//! Link-time registration of implementations.
//!
//! Every [`register!`](crate::register) invocation submits one
//! [`Registration`] to a process-wide collection built by the `inventory`
//! crate. Nothing runs at registration time: implementations are only
//! constructed when a [`Locator`](crate::Locator) enumerates their capability.
//!
//! The collection doubles as the registration manifest. [`manifest`] lists the
//! implementations known for one capability, [`capabilities`] lists every
//! capability that has at least one registration.

use crate::core::{Candidate, Capability, ServiceOf};
use crate::enumerator::{downcast_instance, Enumerator};
use crate::error::{BoxError, LocatorError, Result};
use std::any::Any;
use std::fmt;

/// Constructs an erased `Arc<ServiceOf<C>>` for one registration.
pub type Constructor = fn() -> std::result::Result<Box<dyn Any + Send + Sync>, BoxError>;

/// A link-time record tying an implementation to a capability.
///
/// Usually produced by [`register!`](crate::register), which fills in the
/// names from the invocation site.
pub struct Registration {
  /// [`Capability::NAME`] of the capability implemented.
  pub capability: &'static str,
  /// Module-qualified implementation name.
  pub implementation: &'static str,
  /// Implementation name as written at the registration site.
  pub name: &'static str,
  pub priority: i32,
  pub construct: Constructor,
}

inventory::collect!(Registration);

impl Registration {
  /// Whether `name` refers to this registration, either by its qualified or
  /// its short name.
  pub fn is_named(&self, name: &str) -> bool {
    self.implementation == name || self.name == name
  }

  fn candidate<C: Capability>(&self) -> Result<Candidate<ServiceOf<C>>> {
    let boxed = (self.construct)()
      .map_err(|source| LocatorError::instantiation(C::NAME, self.implementation, source))?;
    let instance = downcast_instance::<C>(boxed, self.implementation)?;
    Ok(Candidate::new(self.implementation, self.priority, instance))
  }
}

impl fmt::Debug for Registration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registration")
      .field("capability", &self.capability)
      .field("implementation", &self.implementation)
      .field("priority", &self.priority)
      .finish()
  }
}

/// All registrations for the capability named `capability`, in link order.
pub fn registrations(capability: &str) -> impl Iterator<Item = &'static Registration> + '_ {
  inventory::iter::<Registration>
    .into_iter()
    .filter(move |registration| registration.capability == capability)
}

/// The implementations registered for one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
  pub capability: String,
  pub implementations: Vec<&'static str>,
}

impl fmt::Display for Manifest {
  /// One implementation name per line.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for implementation in &self.implementations {
      writeln!(f, "{}", implementation)?;
    }
    Ok(())
  }
}

pub fn manifest(capability: &str) -> Manifest {
  Manifest {
    capability: capability.to_owned(),
    implementations: registrations(capability).map(|r| r.implementation).collect(),
  }
}

/// Names of all capabilities with at least one registration, sorted.
pub fn capabilities() -> Vec<&'static str> {
  let mut names: Vec<&'static str> = inventory::iter::<Registration>
    .into_iter()
    .map(|registration| registration.capability)
    .collect();
  names.sort_unstable();
  names.dedup();
  names
}

/// The [`Enumerator`] over link-time registrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registry;

impl Enumerator for Registry {
  fn enumerate<C: Capability>(&self) -> Result<Vec<Candidate<ServiceOf<C>>>> {
    registrations(C::NAME)
      .map(|registration| registration.candidate::<C>())
      .collect()
  }

  fn instantiate<C: Capability>(
    &self,
    implementation: &str,
  ) -> Result<Option<Candidate<ServiceOf<C>>>> {
    registrations(C::NAME)
      .find(|registration| registration.is_named(implementation))
      .map(|registration| registration.candidate::<C>())
      .transpose()
  }
}
