//! The seam between the locator and wherever implementations come from.

use crate::core::{Candidate, Capability, ServiceOf};
use crate::error::{LocatorError, Result};
use std::any::Any;
use std::sync::Arc;

/// Enumerates candidate implementations of a capability.
///
/// Implementations must create candidates afresh on every call: the locator
/// relies on re-enumeration to observe changes between requests. The order of
/// the returned candidates is the tie-break order for equal priorities, but it
/// need not be stable across calls.
///
/// Failures to construct a registered implementation are reported as
/// [`LocatorError::ServiceConfiguration`](crate::LocatorError::ServiceConfiguration).
pub trait Enumerator {
  /// All candidates registered for `C`.
  fn enumerate<C: Capability>(&self) -> Result<Vec<Candidate<ServiceOf<C>>>>;

  /// Instantiates the single implementation of `C` named `implementation`,
  /// or returns `None` if no such implementation is known.
  fn instantiate<C: Capability>(
    &self,
    implementation: &str,
  ) -> Result<Option<Candidate<ServiceOf<C>>>>;
}

impl<E: Enumerator + ?Sized> Enumerator for &E {
  fn enumerate<C: Capability>(&self) -> Result<Vec<Candidate<ServiceOf<C>>>> {
    (**self).enumerate::<C>()
  }

  fn instantiate<C: Capability>(
    &self,
    implementation: &str,
  ) -> Result<Option<Candidate<ServiceOf<C>>>> {
    (**self).instantiate::<C>(implementation)
  }
}

impl<E: Enumerator + ?Sized> Enumerator for Arc<E> {
  fn enumerate<C: Capability>(&self) -> Result<Vec<Candidate<ServiceOf<C>>>> {
    (**self).enumerate::<C>()
  }

  fn instantiate<C: Capability>(
    &self,
    implementation: &str,
  ) -> Result<Option<Candidate<ServiceOf<C>>>> {
    (**self).instantiate::<C>(implementation)
  }
}

/// Recovers the typed service object from an erased instance box.
///
/// Registrations store `Arc<ServiceOf<C>>` behind `dyn Any`; a mismatch means
/// two capabilities share a name or a registration was built for a different
/// capability.
pub(crate) fn downcast_instance<C: Capability>(
  boxed: Box<dyn Any + Send + Sync>,
  implementation: &str,
) -> Result<Arc<ServiceOf<C>>> {
  boxed
    .downcast::<Arc<ServiceOf<C>>>()
    .map(|instance| *instance)
    .map_err(|_| {
      LocatorError::configuration(
        C::NAME,
        format!(
          "'{}' is not an implementation of {}",
          implementation,
          std::any::type_name::<ServiceOf<C>>()
        ),
      )
    })
}
