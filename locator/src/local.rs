// locator/src/local.rs

//! A single-threaded container of one product.

use crate::composite::CompositeProvider;
use crate::core::{Candidate, Mapping, Provider};
use crate::error::Result;
use once_cell::unsync::OnceCell;
use std::fmt;

/// A single-threaded, non-thread-safe counterpart of
/// [`CompositeContainer`](crate::CompositeContainer).
///
/// It caches its product in an `unsync::OnceCell`, so the product does not
/// need to be `Send` or `Sync` (an `Rc` or a `RefCell` works). The providers
/// and mappings themselves are still the shared, thread-safe instances the
/// locator resolved.
pub struct LocalContainer<P> {
  composite: CompositeProvider<P>,
  product: OnceCell<P>,
}

impl<P> LocalContainer<P> {
  pub fn new(
    providers: Vec<Candidate<dyn Provider<P>>>,
    mappings: Vec<Candidate<dyn Mapping<P>>>,
  ) -> Result<Self> {
    CompositeProvider::new(providers, mappings).map(Self::from)
  }

  pub fn get(&self) -> &P {
    self.product.get_or_init(|| self.composite.evaluate())
  }

  pub fn cached(&self) -> Option<&P> {
    self.product.get()
  }

  pub fn is_populated(&self) -> bool {
    self.product.get().is_some()
  }

  pub fn providers(&self) -> Vec<Candidate<dyn Provider<P>>> {
    self.composite.providers()
  }

  pub fn mappings(&self) -> Vec<Candidate<dyn Mapping<P>>> {
    self.composite.mappings()
  }

  pub fn chosen(&self) -> &Candidate<dyn Provider<P>> {
    self.composite.chosen()
  }
}

impl<P> From<CompositeProvider<P>> for LocalContainer<P> {
  fn from(composite: CompositeProvider<P>) -> Self {
    Self {
      composite,
      product: OnceCell::new(),
    }
  }
}

impl<P> fmt::Debug for LocalContainer<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LocalContainer")
      .field("composite", &self.composite)
      .field("populated", &self.is_populated())
      .finish()
  }
}
