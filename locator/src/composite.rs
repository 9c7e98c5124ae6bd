//! Composite providers: a chosen base provider plus an ordered mapping chain.
//!
//! These types are returned by the [`Locator`](crate::Locator) so callers can
//! inspect which implementations were found, and use them to obtain products.

use crate::core::{Candidate, Mapping, Provider};
use crate::error::{LocatorError, Result};
use once_cell::sync::OnceCell;
use std::fmt;

/// A provider composed of a non-empty list of providers and a possibly empty
/// list of mappings.
///
/// Only the first provider is used for evaluation. All mappings are applied in
/// list order. Nothing is cached.
pub struct CompositeProvider<P> {
  providers: Vec<Candidate<dyn Provider<P>>>,
  mappings: Vec<Candidate<dyn Mapping<P>>>,
}

impl<P> CompositeProvider<P> {
  /// Fails with [`LocatorError::InvalidArgument`] if `providers` is empty.
  pub fn new(
    providers: Vec<Candidate<dyn Provider<P>>>,
    mappings: Vec<Candidate<dyn Mapping<P>>>,
  ) -> Result<Self> {
    if providers.is_empty() {
      return Err(LocatorError::InvalidArgument(
        "a composite provider requires at least one provider".to_owned(),
      ));
    }
    Ok(Self {
      providers,
      mappings,
    })
  }

  /// A copy of the provider list. Never empty.
  pub fn providers(&self) -> Vec<Candidate<dyn Provider<P>>> {
    self.providers.clone()
  }

  /// A copy of the mapping list, in application order. May be empty.
  pub fn mappings(&self) -> Vec<Candidate<dyn Mapping<P>>> {
    self.mappings.clone()
  }

  pub(crate) fn mapping_slice(&self) -> &[Candidate<dyn Mapping<P>>] {
    &self.mappings
  }

  /// The provider used for evaluation.
  pub fn chosen(&self) -> &Candidate<dyn Provider<P>> {
    &self.providers[0]
  }

  /// Obtains a product from the chosen provider and runs it through every
  /// mapping in order.
  pub fn evaluate(&self) -> P {
    let product = self.chosen().instance().provide();
    self
      .mappings
      .iter()
      .fold(product, |product, mapping| mapping.instance().map(product))
  }
}

impl<P> Provider<P> for CompositeProvider<P> {
  fn provide(&self) -> P {
    self.evaluate()
  }
}

impl<P> fmt::Debug for CompositeProvider<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompositeProvider")
      .field("providers", &self.providers)
      .field("mappings", &self.mappings)
      .finish()
  }
}

/// A factory of products: every call to [`get`](Self::get) evaluates the
/// composite again and yields a fresh product.
pub struct CompositeFactory<P> {
  composite: CompositeProvider<P>,
}

impl<P> CompositeFactory<P> {
  pub fn new(
    providers: Vec<Candidate<dyn Provider<P>>>,
    mappings: Vec<Candidate<dyn Mapping<P>>>,
  ) -> Result<Self> {
    CompositeProvider::new(providers, mappings).map(Self::from)
  }

  pub fn get(&self) -> P {
    self.composite.evaluate()
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

  pub fn as_composite(&self) -> &CompositeProvider<P> {
    &self.composite
  }
}

impl<P> From<CompositeProvider<P>> for CompositeFactory<P> {
  fn from(composite: CompositeProvider<P>) -> Self {
    Self { composite }
  }
}

impl<P> Provider<P> for CompositeFactory<P> {
  fn provide(&self) -> P {
    self.get()
  }
}

impl<P> fmt::Debug for CompositeFactory<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompositeFactory")
      .field("providers", &self.composite.providers)
      .field("mappings", &self.composite.mappings)
      .finish()
  }
}

/// A container of a single product.
///
/// The first call to [`get`](Self::get) evaluates the composite and caches the
/// product; later calls return the cached product. Under concurrent first
/// access the evaluation runs exactly once and every caller observes the same
/// instance. Once populated, reads take no lock. The cache is never cleared.
pub struct CompositeContainer<P> {
  composite: CompositeProvider<P>,
  product: OnceCell<P>,
}

impl<P> CompositeContainer<P> {
  pub fn new(
    providers: Vec<Candidate<dyn Provider<P>>>,
    mappings: Vec<Candidate<dyn Mapping<P>>>,
  ) -> Result<Self> {
    CompositeProvider::new(providers, mappings).map(Self::from)
  }

  pub fn get(&self) -> &P {
    self.product.get_or_init(|| {
      tracing::trace!(
        implementation = self.composite.chosen().implementation(),
        mappings = self.composite.mappings.len(),
        "Populating composite container."
      );
      self.composite.evaluate()
    })
  }

  /// The cached product, without evaluating.
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

  pub fn as_composite(&self) -> &CompositeProvider<P> {
    &self.composite
  }
}

impl<P> From<CompositeProvider<P>> for CompositeContainer<P> {
  fn from(composite: CompositeProvider<P>) -> Self {
    Self {
      composite,
      product: OnceCell::new(),
    }
  }
}

// Containers hand out clones so they can stand in wherever a provider is
// expected.
impl<P: Clone + Send + Sync> Provider<P> for CompositeContainer<P> {
  fn provide(&self) -> P {
    self.get().clone()
  }
}

impl<P> fmt::Debug for CompositeContainer<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompositeContainer")
      .field("providers", &self.composite.providers)
      .field("mappings", &self.composite.mappings)
      .field("populated", &self.is_populated())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  fn provider<F>(name: &'static str, priority: i32, f: F) -> Candidate<dyn Provider<String>>
  where
    F: Fn() -> String + Send + Sync + 'static,
  {
    let instance: Arc<dyn Provider<String>> = Arc::new(f);
    Candidate::new(name, priority, instance)
  }

  fn mapping<F>(name: &'static str, priority: i32, f: F) -> Candidate<dyn Mapping<String>>
  where
    F: Fn(String) -> String + Send + Sync + 'static,
  {
    let instance: Arc<dyn Mapping<String>> = Arc::new(f);
    Candidate::new(name, priority, instance)
  }

  #[test]
  fn empty_provider_list_is_invalid() {
    let result = CompositeProvider::<String>::new(Vec::new(), Vec::new());
    assert!(matches!(result, Err(LocatorError::InvalidArgument(_))));
    assert!(CompositeFactory::<String>::new(Vec::new(), Vec::new()).is_err());
    assert!(CompositeContainer::<String>::new(Vec::new(), Vec::new()).is_err());
  }

  #[test]
  fn only_first_provider_is_used_and_mappings_apply_in_order() {
    let composite = CompositeProvider::new(
      vec![
        provider("World", 0, || "World".to_string()),
        provider("Unused", -1, || unreachable!("only the first provider is evaluated")),
      ],
      vec![
        mapping("Salutation", -1, |s| format!("Hello {}!", s)),
        mapping("Smalltalk", 0, |s| s + " How do you do?"),
      ],
    )
    .unwrap();
    assert_eq!(composite.evaluate(), "Hello World! How do you do?");
  }

  #[test]
  fn snapshots_do_not_alias_internal_lists() {
    let composite =
      CompositeProvider::new(vec![provider("A", 0, || "a".into())], Vec::new()).unwrap();
    let mut snapshot = composite.providers();
    snapshot.clear();
    snapshot.push(provider("Intruder", 100, || "x".into()));
    assert_eq!(composite.providers().len(), 1);
    assert_eq!(composite.chosen().implementation(), "A");
    assert!(composite.mappings().is_empty());
  }

  #[test]
  fn factory_evaluates_on_every_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = CompositeFactory::new(
      vec![provider("Counting", 0, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        "product".to_string()
      })],
      Vec::new(),
    )
    .unwrap();
    for _ in 0..5 {
      assert_eq!(factory.get(), "product");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 5);
  }

  #[test]
  fn container_evaluates_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let container = CompositeContainer::new(
      vec![provider("Counting", 0, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        "product".to_string()
      })],
      vec![mapping("Upper", 0, |s| s.to_uppercase())],
    )
    .unwrap();
    assert!(!container.is_populated());
    assert!(container.cached().is_none());

    let first: *const String = container.get();
    let second: *const String = container.get();
    assert_eq!(first, second);
    assert_eq!(container.cached().map(String::as_str), Some("PRODUCT"));
    assert_eq!(container.provide(), "PRODUCT");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn debug_lists_implementations() {
    let factory = CompositeFactory::new(
      vec![provider("World", -1, || "World".into())],
      vec![mapping("Smalltalk", 0, |s| s)],
    )
    .unwrap();
    assert_eq!(
      format!("{:?}", factory),
      "CompositeFactory { providers: [World@-1], mappings: [Smalltalk@0] }"
    );
  }
}
