//! The `Locator`: resolves capabilities into composite providers.

use crate::composite::{CompositeContainer, CompositeFactory, CompositeProvider};
use crate::config::LocatorConfig;
use crate::core::{Candidate, Capability, Mapping, MappingRole, Provider, ProviderRole};
use crate::enumerator::Enumerator;
use crate::error::{LocatorError, Result};
use crate::registry::Registry;
use crate::resolver::{order_mappings, order_providers, ProviderOrder};
use parking_lot::RwLock;

/// Creates factories and containers of products.
///
/// Resolving a capability `C` is done in several steps:
///
/// 1. If the configuration overrides `C`, the named implementation is
///    instantiated through the enumerator. It is chosen no matter what
///    priorities the enumerated candidates declare.
/// 2. All candidates for `C` are enumerated and ordered by descending priority.
///    If nothing was found and there is no override, resolution fails with
///    [`LocatorError::ServiceConfiguration`].
/// 3. If a mapping capability `M` is requested, its candidates are enumerated
///    and ordered by ascending priority. No mappings is fine.
/// 4. The ordered lists are handed to a [`CompositeFactory`] or a
///    [`CompositeContainer`].
///
/// A locator keeps nothing between requests: every call enumerates again.
pub struct Locator<E = Registry> {
  enumerator: E,
  config: RwLock<LocatorConfig>,
}

impl Default for Locator<Registry> {
  fn default() -> Self {
    Self::new(Registry)
  }
}

impl<E: Enumerator> Locator<E> {
  /// Creates a locator with no overrides.
  pub fn new(enumerator: E) -> Self {
    Self::with_config(enumerator, LocatorConfig::default())
  }

  pub fn with_config(enumerator: E, config: LocatorConfig) -> Self {
    Self {
      enumerator,
      config: RwLock::new(config),
    }
  }

  pub fn enumerator(&self) -> &E {
    &self.enumerator
  }

  /// A copy of the current configuration.
  pub fn config(&self) -> LocatorConfig {
    self.config.read().clone()
  }

  /// Forces `implementation` for `C` on subsequent requests.
  pub fn set_override<C: Capability>(&self, implementation: impl Into<String>) {
    self
      .config
      .write()
      .overrides
      .insert(C::NAME.to_owned(), implementation.into());
  }

  /// Removes the override for `C`, returning the implementation it named.
  pub fn clear_override<C: Capability>(&self) -> Option<String> {
    self.config.write().overrides.remove(C::NAME)
  }

  // --- Resolution ---

  /// Resolves the provider candidates for `C` in resolution order.
  ///
  /// The first candidate is the one composites use. An ambiguity among the
  /// enumerated candidates is logged as a warning and kept in the result.
  pub fn resolve_providers<C>(&self) -> Result<ProviderOrder<dyn Provider<C::Product>>>
  where
    C: Capability<Role = ProviderRole>,
  {
    let forced = self.config.read().override_for(C::NAME).map(str::to_owned);
    let forced = match forced {
      Some(name) => Some(self.enumerator.instantiate::<C>(&name)?.ok_or_else(|| {
        LocatorError::configuration(
          C::NAME,
          format!("override names unknown implementation '{}'", name),
        )
      })?),
      None => None,
    };

    let mut order = order_providers(C::NAME, self.enumerator.enumerate::<C>()?);
    if let Some(ambiguity) = order.ambiguity() {
      tracing::warn!(
        capability = C::NAME,
        priority = ambiguity.priority,
        implementations = ?ambiguity.implementations,
        overridden = forced.is_some(),
        "Ambiguous provider priority, choosing the first enumerated implementation."
      );
    }
    if let Some(candidate) = forced {
      order = order.with_override(candidate);
    }

    if order.is_empty() {
      return Err(LocatorError::configuration(C::NAME, "no service located"));
    }
    Ok(order)
  }

  /// Resolves the mapping candidates for `M` in application order.
  pub fn resolve_mappings<M>(&self) -> Result<Vec<Candidate<dyn Mapping<M::Product>>>>
  where
    M: Capability<Role = MappingRole>,
  {
    Ok(order_mappings(self.enumerator.enumerate::<M>()?))
  }

  fn compose<C>(
    &self,
    providers: ProviderOrder<dyn Provider<C::Product>>,
    mappings: Vec<Candidate<dyn Mapping<C::Product>>>,
  ) -> Result<CompositeProvider<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
  {
    let composite = CompositeProvider::new(providers.into_candidates(), mappings)?;
    tracing::debug!(
      capability = C::NAME,
      chosen = composite.chosen().implementation(),
      priority = composite.chosen().priority(),
      mappings = ?composite.mapping_slice(),
      "Located service."
    );
    Ok(composite)
  }

  /// Returns a composite provider for `C` without mappings.
  pub fn provider<C>(&self) -> Result<CompositeProvider<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
  {
    let providers = self.resolve_providers::<C>()?;
    self.compose::<C>(providers, Vec::new())
  }

  /// Returns a composite provider for `C` whose products run through the
  /// mappings of `M`.
  ///
  /// Providers are resolved first, so no mapping is instantiated when `C`
  /// cannot be located.
  pub fn provider_with<C, M>(&self) -> Result<CompositeProvider<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
    M: Capability<Role = MappingRole, Product = C::Product>,
  {
    let providers = self.resolve_providers::<C>()?;
    let mappings = self.resolve_mappings::<M>()?;
    self.compose::<C>(providers, mappings)
  }

  /// Returns a factory for `C`: a new product on every call.
  pub fn factory<C>(&self) -> Result<CompositeFactory<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
  {
    self.provider::<C>().map(CompositeFactory::from)
  }

  pub fn factory_with<C, M>(&self) -> Result<CompositeFactory<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
    M: Capability<Role = MappingRole, Product = C::Product>,
  {
    self.provider_with::<C, M>().map(CompositeFactory::from)
  }

  /// Returns a container for `C`: one product, created on first access.
  pub fn container<C>(&self) -> Result<CompositeContainer<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
  {
    self.provider::<C>().map(CompositeContainer::from)
  }

  pub fn container_with<C, M>(&self) -> Result<CompositeContainer<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
    M: Capability<Role = MappingRole, Product = C::Product>,
  {
    self.provider_with::<C, M>().map(CompositeContainer::from)
  }

  /// Returns a single-threaded container for `C`.
  #[cfg(feature = "local")]
  pub fn local_container<C>(&self) -> Result<crate::local::LocalContainer<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
  {
    self.provider::<C>().map(crate::local::LocalContainer::from)
  }

  #[cfg(feature = "local")]
  pub fn local_container_with<C, M>(&self) -> Result<crate::local::LocalContainer<C::Product>>
  where
    C: Capability<Role = ProviderRole>,
    M: Capability<Role = MappingRole, Product = C::Product>,
  {
    self.provider_with::<C, M>().map(crate::local::LocalContainer::from)
  }
}
