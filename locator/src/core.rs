//! Core data structures of the locator: capabilities, roles, and candidates.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Produces a product. The base of every composite.
///
/// Any `Fn() -> P + Send + Sync` closure is a provider.
pub trait Provider<P>: Send + Sync {
  fn provide(&self) -> P;
}

impl<P, F> Provider<P> for F
where
  F: Fn() -> P + Send + Sync,
{
  fn provide(&self) -> P {
    self()
  }
}

/// Transforms a product. Mappings are chained after the base provider.
///
/// Any `Fn(P) -> P + Send + Sync` closure is a mapping.
pub trait Mapping<P>: Send + Sync {
  fn map(&self, product: P) -> P;
}

impl<P, F> Mapping<P> for F
where
  F: Fn(P) -> P + Send + Sync,
{
  fn map(&self, product: P) -> P {
    self(product)
  }
}

/// Adapts an in-place modification into a [`Mapping`].
///
/// ```
/// use fibre_locator::{Mapping, Modifier};
///
/// let trim = Modifier::new(|s: &mut String| s.truncate(5));
/// assert_eq!(trim.map("Hello World".to_string()), "Hello");
/// ```
pub struct Modifier<F, P> {
  modify: F,
  _product: PhantomData<fn(P) -> P>,
}

impl<F, P> Modifier<F, P>
where
  F: Fn(&mut P) + Send + Sync,
{
  pub fn new(modify: F) -> Self {
    Self {
      modify,
      _product: PhantomData,
    }
  }
}

impl<F, P> Mapping<P> for Modifier<F, P>
where
  F: Fn(&mut P) + Send + Sync,
{
  fn map(&self, mut product: P) -> P {
    (self.modify)(&mut product);
    product
  }
}

/// Selects the service object type a capability resolves to.
pub trait Role<P: 'static>: 'static {
  type Service: ?Sized + Send + Sync + 'static;
}

/// Role of capabilities whose implementations produce a product.
pub enum ProviderRole {}

/// Role of capabilities whose implementations transform a product.
pub enum MappingRole {}

impl<P: 'static> Role<P> for ProviderRole {
  type Service = dyn Provider<P>;
}

impl<P: 'static> Role<P> for MappingRole {
  type Service = dyn Mapping<P>;
}

/// A locatable capability.
///
/// A capability is a marker type which names something an implementation can
/// fulfill. It is never instantiated; it only keys lookups. Use the
/// [`capability!`](crate::capability) macro to declare one.
pub trait Capability: 'static {
  /// Fully-qualified name. Keys both the registry and the override table.
  const NAME: &'static str;
  /// The product this capability provides or maps.
  type Product: 'static;
  /// Either [`ProviderRole`] or [`MappingRole`].
  type Role: Role<Self::Product>;
}

/// The service object type of capability `C`, e.g. `dyn Provider<String>`.
pub type ServiceOf<C> = <<C as Capability>::Role as Role<<C as Capability>::Product>>::Service;

/// An instance eligible for selection, together with its priority.
pub struct Candidate<S: ?Sized> {
  instance: Arc<S>,
  priority: i32,
  implementation: &'static str,
}

impl<S: ?Sized> Candidate<S> {
  pub fn new(implementation: &'static str, priority: i32, instance: Arc<S>) -> Self {
    Self {
      instance,
      priority,
      implementation,
    }
  }

  pub fn instance(&self) -> &Arc<S> {
    &self.instance
  }

  pub fn priority(&self) -> i32 {
    self.priority
  }

  /// Name of the concrete implementation, as given at registration.
  pub fn implementation(&self) -> &'static str {
    self.implementation
  }

  pub fn into_instance(self) -> Arc<S> {
    self.instance
  }
}

// Manual impl: `S` itself need not be `Clone`, only the `Arc` is cloned.
impl<S: ?Sized> Clone for Candidate<S> {
  fn clone(&self) -> Self {
    Self {
      instance: Arc::clone(&self.instance),
      priority: self.priority,
      implementation: self.implementation,
    }
  }
}

impl<S: ?Sized> fmt::Debug for Candidate<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.implementation, self.priority)
  }
}
