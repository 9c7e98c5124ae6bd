//! # Fibre Locator
//!
//! A priority-driven service locator for Rust.
//!
//! Fibre Locator discovers implementations of a declared *capability*, picks or
//! combines them by priority, and hands the result back as a factory (a fresh
//! product on every call) or a container (one product, created on first use).
//! Implementations register themselves at link time, so adding a crate to the
//! build is enough to make its implementations locatable.
//!
//! ## Core Concepts
//!
//! - **Capability**: a marker type naming something implementations fulfill,
//!   declared with [`capability!`]. A capability either *provides* a product
//!   ([`Provider`]) or *maps* one ([`Mapping`]).
//! - **Registration**: [`register!`] ties an implementation to a capability
//!   with a priority. [`Catalog`] does the same at runtime.
//! - **Resolution**: the [`Locator`] picks the provider with the highest
//!   priority and orders mappings by ascending priority, so the
//!   highest-priority mapping is applied last.
//! - **Overrides**: a [`LocatorConfig`] can force an implementation for a
//!   capability regardless of priorities.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{capability, register, Locator, Mapping, Provider, Registry};
//!
//! capability! { Subject: Provider<String> }
//! capability! { Decoration: Mapping<String> }
//!
//! #[derive(Default)]
//! struct World;
//! impl Provider<String> for World {
//!   fn provide(&self) -> String { "World".to_string() }
//! }
//!
//! #[derive(Default)]
//! struct Salutation;
//! impl Mapping<String> for Salutation {
//!   fn map(&self, text: String) -> String { format!("Hello {}!", text) }
//! }
//!
//! #[derive(Default)]
//! struct Smalltalk;
//! impl Mapping<String> for Smalltalk {
//!   fn map(&self, text: String) -> String { text + " How do you do?" }
//! }
//!
//! register!(Subject => World);
//! register!(Decoration => Salutation, priority = -1);
//! register!(Decoration => Smalltalk);
//!
//! fn main() {
//!   let locator = Locator::new(Registry);
//!   let factory = locator.factory_with::<Subject, Decoration>().unwrap();
//!   assert_eq!(factory.get(), "Hello World! How do you do?");
//! }
//! ```

mod catalog;
mod composite;
pub mod config;
mod core;
mod enumerator;
mod error;
mod global;
#[cfg(feature = "local")]
mod local;
mod locator;
mod macros;
pub mod registry;
pub mod resolver;

pub use catalog::Catalog;
pub use composite::{CompositeContainer, CompositeFactory, CompositeProvider};
pub use config::{ConfigError, LocatorConfig};
pub use crate::core::{
  Candidate, Capability, Mapping, MappingRole, Modifier, Provider, ProviderRole, Role, ServiceOf,
};
pub use enumerator::Enumerator;
pub use error::{BoxError, LocatorError, Result};
pub use global::global;
#[cfg(feature = "local")]
pub use local::LocalContainer;
pub use locator::Locator;
pub use registry::{Registration, Registry};
pub use resolver::{Ambiguity, ProviderOrder};

#[doc(hidden)]
pub mod __private {
  pub use inventory;
}
