//! Priority resolution for provider and mapping candidates.
//!
//! Providers are ordered by descending priority: the first element is chosen.
//! Mappings are ordered by ascending priority: the last element gets the final
//! say when the chain is applied. Both sorts are stable, so candidates of equal
//! priority keep the order in which the enumerator produced them.

use crate::core::Candidate;
use std::cmp::Reverse;
use std::fmt;

/// Two or more distinct implementations tie at the highest provider priority.
///
/// Resolution still proceeds (the first enumerated one wins), so this is a
/// warning, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
  pub capability: String,
  pub priority: i32,
  /// Tied implementations in enumeration order; the first one was chosen.
  pub implementations: Vec<&'static str>,
}

impl fmt::Display for Ambiguity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "ambiguous providers for '{}' at priority {}: {}",
      self.capability,
      self.priority,
      self.implementations.join(", ")
    )?;
    if let Some(first) = self.implementations.first() {
      write!(f, " (choosing {})", first)?;
    }
    Ok(())
  }
}

/// Provider candidates in resolution order.
pub struct ProviderOrder<S: ?Sized> {
  candidates: Vec<Candidate<S>>,
  ambiguity: Option<Ambiguity>,
  overridden: bool,
}

impl<S: ?Sized> ProviderOrder<S> {
  /// Puts an override candidate in front of the ordered list. It outranks
  /// every enumerated candidate regardless of its declared priority.
  pub fn with_override(mut self, candidate: Candidate<S>) -> Self {
    self.candidates.insert(0, candidate);
    self.overridden = true;
    self
  }

  /// The chosen candidate, if any.
  pub fn chosen(&self) -> Option<&Candidate<S>> {
    self.candidates.first()
  }

  pub fn candidates(&self) -> &[Candidate<S>] {
    &self.candidates
  }

  /// Ambiguity among the enumerated candidates. Reported even when an override
  /// makes it moot.
  pub fn ambiguity(&self) -> Option<&Ambiguity> {
    self.ambiguity.as_ref()
  }

  pub fn is_overridden(&self) -> bool {
    self.overridden
  }

  pub fn is_empty(&self) -> bool {
    self.candidates.is_empty()
  }

  pub fn into_candidates(self) -> Vec<Candidate<S>> {
    self.candidates
  }
}

/// Orders provider candidates by descending priority.
pub fn order_providers<S: ?Sized>(
  capability: &str,
  mut candidates: Vec<Candidate<S>>,
) -> ProviderOrder<S> {
  candidates.sort_by_key(|c| Reverse(c.priority()));
  let ambiguity = detect_ambiguity(capability, &candidates);
  ProviderOrder {
    candidates,
    ambiguity,
    overridden: false,
  }
}

/// Orders mapping candidates by ascending priority.
pub fn order_mappings<S: ?Sized>(mut candidates: Vec<Candidate<S>>) -> Vec<Candidate<S>> {
  candidates.sort_by_key(|c| c.priority());
  candidates
}

// Expects `sorted` in descending priority order. Ties between registrations of
// the same implementation do not count.
fn detect_ambiguity<S: ?Sized>(capability: &str, sorted: &[Candidate<S>]) -> Option<Ambiguity> {
  let top = sorted.first()?.priority();
  let mut implementations: Vec<&'static str> = Vec::new();
  for candidate in sorted.iter().take_while(|c| c.priority() == top) {
    if !implementations.contains(&candidate.implementation()) {
      implementations.push(candidate.implementation());
    }
  }
  if implementations.len() < 2 {
    return None;
  }
  Some(Ambiguity {
    capability: capability.to_owned(),
    priority: top,
    implementations,
  })
}
