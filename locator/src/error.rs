use thiserror::Error;

/// Boxed error returned by fallible implementation constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for `fibre_locator`.
#[derive(Debug, Error)]
pub enum LocatorError {
  /// The service configuration for a capability cannot be satisfied. This is
  /// fatal for the request; the locator never falls back to another candidate.
  #[error("Service configuration error for '{capability}': {reason}")]
  ServiceConfiguration {
    capability: String,
    reason: String,
    #[source]
    source: Option<BoxError>,
  },

  /// A composite was constructed in violation of its contract.
  #[error("Invalid argument: {0}")]
  InvalidArgument(String),
}

impl LocatorError {
  pub(crate) fn configuration(capability: &str, reason: impl Into<String>) -> Self {
    LocatorError::ServiceConfiguration {
      capability: capability.to_owned(),
      reason: reason.into(),
      source: None,
    }
  }

  pub(crate) fn instantiation(capability: &str, implementation: &str, source: BoxError) -> Self {
    LocatorError::ServiceConfiguration {
      capability: capability.to_owned(),
      reason: format!("failed to instantiate '{}'", implementation),
      source: Some(source),
    }
  }

  /// Returns `true` for [`LocatorError::ServiceConfiguration`].
  pub fn is_service_configuration(&self) -> bool {
    matches!(self, LocatorError::ServiceConfiguration { .. })
  }
}

/// A specialized `Result` type for `fibre_locator` operations.
pub type Result<T, E = LocatorError> = std::result::Result<T, E>;
