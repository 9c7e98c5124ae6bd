//! Locator configuration: forced implementation choices per capability.
//!
//! Overrides map a [`Capability::NAME`](crate::Capability::NAME) to the name
//! of the implementation that must be used for it, bypassing priorities.
//!
//! ```yaml
//! overrides:
//!   my_app::Greeting: my_app::Christian
//!   my_app::Storage: InMemory
//! ```
//!
//! The same table can come from the `FIBRE_LOCATOR_OVERRIDES` environment
//! variable as comma-separated `capability=implementation` pairs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Environment variable read by [`LocatorConfig::from_env`].
pub const OVERRIDES_ENV: &str = "FIBRE_LOCATOR_OVERRIDES";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read configuration file '{path}': {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse configuration: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("Invalid override entry '{entry}': expected 'capability=implementation'")]
  InvalidOverride { entry: String },

  #[error("Environment variable {var} is not valid unicode")]
  NotUnicode { var: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
  /// Capability name to implementation name.
  pub overrides: BTreeMap<String, String>,
}

impl LocatorConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_override(
    mut self,
    capability: impl Into<String>,
    implementation: impl Into<String>,
  ) -> Self {
    self.overrides.insert(capability.into(), implementation.into());
    self
  }

  pub fn override_for(&self, capability: &str) -> Option<&str> {
    self.overrides.get(capability).map(String::as_str)
  }

  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_yaml_str(&contents)
  }

  /// Reads overrides from [`OVERRIDES_ENV`]. An unset variable yields an empty
  /// configuration.
  pub fn from_env() -> Result<Self, ConfigError> {
    match std::env::var(OVERRIDES_ENV) {
      Ok(value) => Self::from_override_list(&value),
      Err(std::env::VarError::NotPresent) => Ok(Self::default()),
      Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
        var: OVERRIDES_ENV,
      }),
    }
  }

  /// Parses `capability=implementation` pairs separated by commas. Blank
  /// entries are skipped; a later pair for the same capability wins.
  pub fn from_override_list(list: &str) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
      let (capability, implementation) = entry
        .split_once('=')
        .map(|(c, i)| (c.trim(), i.trim()))
        .filter(|(c, i)| !c.is_empty() && !i.is_empty())
        .ok_or_else(|| ConfigError::InvalidOverride {
          entry: entry.to_owned(),
        })?;
      config
        .overrides
        .insert(capability.to_owned(), implementation.to_owned());
    }
    Ok(config)
  }

  /// Layers `other` over `self`; entries of `other` win.
  pub fn merge(mut self, other: LocatorConfig) -> Self {
    self.overrides.extend(other.overrides);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::io::Write;

  #[test]
  fn parses_yaml_overrides() {
    let config = LocatorConfig::from_yaml_str(
      "overrides:\n  app::Greeting: app::Christian\n  app::Storage: InMemory\n",
    )
    .unwrap();
    assert_eq!(config.override_for("app::Greeting"), Some("app::Christian"));
    assert_eq!(config.override_for("app::Storage"), Some("InMemory"));
    assert_eq!(config.override_for("app::Other"), None);
  }

  #[test]
  fn empty_yaml_document_is_default() {
    assert_eq!(LocatorConfig::from_yaml_str("{}").unwrap(), LocatorConfig::default());
  }

  #[test]
  fn unknown_yaml_fields_are_rejected() {
    let err = LocatorConfig::from_yaml_str("overides: {}").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "overrides:\n  a::B: C").unwrap();
    let config = LocatorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.override_for("a::B"), Some("C"));
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let err = LocatorConfig::from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn parses_override_list() {
    let config =
      LocatorConfig::from_override_list(" a::Cap = Impl , ,b::Cap=Other,a::Cap=Last").unwrap();
    assert_eq!(config.override_for("a::Cap"), Some("Last"));
    assert_eq!(config.override_for("b::Cap"), Some("Other"));
    assert_eq!(config.overrides.len(), 2);
  }

  #[test]
  fn rejects_malformed_override_entry() {
    for bad in ["a::Cap", "=Impl", "a::Cap="] {
      let err = LocatorConfig::from_override_list(bad).unwrap_err();
      assert!(
        matches!(err, ConfigError::InvalidOverride { ref entry } if entry == bad),
        "{bad}"
      );
    }
  }

  #[test]
  fn merge_prefers_later_layer() {
    let base = LocatorConfig::new().with_override("x", "1").with_override("y", "1");
    let merged = base.merge(LocatorConfig::new().with_override("y", "2"));
    assert_eq!(merged.override_for("x"), Some("1"));
    assert_eq!(merged.override_for("y"), Some("2"));
  }
}
