//! Arena configuration, stored as RON.
//!
//! ```text
//! (
//!     total_size: 1500,
//!     policy: BestFit,
//!     log_level: Debug,
//! )
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, logger::LogLevel, policy::Policy};

pub const DEFAULT_TOTAL_SIZE: usize = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
  /// Size of the address range `[0, total_size)`.
  #[serde(default = "default_total_size")]
  pub total_size: usize,
  #[serde(default)]
  pub policy: Policy,
  #[serde(default)]
  pub log_level: LogLevel,
}

fn default_total_size() -> usize {
  DEFAULT_TOTAL_SIZE
}

impl Default for ArenaConfig {
  fn default() -> Self {
    Self {
      total_size: DEFAULT_TOTAL_SIZE,
      policy: Policy::default(),
      log_level: LogLevel::default(),
    }
  }
}

impl ArenaConfig {
  pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
    Ok(ron::from_str(source)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path)?;
    Self::from_ron(&content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ArenaConfig::default();

    assert_eq!(config.total_size, 1500);
    assert_eq!(config.policy, Policy::FirstFit);
    assert_eq!(config.log_level, LogLevel::Info);
  }

  #[test]
  fn test_partial_config() {
    let config = ArenaConfig::from_ron("(policy: WorstFit)").unwrap();

    assert_eq!(config.total_size, DEFAULT_TOTAL_SIZE);
    assert_eq!(config.policy, Policy::WorstFit);
  }

  #[test]
  fn test_full_config() {
    let config = ArenaConfig::from_ron("(total_size: 4096, policy: BestFit, log_level: Debug)").unwrap();

    assert_eq!(config, ArenaConfig {
      total_size: 4096,
      policy: Policy::BestFit,
      log_level: LogLevel::Debug,
    });
  }

  #[test]
  fn test_bad_config() {
    assert!(matches!(ArenaConfig::from_ron("(policy: NextFit)"), Err(ConfigError::Parse(_))));
    assert!(matches!(ArenaConfig::load("/nonexistent/fitarena.ron"), Err(ConfigError::Io(_))));
  }
}
