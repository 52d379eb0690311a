//! Identity registry settings
//!
//! Sizing knobs for the concurrent maps behind the identity registries. The
//! process-wide registries read them from the environment:
//! - `WRLDBLDR_ID_REGISTRY_CAPACITY` - initial capacity of each registry
//! - `WRLDBLDR_ID_REGISTRY_SHARDS` - shard count of each registry

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Sizing settings for an identity registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Number of ids each registry can hold before reallocating
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Number of lock shards, must be a power of two greater than 1
    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,
}

fn default_initial_capacity() -> usize { 64 }
fn default_shard_amount() -> usize { 16 }

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            shard_amount: default_shard_amount(),
        }
    }
}

impl RegistrySettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            initial_capacity: env_or("WRLDBLDR_ID_REGISTRY_CAPACITY", defaults.initial_capacity),
            shard_amount: env_or("WRLDBLDR_ID_REGISTRY_SHARDS", defaults.shard_amount),
        }
    }

    /// Check that the settings can size a registry.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if the shard amount is not a power of
    /// two greater than 1.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.shard_amount <= 1 || !self.shard_amount.is_power_of_two() {
            return Err(ModelError::validation(format!(
                "Registry shard amount must be a power of two greater than 1, got {}",
                self.shard_amount
            )));
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
