//! Level value object

use serde::{Deserialize, Serialize};

use super::value_object::define_value_object;
use crate::error::ModelError;

define_value_object!(
    /// A non-negative level (character level, building tier, skill rank...).
    ///
    /// Immutable: [`Level::add`] returns a new level.
    #[derive(Serialize, Deserialize)]
    #[serde(try_from = "i32", into = "i32")]
    Level
);

impl Level {
    /// Level 0.
    pub const ZERO: Level = Level(0);

    /// Level 1.
    pub const ONE: Level = Level(1);

    /// Create a validated level.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if `level` is negative.
    pub fn new(level: i32) -> Result<Self, ModelError> {
        if level < 0 {
            return Err(ModelError::validation(format!(
                "Level must not be negative, got {}",
                level
            )));
        }
        Ok(Self(level))
    }

    /// Create a new level from this one plus `to_add`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if the sum is negative or overflows.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, to_add: i32) -> Result<Self, ModelError> {
        let sum = self.0.checked_add(to_add).ok_or_else(|| {
            ModelError::validation(format!("Level overflow: {} + {}", self.0, to_add))
        })?;
        Self::new(sum)
    }

    pub fn is_not_zero(&self) -> bool {
        self.0 > 0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i32> for Level {
    type Error = ModelError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}
