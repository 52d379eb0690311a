//! WrldBldr Model
//!
//! Identity and value types shared by the game services:
//! - Interned identities ([`EntityId`], [`PlayerId`], [`WorldId`], [`ActionId`])
//!   resolved through [`IdRegistries`]
//! - Immutable value objects ([`Level`], [`Version`])

pub mod error;
pub mod ids;
pub mod registry;
pub mod settings;
pub mod value_objects;

pub use error::ModelError;

// Re-export ID types
pub use ids::{
    ActionId, ActionKind, EntityId, EntityKind, Id, IdKind, PlayerId, PlayerKind, RawId, WorldId,
    WorldKind,
};

pub use registry::{IdRegistries, IdRegistry};
pub use settings::RegistrySettings;
pub use value_objects::{Level, Version, VersionType};
