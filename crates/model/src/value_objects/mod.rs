//! Value objects - Immutable objects defined by their attributes

mod value_object;

mod level;
mod version;

pub use level::Level;
pub use version::{Version, VersionType};
