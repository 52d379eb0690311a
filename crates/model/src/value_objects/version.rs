//! Version value object
//!
//! An immutable four-part version number with a release stage, rendered as
//! `"<STAGE> <major>.<minor>.<sub>_<rev>"` (e.g. `"RELEASE 1.2.3_5"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Release stage of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionType {
    Alpha,
    Beta,
    Release,
}

impl VersionType {
    /// Stable integer code: 0 for alpha, 1 for beta, 2 for release.
    pub fn code(&self) -> i32 {
        match self {
            Self::Alpha => 0,
            Self::Beta => 1,
            Self::Release => 2,
        }
    }

    /// Reverse lookup of [`VersionType::code`].
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` for any code other than 0, 1 or 2.
    pub fn from_code(code: i32) -> Result<Self, ModelError> {
        match code {
            0 => Ok(Self::Alpha),
            1 => Ok(Self::Beta),
            2 => Ok(Self::Release),
            _ => Err(ModelError::validation(format!(
                "Unknown version type code: {}",
                code
            ))),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "ALPHA",
            Self::Beta => "BETA",
            Self::Release => "RELEASE",
        }
    }
}

impl TryFrom<i32> for VersionType {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALPHA" => Ok(Self::Alpha),
            "BETA" => Ok(Self::Beta),
            "RELEASE" => Ok(Self::Release),
            _ => Err(ModelError::parse(format!("Unknown version type: {}", s))),
        }
    }
}

/// A validated, immutable version number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    version_type: VersionType,
    major: u32,
    minor: u32,
    sub: u32,
    rev: u32,
}

impl Version {
    /// Create a version.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Validation` if any component is negative.
    pub fn new(
        version_type: VersionType,
        major: i32,
        minor: i32,
        sub: i32,
        rev: i32,
    ) -> Result<Self, ModelError> {
        let invalid = || {
            ModelError::validation(format!(
                "Invalid version value: major:{}, minor:{}, sub:{}, rev:{}",
                major, minor, sub, rev
            ))
        };
        Ok(Self {
            version_type,
            major: u32::try_from(major).map_err(|_| invalid())?,
            minor: u32::try_from(minor).map_err(|_| invalid())?,
            sub: u32::try_from(sub).map_err(|_| invalid())?,
            rev: u32::try_from(rev).map_err(|_| invalid())?,
        })
    }

    pub fn alpha(major: i32, minor: i32, sub: i32, rev: i32) -> Result<Self, ModelError> {
        Self::new(VersionType::Alpha, major, minor, sub, rev)
    }

    pub fn beta(major: i32, minor: i32, sub: i32, rev: i32) -> Result<Self, ModelError> {
        Self::new(VersionType::Beta, major, minor, sub, rev)
    }

    pub fn release(major: i32, minor: i32, sub: i32, rev: i32) -> Result<Self, ModelError> {
        Self::new(VersionType::Release, major, minor, sub, rev)
    }

    pub fn version_type(&self) -> VersionType {
        self.version_type
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn sub(&self) -> u32 {
        self.sub
    }

    /// Revision number.
    pub fn rev(&self) -> u32 {
        self.rev
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}.{}_{}",
            self.version_type, self.major, self.minor, self.sub, self.rev
        )
    }
}

impl FromStr for Version {
    type Err = ModelError;

    /// Parses the `Display` form, e.g. `"BETA 0.4.1_12"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ModelError::parse(format!("Malformed version: {}", s));

        let (stage, numbers) = s.trim().split_once(' ').ok_or_else(malformed)?;
        let (numbers, rev) = numbers.split_once('_').ok_or_else(malformed)?;
        let mut parts = numbers.split('.');
        let (Some(major), Some(minor), Some(sub), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let component = |part: &str| part.parse::<i32>().map_err(|_| malformed());
        Self::new(
            stage.parse()?,
            component(major)?,
            component(minor)?,
            component(sub)?,
            component(rev)?,
        )
    }
}
