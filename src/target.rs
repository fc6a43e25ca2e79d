//! Fixture target: which artifact of a test a path addresses.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of artifact a fixture file holds.
///
/// The rendered name is the last segment of every fixture file name, so
/// the strings returned by [`Target::as_str`] are part of the on-disk
/// contract and must not change.
///
/// # Examples
///
/// ```
/// use golden::Target;
///
/// assert_eq!(Target::Golden.to_string(), "golden");
/// assert_eq!("input".parse::<Target>().unwrap(), Target::Input);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Expected output of a test.
    #[default]
    Golden,
    /// Input data provided to a test.
    Input,
}

impl Target {
    /// All targets in declaration order.
    pub const ALL: [Target; 2] = [Target::Golden, Target::Input];

    /// Returns the name used as the file name suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Golden => "golden",
            Target::Input => "input",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a raw value does not name a known target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported target: {0}")]
pub struct UnsupportedTarget(pub u8);

impl TryFrom<u8> for Target {
    type Error = UnsupportedTarget;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Target::Golden),
            1 => Ok(Target::Input),
            other => Err(UnsupportedTarget(other)),
        }
    }
}

/// Error returned when parsing an unknown target name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid target '{0}': expected 'golden' or 'input'")]
pub struct ParseTargetError(String);

impl FromStr for Target {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| ParseTargetError(s.to_string()))
    }
}
