//! Travel mode labels.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A travel mode attached to an edge, such as `walk` or `transit`.
///
/// Modes are free-form labels, compared exactly after trimming surrounding
/// whitespace. The label is reference-counted because every search state
/// carries a copy of its incoming mode.
///
/// # Examples
///
/// ```
/// use mode_router::domain::Mode;
///
/// let walk = Mode::parse(" walk ").unwrap();
/// assert_eq!(walk.as_str(), "walk");
///
/// assert!(Mode::parse("").is_err());
/// assert!(Mode::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mode(Arc<str>);

impl Mode {
    /// Parse a mode label.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidMode);
        }
        Ok(Mode(Arc::from(trimmed)))
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Mode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Mode::parse(&value)
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.0.to_string()
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({})", self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
