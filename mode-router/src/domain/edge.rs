//! Edge types.
//!
//! An edge in the multigraph is identified by its endpoints plus a key that
//! distinguishes parallel edges, and carries a bag of optional attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cost, Mode};

/// Distinguishes parallel edges between the same ordered pair of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeKey(pub u32);

impl EdgeKey {
    /// Largest possible key.
    pub const MAX: EdgeKey = EdgeKey(u32::MAX);

    /// Returns the next key in sequence, or `None` after `EdgeKey::MAX`.
    pub fn next(self) -> Option<EdgeKey> {
        self.0.checked_add(1).map(EdgeKey)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one edge of a multigraph.
///
/// Displays as `from-to-key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeId<N> {
    pub from: N,
    pub to: N,
    pub key: EdgeKey,
}

impl<N> EdgeId<N> {
    /// Creates a new edge id.
    pub fn new(from: N, to: N, key: EdgeKey) -> Self {
        Self { from, to, key }
    }
}

impl<N: fmt::Display> fmt::Display for EdgeId<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.from, self.to, self.key)
    }
}

/// Attributes of a directed edge.
///
/// Every field is optional. The cost model decides which ones it reads and
/// falls back to its defaults when they are missing. Costs are validated on
/// construction, so no attribute here can be negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    /// Travel mode used on this edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    /// Base traversal cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Cost>,

    /// Length in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Cost>,

    /// Speed limit in km/h.
    #[serde(default, rename = "maxspeed", skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<Cost>,

    /// Whether the underlying road is one-way.
    #[serde(default)]
    pub oneway: bool,

    /// Road class, e.g. `residential` or `footway`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highway: Option<String>,
}

impl EdgeAttrs {
    /// Creates attributes with a mode and a base weight.
    pub fn new(mode: Mode, weight: Cost) -> Self {
        Self {
            mode: Some(mode),
            weight: Some(weight),
            ..Self::default()
        }
    }

    /// Sets the length in metres.
    pub fn with_length(mut self, length: Cost) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the speed limit in km/h.
    pub fn with_max_speed(mut self, max_speed: Cost) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Marks the edge as one-way.
    pub fn with_oneway(mut self, oneway: bool) -> Self {
        self.oneway = oneway;
        self
    }

    /// Sets the road class.
    pub fn with_highway(mut self, highway: impl Into<String>) -> Self {
        self.highway = Some(highway.into());
        self
    }
}
