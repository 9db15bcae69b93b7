//! Search configuration for the planner.

use std::time::Duration;

use serde::Deserialize;

/// Configuration parameters for path search.
///
/// Both limits are off by default: on finite graphs with non-negative costs
/// the search always terminates, so limits only matter for very large graphs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of states to expand.
    /// The search gives up with an incomplete result when this is reached.
    pub max_expansions: Option<usize>,

    /// Maximum wall-clock time to spend searching (milliseconds).
    pub time_budget_ms: Option<u64>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_expansions: Option<usize>, time_budget_ms: Option<u64>) -> Self {
        Self {
            max_expansions,
            time_budget_ms,
        }
    }

    /// Limit the number of expanded states.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Limit the search time.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(u64::try_from(budget.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the time budget as a Duration.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
