//! Edge and mode-transition costs.
//!
//! The planner never reads edge attributes itself. It asks a `CostModel` for
//! the cost of taking an edge given the mode it arrived with, which is the
//! edge's own cost plus any penalty for switching modes.

mod transition;

pub use transition::{ModePairPenalty, TransitionPenalty};

use serde::Deserialize;

use crate::domain::{Cost, EdgeAttrs, Mode};

/// Edge cost used when the selected attribute is missing.
///
/// This silently affects which path is optimal, so graphs that mix weighted
/// and unweighted edges should set it deliberately.
pub const DEFAULT_EDGE_COST: Cost = Cost::from_units(1);

/// Transition penalty used when none is configured.
pub const DEFAULT_TRANSITION_PENALTY: Cost = Cost::from_units(5);

/// Translates edge attributes and mode switches into costs.
///
/// Implementations must be deterministic and side-effect free. They cannot
/// fail and cannot return a negative cost, which is what the planner's
/// optimality depends on.
pub trait CostModel {
    /// Cost of traversing an edge, ignoring how it was reached.
    fn edge_cost(&self, edge: &EdgeAttrs) -> Cost;

    /// Penalty for entering an edge of `current` mode after `prev`.
    ///
    /// Zero at the start of a path (`prev` is `None`) and when the mode
    /// does not change.
    fn transition_cost(&self, prev: Option<&Mode>, current: Option<&Mode>) -> Cost;

    /// Total cost of taking `edge` after arriving with `prev`.
    fn combined_cost(&self, edge: &EdgeAttrs, prev: Option<&Mode>) -> Cost {
        let edge_cost = self.edge_cost(edge);
        match prev {
            None => edge_cost,
            Some(_) => edge_cost + self.transition_cost(prev, edge.mode.as_ref()),
        }
    }
}

/// Which edge attribute is read as the traversal cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCostSource {
    /// The edge's `weight`.
    #[default]
    Weight,
    /// The edge's `length`, in metres.
    Length,
    /// Seconds to cover `length` at `max_speed`.
    TravelTime,
}

/// The standard cost model.
///
/// # Examples
///
/// ```
/// use mode_router::domain::{Cost, EdgeAttrs, Mode};
/// use mode_router::weighting::{CostModel, Weighting};
///
/// let weighting = Weighting::default(); // penalty 5
/// let walk = Mode::parse("walk").unwrap();
/// let transit = Mode::parse("transit").unwrap();
/// let edge = EdgeAttrs::new(transit, Cost::from(3));
///
/// assert_eq!(weighting.combined_cost(&edge, None), Cost::from(3));
/// assert_eq!(weighting.combined_cost(&edge, Some(&walk)), Cost::from(8));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Weighting {
    /// Attribute read as the edge cost.
    pub edge_cost: EdgeCostSource,

    /// Cost used when that attribute is missing.
    pub default_edge_cost: Cost,

    /// Penalty model for mode switches.
    pub transition: TransitionPenalty,
}

impl Weighting {
    /// Create a weighting with a uniform transition penalty.
    pub fn new(penalty: Cost) -> Self {
        Self {
            transition: TransitionPenalty::Uniform(penalty),
            ..Self::default()
        }
    }

    /// Use a different edge attribute as the cost.
    pub fn with_edge_cost(mut self, source: EdgeCostSource) -> Self {
        self.edge_cost = source;
        self
    }

    /// Use a different fallback edge cost.
    pub fn with_default_edge_cost(mut self, cost: Cost) -> Self {
        self.default_edge_cost = cost;
        self
    }

    /// Use a different transition penalty model.
    pub fn with_transition(mut self, transition: TransitionPenalty) -> Self {
        self.transition = transition;
        self
    }

    fn travel_time(edge: &EdgeAttrs) -> Option<Cost> {
        let length = edge.length?.value();
        let kmh = edge.max_speed?.value();
        if kmh <= 0.0 {
            return None;
        }
        Cost::new(length * 3.6 / kmh).ok()
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Self {
            edge_cost: EdgeCostSource::Weight,
            default_edge_cost: DEFAULT_EDGE_COST,
            transition: TransitionPenalty::default(),
        }
    }
}

impl CostModel for Weighting {
    fn edge_cost(&self, edge: &EdgeAttrs) -> Cost {
        let selected = match self.edge_cost {
            EdgeCostSource::Weight => edge.weight,
            EdgeCostSource::Length => edge.length,
            EdgeCostSource::TravelTime => Self::travel_time(edge),
        };
        selected.unwrap_or(self.default_edge_cost)
    }

    fn transition_cost(&self, prev: Option<&Mode>, current: Option<&Mode>) -> Cost {
        match prev {
            None => Cost::ZERO,
            Some(p) if Some(p) == current => Cost::ZERO,
            Some(p) => self.transition.penalty(p, current),
        }
    }
}
