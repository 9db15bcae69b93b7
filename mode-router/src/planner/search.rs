//! Mode-aware shortest path search.
//!
//! Dijkstra's algorithm over `(node, incoming mode)` states. Two arrivals at
//! the same node with different modes are kept apart, since the mode decides
//! whether the next edge pays a transition penalty. The first time a state
//! at the goal node leaves the frontier its cost is optimal, whatever mode
//! it carries.
//!
//! When several routes tie on cost, the one discovered last is returned.
//! The rule is deterministic for a given graph and neighbor order.

use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::domain::{Cost, Route};
use crate::graph::GraphSource;
use crate::weighting::CostModel;

use super::config::SearchConfig;
use super::state::{FrontierEntry, State, StateTable};

/// Error from path search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start node is not in the graph
    #[error("unknown start node: {0}")]
    UnknownStart(String),

    /// Goal node is not in the graph
    #[error("unknown goal node: {0}")]
    UnknownGoal(String),
}

/// Which budget stopped a search early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    /// The configured number of state expansions was used up.
    Expansions(usize),
    /// The configured time budget ran out.
    Time(Duration),
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome<N> {
    /// An optimal route to the goal.
    Found(Route<N>),
    /// The goal cannot be reached from the start.
    Unreachable,
    /// A budget ran out before the goal was settled.
    Incomplete(BudgetLimit),
}

/// Result of path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<N> {
    /// How the search ended.
    pub outcome: PathOutcome<N>,

    /// Number of states expanded during search.
    pub states_expanded: usize,
}

impl<N> SearchResult<N> {
    /// Returns the route, if one was found.
    pub fn route(&self) -> Option<&Route<N>> {
        match &self.outcome {
            PathOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Consumes the result, returning the route if one was found.
    pub fn into_route(self) -> Option<Route<N>> {
        match self.outcome {
            PathOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Returns the node sequence, if a route was found.
    pub fn path(&self) -> Option<&[N]> {
        self.route().map(Route::nodes)
    }

    /// Returns the route cost, or infinity when no route was found.
    pub fn total_cost(&self) -> f64 {
        self.route()
            .map(|r| r.total_cost().value())
            .unwrap_or(f64::INFINITY)
    }

    /// Returns true if a route was found.
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, PathOutcome::Found(_))
    }
}

/// Multi-modal path planner.
pub struct Planner<'a, G: GraphSource, C: CostModel> {
    graph: &'a G,
    cost_model: &'a C,
    config: &'a SearchConfig,
}

impl<'a, G: GraphSource, C: CostModel> Planner<'a, G, C> {
    /// Create a new planner.
    pub fn new(graph: &'a G, cost_model: &'a C, config: &'a SearchConfig) -> Self {
        Self {
            graph,
            cost_model,
            config,
        }
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Unknown endpoints are errors; an unreachable goal is not.
    pub fn find_path(
        &self,
        start: &G::Node,
        goal: &G::Node,
    ) -> Result<SearchResult<G::Node>, SearchError> {
        if !self.graph.contains_node(start) {
            return Err(SearchError::UnknownStart(format!("{start:?}")));
        }
        if !self.graph.contains_node(goal) {
            return Err(SearchError::UnknownGoal(format!("{goal:?}")));
        }

        debug!(?start, ?goal, "Starting path search");

        let started = Instant::now();
        let mut table = StateTable::new();
        let mut frontier = BinaryHeap::new();
        let mut next_seq: u64 = 0;
        let mut states_expanded = 0;

        let root = table.insert_start(State::new(start.clone(), None));
        frontier.push(FrontierEntry {
            cost: Cost::ZERO,
            seq: next_seq,
            state: root,
        });
        next_seq += 1;

        while let Some(entry) = frontier.pop() {
            // Skip entries superseded by a cheaper push of the same state
            if entry.cost > table.best(entry.state) || !table.settle(entry.state) {
                continue;
            }

            let state = table.state(entry.state).clone();

            if &state.node == goal {
                let route = table.route(entry.state);
                debug!(
                    cost = %route.total_cost(),
                    edges = route.edge_count(),
                    mode_switches = route.mode_switches(),
                    states_expanded,
                    states_reached = table.len(),
                    "Path found"
                );
                return Ok(SearchResult {
                    outcome: PathOutcome::Found(route),
                    states_expanded,
                });
            }

            if let Some(limit) = self.budget_exhausted(states_expanded, started) {
                warn!(?limit, states_expanded, "Search budget exhausted");
                return Ok(SearchResult {
                    outcome: PathOutcome::Incomplete(limit),
                    states_expanded,
                });
            }

            states_expanded += 1;
            trace!(
                node = ?state.node,
                mode = ?state.mode,
                cost = %entry.cost,
                "Expanding state"
            );

            for neighbor in self.graph.neighbors(&state.node) {
                // A multigraph may hold several edges to the same neighbor
                for (_, edge) in self.graph.edges_between(&state.node, &neighbor) {
                    let cost = entry.cost + self.cost_model.combined_cost(edge, state.mode.as_ref());
                    let next = State::new(neighbor.clone(), edge.mode.clone());

                    if let Some(id) = table.relax(next, cost, entry.state) {
                        frontier.push(FrontierEntry {
                            cost,
                            seq: next_seq,
                            state: id,
                        });
                        next_seq += 1;
                    }
                }
            }
        }

        debug!(
            states_expanded,
            states_reached = table.len(),
            "Goal unreachable"
        );

        Ok(SearchResult {
            outcome: PathOutcome::Unreachable,
            states_expanded,
        })
    }

    /// Check whether another expansion would exceed a configured budget.
    fn budget_exhausted(&self, states_expanded: usize, started: Instant) -> Option<BudgetLimit> {
        if let Some(max) = self.config.max_expansions {
            if states_expanded >= max {
                return Some(BudgetLimit::Expansions(max));
            }
        }

        if let Some(budget) = self.config.time_budget() {
            if started.elapsed() >= budget {
                return Some(BudgetLimit::Time(budget));
            }
        }

        None
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
