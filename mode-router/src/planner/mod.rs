//! Multi-modal path planner.
//!
//! This module implements the core search that answers:
//! "What is the cheapest way from here to there, counting the cost of
//! switching between modes of travel?"
//!
//! The algorithm is Dijkstra's, run over `(node, incoming mode)` states
//! instead of nodes, with a cost model supplying edge and transition costs.

mod config;
mod search;
mod state;

pub use config::SearchConfig;
pub use search::{BudgetLimit, PathOutcome, Planner, SearchError, SearchResult};
