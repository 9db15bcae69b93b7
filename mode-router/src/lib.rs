//! Multi-modal route planner.
//!
//! Answers: "What is the cheapest way from here to there, when every edge
//! has a travel mode and changing mode costs extra?"

pub mod domain;
pub mod graph;
pub mod logging;
pub mod planner;
pub mod weighting;
