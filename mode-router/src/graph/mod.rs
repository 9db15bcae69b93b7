//! Graph sources for the planner.
//!
//! The planner only needs to ask for a node's out-neighbors and for the
//! parallel edges between two nodes. `GraphSource` captures that, so any
//! graph representation can be searched. `MultiGraph` is the in-memory
//! implementation, and `GraphDocument` loads one from JSON.

mod document;
mod multigraph;

use std::hash::Hash;

pub use document::{GraphDocument, GraphError};
pub use multigraph::{MultiGraph, MultiGraphBuilder};

use crate::domain::{EdgeAttrs, EdgeKey};

/// Trait for providing graph topology and edge attributes.
///
/// This abstraction allows the planner to be run against any graph store,
/// and to be tested with small hand-built graphs.
pub trait GraphSource {
    /// Node identifier type.
    type Node: Clone + Eq + Hash + std::fmt::Debug;

    /// Returns true if `node` is part of the graph.
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Returns the out-neighbors of `node`, each listed once.
    ///
    /// Unknown nodes have no neighbors.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Returns every edge from `from` to `to`, keyed by edge key.
    fn edges_between(&self, from: &Self::Node, to: &Self::Node) -> Vec<(EdgeKey, &EdgeAttrs)>;
}
