//! In-memory directed multigraph.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use tracing::warn;

use super::GraphSource;
use crate::domain::{Cost, EdgeAttrs, EdgeId, EdgeKey, Mode};

/// A directed multigraph with attribute-carrying edges.
///
/// Any number of edges may connect the same ordered pair of nodes; they are
/// told apart by an `EdgeKey`. Neighbor lists keep insertion order, so
/// searches over the same graph are reproducible.
#[derive(Debug, Clone)]
pub struct MultiGraph<N> {
    /// Out-neighbors of every node, each listed once.
    adjacency: HashMap<N, Vec<N>>,

    /// Parallel edges per ordered node pair.
    edges: HashMap<(N, N), BTreeMap<EdgeKey, EdgeAttrs>>,
}

impl<N> Default for MultiGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edges: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash> MultiGraph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, Vec::new());
        true
    }

    /// Add an edge under the next free key for this node pair.
    ///
    /// The key is one past the largest key in use, or the smallest unused
    /// key once `EdgeKey::MAX` is taken. Both endpoints are added as nodes if
    /// missing. Returns `None`, adding nothing, if every key is in use.
    pub fn add_edge(&mut self, from: N, to: N, attrs: EdgeAttrs) -> Option<EdgeKey> {
        let key = match self.edges.get(&(from.clone(), to.clone())) {
            Some(parallel) => free_key(parallel)?,
            None => EdgeKey(0),
        };
        self.insert_edge(from, to, key, attrs);
        Some(key)
    }

    /// Returns true if an edge with this id exists.
    pub fn contains_edge(&self, id: &EdgeId<N>) -> bool {
        self.edge(id).is_some()
    }

    /// Insert an edge under an explicit key.
    ///
    /// Returns the attributes previously stored under that key, if any.
    pub fn insert_edge(
        &mut self,
        from: N,
        to: N,
        key: EdgeKey,
        attrs: EdgeAttrs,
    ) -> Option<EdgeAttrs> {
        self.add_node(to.clone());
        let out = self.adjacency.entry(from.clone()).or_default();
        if !out.contains(&to) {
            out.push(to.clone());
        }

        self.edges.entry((from, to)).or_default().insert(key, attrs)
    }

    /// Get the attributes of one edge.
    pub fn edge(&self, id: &EdgeId<N>) -> Option<&EdgeAttrs> {
        self.edges
            .get(&(id.from.clone(), id.to.clone()))
            .and_then(|parallel| parallel.get(&id.key))
    }

    /// Iterate over every edge with its id.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId<N>, &EdgeAttrs)> + '_ {
        self.edges.iter().flat_map(|((from, to), parallel)| {
            parallel
                .iter()
                .map(move |(key, attrs)| (EdgeId::new(from.clone(), to.clone(), *key), attrs))
        })
    }

    /// Iterate over every node.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adjacency.keys()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<N: Clone + Eq + Hash + std::fmt::Debug> GraphSource for MultiGraph<N> {
    type Node = N;

    fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn neighbors(&self, node: &N) -> Vec<N> {
        self.adjacency.get(node).cloned().unwrap_or_default()
    }

    fn edges_between(&self, from: &N, to: &N) -> Vec<(EdgeKey, &EdgeAttrs)> {
        self.edges
            .get(&(from.clone(), to.clone()))
            .map(|parallel| parallel.iter().map(|(key, attrs)| (*key, attrs)).collect())
            .unwrap_or_default()
    }
}

/// Picks an unused key among parallel edges.
fn free_key(parallel: &BTreeMap<EdgeKey, EdgeAttrs>) -> Option<EdgeKey> {
    let Some(&last) = parallel.keys().next_back() else {
        return Some(EdgeKey(0));
    };
    if let Some(next) = last.next() {
        return Some(next);
    }

    // Keys are sorted, so the first gap is where the run from 0 breaks
    let mut expected = EdgeKey(0);
    for &key in parallel.keys() {
        if key != expected {
            return Some(expected);
        }
        expected = key.next()?;
    }
    None
}

/// Builder for creating multigraphs.
///
/// Provides a fluent API for adding moded, weighted edges. Edges with an
/// invalid mode or weight are skipped and logged.
#[derive(Debug)]
pub struct MultiGraphBuilder<N> {
    inner: MultiGraph<N>,
}

impl<N> Default for MultiGraphBuilder<N> {
    fn default() -> Self {
        Self {
            inner: MultiGraph::default(),
        }
    }
}

impl<N: Clone + Eq + Hash + std::fmt::Debug> MultiGraphBuilder<N> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges.
    pub fn node(mut self, node: N) -> Self {
        self.inner.add_node(node);
        self
    }

    /// Add an edge with a mode and base weight.
    pub fn edge(self, from: N, to: N, mode: &str, weight: f64) -> Self {
        match (Mode::parse(mode), Cost::new(weight)) {
            (Ok(mode), Ok(weight)) => self.edge_with(from, to, EdgeAttrs::new(mode, weight)),
            (Err(e), _) | (_, Err(e)) => {
                warn!(?from, ?to, error = %e, "Skipping invalid edge");
                self
            }
        }
    }

    /// Add an edge with fully specified attributes.
    pub fn edge_with(mut self, from: N, to: N, attrs: EdgeAttrs) -> Self {
        if self.inner.add_edge(from.clone(), to.clone(), attrs).is_none() {
            warn!(?from, ?to, "Skipping edge: no free edge key");
        }
        self
    }

    /// Build the graph.
    pub fn build(self) -> MultiGraph<N> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(mode: &str, weight: u32) -> EdgeAttrs {
        EdgeAttrs::new(Mode::parse(mode).unwrap(), Cost::from(weight))
    }

    #[test]
    fn empty_graph() {
        let g: MultiGraph<u32> = MultiGraph::new();
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains_node(&1));
        assert!(g.neighbors(&1).is_empty());
    }

    #[test]
    fn add_node_reports_novelty() {
        let mut g = MultiGraph::new();
        assert!(g.add_node("a"));
        assert!(!g.add_node("a"));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_edge_registers_both_endpoints() {
        let mut g = MultiGraph::new();
        g.add_edge(1, 2, attrs("walk", 2));

        assert!(g.contains_node(&1));
        assert!(g.contains_node(&2));
        assert_eq!(g.neighbors(&1), vec![2]);
        assert!(g.neighbors(&2).is_empty());
    }

    #[test]
    fn parallel_edges_get_sequential_keys() {
        let mut g = MultiGraph::new();
        let k0 = g.add_edge(1, 2, attrs("walk", 6));
        let k1 = g.add_edge(1, 2, attrs("transit", 2));

        assert_eq!(k0, Some(EdgeKey(0)));
        assert_eq!(k1, Some(EdgeKey(1)));
        assert_eq!(g.edge_count(), 2);
        // Neighbor listed once despite two edges
        assert_eq!(g.neighbors(&1), vec![2]);

        let between = g.edges_between(&1, &2);
        assert_eq!(between.len(), 2);
        assert_eq!(between[0].0, EdgeKey(0));
        assert_eq!(between[1].1.weight, Some(Cost::from(2)));
    }

    #[test]
    fn insert_edge_replaces_same_key() {
        let mut g = MultiGraph::new();
        assert!(g.insert_edge(1, 2, EdgeKey(3), attrs("walk", 1)).is_none());
        let old = g.insert_edge(1, 2, EdgeKey(3), attrs("walk", 9));
        assert_eq!(old, Some(attrs("walk", 1)));
        assert_eq!(g.edge_count(), 1);

        // Next auto key follows the largest existing key
        assert_eq!(g.add_edge(1, 2, attrs("walk", 1)), Some(EdgeKey(4)));
    }

    #[test]
    fn auto_key_after_max_key_fills_first_gap() {
        let mut g = MultiGraph::new();
        g.insert_edge(1, 2, EdgeKey::MAX, attrs("walk", 1));
        assert_eq!(g.add_edge(1, 2, attrs("walk", 2)), Some(EdgeKey(0)));
        assert_eq!(g.add_edge(1, 2, attrs("walk", 3)), Some(EdgeKey(1)));

        g.insert_edge(1, 2, EdgeKey(3), attrs("walk", 4));
        assert_eq!(g.add_edge(1, 2, attrs("walk", 5)), Some(EdgeKey(2)));
        assert_eq!(g.add_edge(1, 2, attrs("walk", 6)), Some(EdgeKey(4)));

        assert_eq!(g.edge_count(), 6);
        assert_eq!(
            g.edge(&EdgeId::new(1, 2, EdgeKey::MAX)),
            Some(&attrs("walk", 1))
        );
    }

    #[test]
    fn free_key_scans_for_gap() {
        // The run from 0 breaks at 1 even though MAX is taken
        let mut parallel = BTreeMap::new();
        parallel.insert(EdgeKey(0), attrs("walk", 1));
        parallel.insert(EdgeKey::MAX, attrs("walk", 1));
        assert_eq!(free_key(&parallel), Some(EdgeKey(1)));

        assert_eq!(free_key(&BTreeMap::new()), Some(EdgeKey(0)));
    }

    #[test]
    fn edge_lookup_by_id() {
        let mut g = MultiGraph::new();
        let key = g.add_edge(5, 6, attrs("drive", 3)).unwrap();

        let id = EdgeId::new(5, 6, key);
        assert_eq!(g.edge(&id), Some(&attrs("drive", 3)));
        assert!(g.edge(&EdgeId::new(6, 5, key)).is_none());
        assert!(g.edge(&EdgeId::new(5, 6, EdgeKey(9))).is_none());
        assert!(g.contains_edge(&id));
    }

    #[test]
    fn edges_iterates_all() {
        let mut g = MultiGraph::new();
        g.add_edge(1, 2, attrs("walk", 1));
        g.add_edge(1, 2, attrs("transit", 1));
        g.add_edge(2, 3, attrs("walk", 1));

        let mut ids: Vec<String> = g.edges().map(|(id, _)| id.to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1-2-0", "1-2-1", "2-3-0"]);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let g = MultiGraphBuilder::new()
            .edge(1, 9, "walk", 1.0)
            .edge(1, 3, "walk", 1.0)
            .edge(1, 5, "walk", 1.0)
            .build();
        assert_eq!(g.neighbors(&1), vec![9, 3, 5]);
    }

    #[test]
    fn builder_ignores_invalid_edges() {
        let g = MultiGraphBuilder::new()
            .edge(1, 2, "", 1.0) // Blank mode
            .edge(1, 2, "walk", -1.0) // Negative weight
            .edge(1, 2, "walk", f64::NAN) // NaN weight
            .edge(1, 2, "walk", 1.0) // Valid
            .node(7)
            .build();

        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_node(&7));
        assert_eq!(g.node_count(), 3);
    }
}
