//! Route types.
//!
//! A `Route` is the result of a successful search: the node sequence from
//! start to goal, the mode used to enter each node, and the total cost.

use serde::Serialize;

use super::{Cost, Mode};

/// A maximal run of consecutive steps travelled in the same mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<N> {
    /// Mode of every step in the segment.
    pub mode: Option<Mode>,
    /// Nodes visited, including the node the segment starts from.
    pub nodes: Vec<N>,
}

impl<N> Segment<N> {
    /// Returns the first node of the segment.
    pub fn origin(&self) -> &N {
        &self.nodes[0]
    }

    /// Returns the last node of the segment.
    pub fn destination(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges in the segment.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns true if the segment contains no edges.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A path found by the planner.
///
/// # Invariants
///
/// - At least one node
/// - `modes` has exactly one entry per edge, i.e. `nodes.len() - 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route<N> {
    nodes: Vec<N>,
    modes: Vec<Option<Mode>>,
    total_cost: Cost,
}

impl<N> Route<N> {
    /// Builds a route from its parts.
    ///
    /// Callers guarantee the invariants; the planner is the only producer.
    pub(crate) fn new(nodes: Vec<N>, modes: Vec<Option<Mode>>, total_cost: Cost) -> Self {
        debug_assert!(!nodes.is_empty());
        debug_assert_eq!(modes.len() + 1, nodes.len());
        Self {
            nodes,
            modes,
            total_cost,
        }
    }

    /// Returns the visited nodes, start first.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the mode used to reach each node after the first.
    pub fn modes(&self) -> &[Option<Mode>] {
        &self.modes
    }

    /// Returns the start node.
    pub fn origin(&self) -> &N {
        &self.nodes[0]
    }

    /// Returns the goal node.
    pub fn destination(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Returns the total cost including transition penalties.
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    /// Number of edges travelled.
    pub fn edge_count(&self) -> usize {
        self.modes.len()
    }

    /// Returns true if the route never leaves its start node.
    pub fn is_trivial(&self) -> bool {
        self.modes.is_empty()
    }

    /// Number of times a penalty-bearing mode switch occurs.
    ///
    /// A switch is counted when a step's mode differs from the previous
    /// step's mode and the previous step had a mode, which is exactly when
    /// the cost model charges a transition.
    pub fn mode_switches(&self) -> usize {
        self.modes
            .windows(2)
            .filter(|w| w[0].is_some() && w[0] != w[1])
            .count()
    }

    /// Iterates over `(from, to, mode)` for each edge.
    pub fn steps(&self) -> impl Iterator<Item = (&N, &N, Option<&Mode>)> {
        self.nodes
            .windows(2)
            .zip(&self.modes)
            .map(|(pair, mode)| (&pair[0], &pair[1], mode.as_ref()))
    }
}

impl<N: Clone> Route<N> {
    /// Groups the route into same-mode segments.
    pub fn segments(&self) -> Vec<Segment<N>> {
        let mut segments: Vec<Segment<N>> = Vec::new();

        for (_, to, mode) in self.steps() {
            if let Some(seg) = segments.last_mut() {
                if seg.mode.as_ref() == mode {
                    seg.nodes.push(to.clone());
                    continue;
                }
            }

            let from = segments
                .last()
                .map(|s| s.destination().clone())
                .unwrap_or_else(|| self.origin().clone());
            segments.push(Segment {
                mode: mode.cloned(),
                nodes: vec![from, to.clone()],
            });
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(s: &str) -> Option<Mode> {
        Some(Mode::parse(s).unwrap())
    }

    fn sample() -> Route<u32> {
        Route::new(
            vec![1, 2, 3, 4],
            vec![mode("walk"), mode("transit"), mode("transit")],
            Cost::from(12),
        )
    }

    #[test]
    fn accessors() {
        let route = sample();
        assert_eq!(route.nodes(), &[1, 2, 3, 4]);
        assert_eq!(*route.origin(), 1);
        assert_eq!(*route.destination(), 4);
        assert_eq!(route.total_cost(), Cost::from(12));
        assert_eq!(route.edge_count(), 3);
        assert!(!route.is_trivial());
    }

    #[test]
    fn trivial_route() {
        let route = Route::new(vec!["x"], Vec::new(), Cost::ZERO);
        assert_eq!(route.nodes(), &["x"]);
        assert_eq!(route.total_cost(), Cost::ZERO);
        assert!(route.is_trivial());
        assert_eq!(route.mode_switches(), 0);
        assert!(route.segments().is_empty());
    }

    #[test]
    fn counts_switches() {
        assert_eq!(sample().mode_switches(), 1);

        let back_and_forth = Route::new(
            vec![1, 2, 3, 4],
            vec![mode("walk"), mode("transit"), mode("walk")],
            Cost::from(20),
        );
        assert_eq!(back_and_forth.mode_switches(), 2);
    }

    #[test]
    fn switch_after_unmoded_step_not_counted() {
        let route = Route::new(vec![1, 2, 3], vec![None, mode("walk")], Cost::from(2));
        assert_eq!(route.mode_switches(), 0);
    }

    #[test]
    fn steps_pair_nodes_with_modes() {
        let route = sample();
        let steps: Vec<_> = route.steps().map(|(a, b, m)| (*a, *b, m.cloned())).collect();
        assert_eq!(
            steps,
            vec![
                (1, 2, mode("walk")),
                (2, 3, mode("transit")),
                (3, 4, mode("transit")),
            ]
        );
    }

    #[test]
    fn segments_group_by_mode() {
        let segments = sample().segments();
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].mode, mode("walk"));
        assert_eq!(segments[0].nodes, vec![1, 2]);
        assert_eq!(segments[0].len(), 1);

        assert_eq!(segments[1].mode, mode("transit"));
        assert_eq!(segments[1].nodes, vec![2, 3, 4]);
        assert_eq!(*segments[1].origin(), 2);
        assert_eq!(*segments[1].destination(), 4);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["nodes"], serde_json::json!([1, 2, 3, 4]));
        assert_eq!(json["total_cost"], serde_json::json!(12.0));
        assert_eq!(json["modes"][1], serde_json::json!("transit"));
    }
}
