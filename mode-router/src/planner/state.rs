//! Search states and the best-cost table.
//!
//! The search runs over `(node, incoming mode)` pairs rather than plain
//! nodes, because the mode a node was reached with changes what leaving it
//! costs. Each distinct state is stored once in an arena together with its
//! best known cost and a pointer to the state it was reached from.
//!
//! Equal-cost alternatives are resolved in favour of the latest discovery:
//! the frontier pops the most recently pushed of equally cheap entries, and
//! an unsettled state reached again at its current best cost takes the new
//! predecessor.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::{Cost, Mode, Route};

/// A node paired with the mode used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct State<N> {
    pub node: N,
    pub mode: Option<Mode>,
}

impl<N> State<N> {
    pub fn new(node: N, mode: Option<Mode>) -> Self {
        Self { node, mode }
    }
}

/// Index of a state in the `StateTable` arena.
pub(crate) type StateId = usize;

#[derive(Debug)]
struct StateRecord<N> {
    state: State<N>,
    best: Cost,
    parent: Option<StateId>,
    settled: bool,
}

/// Best-cost table with parent pointers.
#[derive(Debug)]
pub(crate) struct StateTable<N> {
    index: HashMap<State<N>, StateId>,
    records: Vec<StateRecord<N>>,
}

impl<N: Clone + Eq + Hash> StateTable<N> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Register the start state at cost zero.
    pub fn insert_start(&mut self, state: State<N>) -> StateId {
        self.push(state, Cost::ZERO, None)
    }

    /// Record reaching `state` at `cost` from `parent`.
    ///
    /// Returns the state's id if it must be (re)queued: the state is new or
    /// `cost` strictly improves on its best. Returns `None` otherwise. A tie
    /// with an unsettled state only moves its parent to `parent`.
    pub fn relax(&mut self, state: State<N>, cost: Cost, parent: StateId) -> Option<StateId> {
        let Some(&id) = self.index.get(&state) else {
            return Some(self.push(state, cost, Some(parent)));
        };

        let record = &mut self.records[id];
        if cost < record.best {
            record.best = cost;
            record.parent = Some(parent);
            Some(id)
        } else {
            if cost == record.best && !record.settled {
                record.parent = Some(parent);
            }
            None
        }
    }

    /// Mark a state's cost as final.
    ///
    /// Returns false if it was already settled.
    pub fn settle(&mut self, id: StateId) -> bool {
        let record = &mut self.records[id];
        !std::mem::replace(&mut record.settled, true)
    }

    fn push(&mut self, state: State<N>, cost: Cost, parent: Option<StateId>) -> StateId {
        let id = self.records.len();
        self.index.insert(state.clone(), id);
        self.records.push(StateRecord {
            state,
            best: cost,
            parent,
            settled: false,
        });
        id
    }

    pub fn best(&self, id: StateId) -> Cost {
        self.records[id].best
    }

    pub fn state(&self, id: StateId) -> &State<N> {
        &self.records[id].state
    }

    /// Number of distinct states reached.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Rebuild the route ending at `id` by following parent pointers.
    pub fn route(&self, id: StateId) -> Route<N> {
        let mut nodes = Vec::new();
        let mut modes = Vec::new();
        let mut current = id;

        loop {
            let record = &self.records[current];
            nodes.push(record.state.node.clone());
            match record.parent {
                Some(parent) => {
                    modes.push(record.state.mode.clone());
                    current = parent;
                }
                None => break,
            }
        }

        nodes.reverse();
        modes.reverse();
        Route::new(nodes, modes, self.best(id))
    }
}

/// A frontier entry: a state waiting to be expanded at a given cost.
///
/// Entries are ordered so that `BinaryHeap` pops the cheapest first, and
/// among equal costs the one pushed last. Nodes and modes are never
/// compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    pub cost: Cost,
    pub seq: u64,
    pub state: StateId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed cost for min-heap behavior; higher seq wins ties
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
