//! JSON graph documents.
//!
//! A document lists edges (and optionally isolated nodes and a weighting)
//! in a flat JSON form:
//!
//! ```json
//! {
//!   "nodes": ["depot"],
//!   "edges": [
//!     {"from": 1, "to": 2, "mode": "walk", "weight": 2},
//!     {"from": 2, "to": 3, "key": 0, "mode": "transit", "weight": 3, "length": 1500}
//!   ],
//!   "weighting": {"transition": {"kind": "uniform", "penalty": 5}}
//! }
//! ```
//!
//! Node ids may be strings or integers; integers are stored as their decimal
//! string. An edge without a `key` takes the next free key for its node pair,
//! and an explicit `key` already taken by an earlier edge, keyed or not, is
//! an error. Costs are validated while parsing, so a negative weight is a
//! parse error rather than something the planner has to cope with.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::MultiGraph;
use crate::domain::{EdgeAttrs, EdgeId, EdgeKey};
use crate::weighting::Weighting;

/// Errors from loading a graph document.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Reading the file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has invalid values
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An edge conflicts with the rest of the document
    #[error("edge {index} is invalid: {reason}")]
    InvalidEdge { index: usize, reason: String },
}

/// Node reference as written in JSON.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeRef {
    Integer(i64),
    Text(String),
}

impl NodeRef {
    fn into_id(self) -> String {
        match self {
            NodeRef::Integer(n) => n.to_string(),
            NodeRef::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: NodeRef,
    to: NodeRef,
    #[serde(default)]
    key: Option<EdgeKey>,
    #[serde(flatten)]
    attrs: EdgeAttrs,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: Vec<NodeRef>,
    edges: Vec<EdgeRecord>,
    #[serde(default)]
    weighting: Option<Weighting>,
}

/// A validated graph loaded from JSON, with its optional weighting.
#[derive(Debug, Clone)]
pub struct GraphDocument {
    graph: MultiGraph<String>,
    weighting: Option<Weighting>,
}

impl GraphDocument {
    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Read and parse a document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn from_raw(raw: RawDocument) -> Result<Self, GraphError> {
        let mut graph = MultiGraph::new();

        for node in raw.nodes {
            graph.add_node(node.into_id());
        }

        for (index, record) in raw.edges.into_iter().enumerate() {
            let from = record.from.into_id();
            let to = record.to.into_id();

            match record.key {
                Some(key) => {
                    let id = EdgeId::new(from, to, key);
                    if graph.contains_edge(&id) {
                        return Err(GraphError::InvalidEdge {
                            index,
                            reason: format!("duplicate key {key} for {} -> {}", id.from, id.to),
                        });
                    }
                    graph.insert_edge(id.from, id.to, key, record.attrs);
                }
                None => {
                    if graph.add_edge(from.clone(), to.clone(), record.attrs).is_none() {
                        return Err(GraphError::InvalidEdge {
                            index,
                            reason: format!("no free key for {from} -> {to}"),
                        });
                    }
                }
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Loaded graph document"
        );

        Ok(Self {
            graph,
            weighting: raw.weighting,
        })
    }

    /// Returns the graph.
    pub fn graph(&self) -> &MultiGraph<String> {
        &self.graph
    }

    /// Returns the weighting, if the document specified one.
    pub fn weighting(&self) -> Option<&Weighting> {
        self.weighting.as_ref()
    }

    /// Splits the document into its graph and weighting.
    pub fn into_parts(self) -> (MultiGraph<String>, Option<Weighting>) {
        (self.graph, self.weighting)
    }
}
