//! Mode-switch penalty models.

use std::collections::HashMap;

use serde::Deserialize;

use super::DEFAULT_TRANSITION_PENALTY;
use crate::domain::{Cost, Mode};

/// A directional penalty for switching from one mode to another.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModePairPenalty {
    pub from: Mode,
    pub to: Mode,
    pub penalty: Cost,
}

/// How much a mode switch costs.
///
/// Deserialises from `{"kind": "uniform", "penalty": 5}` or
/// `{"kind": "matrix", "default": 5, "pairs": [{"from": "walk", "to": "bus", "penalty": 2}]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TransitionConfig")]
pub enum TransitionPenalty {
    /// The same penalty for every switch, in either direction.
    Uniform(Cost),

    /// A per-pair lookup, directional, with a fallback for unlisted pairs.
    Matrix {
        pairs: HashMap<(Mode, Mode), Cost>,
        default: Cost,
    },
}

impl TransitionPenalty {
    /// Build a matrix from pair penalties.
    ///
    /// Later entries for the same pair override earlier ones.
    pub fn matrix(default: Cost, pairs: impl IntoIterator<Item = ModePairPenalty>) -> Self {
        let pairs = pairs
            .into_iter()
            .map(|p| ((p.from, p.to), p.penalty))
            .collect();
        TransitionPenalty::Matrix { pairs, default }
    }

    /// Penalty for switching from `from` to `to`, assuming they differ.
    ///
    /// An edge without a mode only ever gets the default penalty.
    pub fn penalty(&self, from: &Mode, to: Option<&Mode>) -> Cost {
        match self {
            TransitionPenalty::Uniform(p) => *p,
            TransitionPenalty::Matrix { pairs, default } => to
                .and_then(|to| pairs.get(&(from.clone(), to.clone())))
                .copied()
                .unwrap_or(*default),
        }
    }
}

impl Default for TransitionPenalty {
    fn default() -> Self {
        TransitionPenalty::Uniform(DEFAULT_TRANSITION_PENALTY)
    }
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TransitionConfig {
    Uniform {
        penalty: Cost,
    },
    Matrix {
        #[serde(default = "default_penalty")]
        default: Cost,
        #[serde(default)]
        pairs: Vec<ModePairPenalty>,
    },
}

fn default_penalty() -> Cost {
    DEFAULT_TRANSITION_PENALTY
}

impl From<TransitionConfig> for TransitionPenalty {
    fn from(config: TransitionConfig) -> Self {
        match config {
            TransitionConfig::Uniform { penalty } => TransitionPenalty::Uniform(penalty),
            TransitionConfig::Matrix { default, pairs } => TransitionPenalty::matrix(default, pairs),
        }
    }
}
