//! Domain types for the multi-modal router.
//!
//! This module contains the value types shared by the graph, the cost model
//! and the planner. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod cost;
mod edge;
mod error;
mod mode;
mod route;

pub use cost::Cost;
pub use edge::{EdgeAttrs, EdgeId, EdgeKey};
pub use error::DomainError;
pub use mode::Mode;
pub use route::{Route, Segment};
