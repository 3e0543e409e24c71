//! Pipeline chain model: node payloads, the structural capability trait,
//! the arena-backed tree, and fitness values.
//!
//! A chain is a rooted tree of operators. Leaves are primary nodes consuming
//! raw inputs; internal nodes are secondary, consuming the outputs of their
//! children; the root produces the final output. The optimiser in
//! [`crate::gp`] manipulates chains only through the [`Graph`] trait.

pub mod fitness;
pub mod graph;
pub mod node;
pub mod tree;

pub use fitness::Fitness;
pub use graph::Graph;
pub use node::{ChainNode, NodeId};
pub use tree::Chain;
