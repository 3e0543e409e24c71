//! Node identity and payload for pipeline chains.

use serde::{Deserialize, Serialize};

/// Handle to a node inside a chain.
///
/// Ids are arena indices. They are only meaningful for the chain that issued
/// them, and structural rewrites such as
/// [`Graph::replace_subtree`](super::Graph::replace_subtree) invalidate every
/// previously issued id of that chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of this node in the owning chain's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One pipeline operator inside a chain.
///
/// Whether a node acts as primary (a leaf consuming raw inputs) or secondary
/// (consuming the outputs of its children) is structural, decided by its
/// position in the chain rather than stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainNode {
    /// Operator identity, e.g. `"logit"` or `"xgboost"`.
    pub operator: String,
    /// Operator parameter overrides, opaque to the optimiser.
    pub params: Option<serde_json::Value>,
}

impl ChainNode {
    /// Creates a node for `operator` with no parameter overrides.
    pub fn new(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            params: None,
        }
    }

    /// Attaches parameter overrides to the node.
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}
