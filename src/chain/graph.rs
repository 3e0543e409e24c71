//! Structural capability contract for evolvable chains.

use super::node::{ChainNode, NodeId};

/// Capabilities the optimiser requires of a chain container.
///
/// The genetic operators manipulate chains purely through this trait, so any
/// container implementing it can be evolved; [`Chain`](super::Chain) is the
/// crate-provided implementation. A container missing one of these
/// capabilities simply does not compile against the optimiser.
///
/// Node handles follow index semantics: methods panic when handed an id that
/// does not belong to `self`, and structural rewrites
/// ([`replace_subtree`](Graph::replace_subtree)) invalidate all previously
/// issued ids.
pub trait Graph: Clone + Send + Sync {
    /// Creates a container with no nodes.
    fn empty() -> Self;

    /// Root node, or `None` while the container is empty.
    fn root(&self) -> Option<NodeId>;

    /// Adds `node` as a child of `parent`, or as the root when `parent` is
    /// `None`. Returns the new node's id.
    ///
    /// # Panics
    ///
    /// Panics when `parent` is `None` but a root already exists.
    fn add_node(&mut self, parent: Option<NodeId>, node: ChainNode) -> NodeId;

    /// Replaces the operator of `id` in place, keeping its structure.
    fn update_node(&mut self, id: NodeId, operator: &str);

    /// Replaces the node `at`, together with everything beneath it, by a
    /// copy of the subtree of `donor` rooted at `donor_root`.
    ///
    /// Invalidates all previously issued ids of `self`.
    fn replace_subtree(&mut self, at: NodeId, donor: &Self, donor_root: NodeId);

    /// Extracts a copy of the subtree rooted at `at` as a standalone chain.
    fn subtree(&self, at: NodeId) -> Self;

    /// Payload of `id`.
    fn node(&self, id: NodeId) -> &ChainNode;

    /// Ordered children of `id` (the node's inputs).
    fn children(&self, id: NodeId) -> &[NodeId];

    /// Parent of `id`; `None` for the root.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// All node ids in a stable order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Number of nodes in the container.
    fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    /// Distance from the root, following parent links; the root has depth 0.
    fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = id;
        while let Some(parent) = self.parent(cursor) {
            depth += 1;
            cursor = parent;
        }
        depth
    }

    /// Height of the subtree rooted at `id`; a leaf has height 0.
    fn height_of(&self, id: NodeId) -> usize {
        let mut height = 0;
        let mut frontier = vec![(id, 0usize)];
        while let Some((node, level)) = frontier.pop() {
            height = height.max(level);
            for &child in self.children(node) {
                frontier.push((child, level + 1));
            }
        }
        height
    }

    /// Maximum node depth in the container; an empty container has depth 0.
    fn depth(&self) -> usize {
        match self.root() {
            Some(root) => self.height_of(root),
            None => 0,
        }
    }

    /// Whether `id` is a primary (leaf) node.
    fn is_primary(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }
}
