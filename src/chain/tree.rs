//! Arena-backed pipeline chain.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::graph::Graph;
use super::node::{ChainNode, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Slot {
    data: ChainNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tree-shaped pipeline chain; the crate-provided [`Graph`] implementation.
///
/// Nodes live in an arena in breadth-first order with the root at index
/// zero. Children are ordered owned lists and every non-root node keeps a
/// parent back-reference used for depth queries. The structure stays acyclic
/// by construction: nodes only attach under an existing parent and
/// structural rewrites rebuild the whole arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    nodes: Vec<Slot>,
}

enum Source {
    Own(NodeId),
    Donor(NodeId),
}

impl Graph for Chain {
    fn empty() -> Self {
        Self::default()
    }

    fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    fn add_node(&mut self, parent: Option<NodeId>, node: ChainNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        match parent {
            Some(p) => {
                assert!(p.0 < self.nodes.len(), "parent id out of bounds");
                self.nodes.push(Slot {
                    data: node,
                    parent: Some(p),
                    children: Vec::new(),
                });
                self.nodes[p.0].children.push(id);
            }
            None => {
                assert!(self.nodes.is_empty(), "chain already has a root");
                self.nodes.push(Slot {
                    data: node,
                    parent: None,
                    children: Vec::new(),
                });
            }
        }
        id
    }

    fn update_node(&mut self, id: NodeId, operator: &str) {
        self.nodes[id.0].data.operator = operator.to_string();
    }

    fn replace_subtree(&mut self, at: NodeId, donor: &Self, donor_root: NodeId) {
        assert!(at.0 < self.nodes.len(), "node id out of bounds");
        assert!(donor_root.0 < donor.nodes.len(), "donor root id out of bounds");
        let root = NodeId(0);
        let mut rebuilt: Vec<Slot> = Vec::new();
        let mut queue: VecDeque<(Option<NodeId>, Source)> = VecDeque::new();
        let seed = if at == root {
            Source::Donor(donor_root)
        } else {
            Source::Own(root)
        };
        queue.push_back((None, seed));
        while let Some((parent, source)) = queue.pop_front() {
            let id = NodeId(rebuilt.len());
            let data = match &source {
                Source::Own(n) => self.nodes[n.0].data.clone(),
                Source::Donor(n) => donor.nodes[n.0].data.clone(),
            };
            rebuilt.push(Slot {
                data,
                parent,
                children: Vec::new(),
            });
            if let Some(p) = parent {
                rebuilt[p.0].children.push(id);
            }
            match source {
                Source::Own(n) => {
                    for &child in &self.nodes[n.0].children {
                        let next = if child == at {
                            Source::Donor(donor_root)
                        } else {
                            Source::Own(child)
                        };
                        queue.push_back((Some(id), next));
                    }
                }
                Source::Donor(n) => {
                    for &child in &donor.nodes[n.0].children {
                        queue.push_back((Some(id), Source::Donor(child)));
                    }
                }
            }
        }
        self.nodes = rebuilt;
    }

    fn subtree(&self, at: NodeId) -> Self {
        let mut out = Chain::empty();
        let mut queue: VecDeque<(Option<NodeId>, NodeId)> = VecDeque::new();
        queue.push_back((None, at));
        while let Some((parent, source)) = queue.pop_front() {
            let id = out.add_node(parent, self.nodes[source.0].data.clone());
            for &child in &self.nodes[source.0].children {
                queue.push_back((Some(id), child));
            }
        }
        out
    }

    fn node(&self, id: NodeId) -> &ChainNode {
        &self.nodes[id.0].data
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    fn node_ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len()).map(NodeId).collect()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
