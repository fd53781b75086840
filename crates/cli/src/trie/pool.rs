// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Arena that owns every node of a trie.
//!
//! Nodes are addressed by [`NodeId`]; failure links and edges are plain ids,
//! so the graph has no ownership cycles. The pool only grows while the trie
//! is open and is dropped together with it.

use std::ops::{Index, IndexMut};

use super::node::Node;

/// Stable index of a node in its [`NodePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct NodePool {
    nodes: Vec<Node>,
}

impl Default for NodePool {
    fn default() -> Self {
        Self::new()
    }
}

impl NodePool {
    /// Create a pool holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
        }
    }

    /// Allocate a fresh node at `depth` and return its id.
    pub fn alloc(&mut self, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(depth));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }
}

impl Index<NodeId> for NodePool {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodePool {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
