use crate::errors::BindingError;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Index;

/// An opaque handle for a single spin variable.
///
/// The wrapped id only provides identity; a model assigns each node a dense index given by
/// its position in the model's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Node(pub usize);

impl Node {
    /// Make a node with the given id.
    pub fn new(id: usize) -> Self {
        Node(id)
    }

    /// The id of this node.
    pub fn id(&self) -> usize {
        self.0
    }

    /// Make `n` nodes with ids `0..n`.
    pub fn range(n: usize) -> Vec<Node> {
        (0..n).map(Node).collect()
    }
}

impl From<usize> for Node {
    fn from(id: usize) -> Self {
        Node(id)
    }
}

/// An ordered, duplicate-free group of nodes.
///
/// Blocks define both a unit of simultaneous conditional update and a group of nodes to read
/// out of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(try_from = "Vec<Node>", into = "Vec<Node>"))]
pub struct Block {
    nodes: Vec<Node>,
}

impl Block {
    /// Make a block, fails if `nodes` is empty or contains duplicates.
    pub fn new(nodes: Vec<Node>) -> Result<Self, BindingError> {
        if nodes.is_empty() {
            return Err(BindingError::EmptyBlock);
        }
        let mut seen = HashSet::with_capacity(nodes.len());
        if let Some(dup) = nodes.iter().find(|n| !seen.insert(**n)) {
            return Err(BindingError::DuplicateInBlock(*dup));
        }
        Ok(Block { nodes })
    }

    /// The nodes of the block, in order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed block.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the nodes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Check if a node is in the block.
    pub fn contains(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }
}

impl TryFrom<Vec<Node>> for Block {
    type Error = BindingError;

    fn try_from(nodes: Vec<Node>) -> Result<Self, Self::Error> {
        Block::new(nodes)
    }
}

impl From<Block> for Vec<Node> {
    fn from(block: Block) -> Self {
        block.nodes
    }
}

impl Index<usize> for Block {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod block_tests {
    use super::*;

    #[test]
    fn test_block_keeps_order() {
        let b = Block::new(vec![Node(3), Node(0), Node(7)]).unwrap();
        assert_eq!(b.nodes(), &[Node(3), Node(0), Node(7)]);
        assert_eq!(b[1], Node(0));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_block_rejects_duplicates() {
        let err = Block::new(vec![Node(1), Node(2), Node(1)]).unwrap_err();
        assert_eq!(err, BindingError::DuplicateInBlock(Node(1)));
    }

    #[test]
    fn test_block_rejects_empty() {
        assert_eq!(Block::new(vec![]).unwrap_err(), BindingError::EmptyBlock);
    }
}
