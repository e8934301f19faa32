use crate::block::{Block, Node};
use crate::classical::ising::{Edge, IsingEBM};
use crate::errors::BindingError;
use std::fmt::{Display, Formatter};
use tracing::{debug, warn};

/// Which block of a program a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// The node is resampled as part of the i'th free block.
    Free(usize),
    /// The node is held fixed as part of the i'th clamped block.
    Clamped(usize),
}

impl Display for BlockRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockRole::Free(i) => write!(f, "free block {}", i),
            BlockRole::Clamped(i) => write!(f, "clamped block {}", i),
        }
    }
}

/// An ising model bound to a partition of its nodes into free and clamped blocks.
///
/// Every node belongs to at most one block. Nodes in no block are background nodes: they are
/// neither resampled nor clamped and keep whatever value the initial state gives them.
///
/// Free blocks are updated in the order given here. A free block in which two nodes share an
/// edge is accepted, but updating it is not an exact Gibbs step, so a warning is logged.
#[derive(Debug, Clone)]
pub struct SamplingProgram {
    model: IsingEBM,
    free_blocks: Vec<Block>,
    clamped_blocks: Vec<Block>,
    free_indices: Vec<Vec<usize>>,
    clamped_indices: Vec<Vec<usize>>,
    roles: Vec<Option<BlockRole>>,
}

impl SamplingProgram {
    /// Bind `model` to a partition, fails if a block references an unknown node or if any
    /// node is covered by more than one block.
    pub fn new(
        model: IsingEBM,
        free_blocks: Vec<Block>,
        clamped_blocks: Vec<Block>,
    ) -> Result<Self, BindingError> {
        let mut roles: Vec<Option<BlockRole>> = vec![None; model.n_nodes()];
        let mut assign = |block: &Block, role: BlockRole| -> Result<Vec<usize>, BindingError> {
            block
                .iter()
                .map(|node| {
                    let indx = model.index_of(node)?;
                    match roles[indx] {
                        Some(other) => Err(BindingError::OverlappingBlocks {
                            node: *node,
                            first: other.to_string(),
                            second: role.to_string(),
                        }),
                        None => {
                            roles[indx] = Some(role);
                            Ok(indx)
                        }
                    }
                })
                .collect()
        };

        let free_indices = free_blocks
            .iter()
            .enumerate()
            .map(|(i, b)| assign(b, BlockRole::Free(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let clamped_indices = clamped_blocks
            .iter()
            .enumerate()
            .map(|(i, b)| assign(b, BlockRole::Clamped(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let program = SamplingProgram {
            model,
            free_blocks,
            clamped_blocks,
            free_indices,
            clamped_indices,
            roles,
        };

        for i in 0..program.free_blocks.len() {
            let conflicts = program.conflicting_edges(i);
            if !conflicts.is_empty() {
                warn!(
                    block = i,
                    n_conflicts = conflicts.len(),
                    "free block contains coupled nodes, its update is not an exact Gibbs step"
                );
            }
        }
        debug!(
            n_free = program.free_blocks.len(),
            n_clamped = program.clamped_blocks.len(),
            n_background = program.roles.iter().filter(|r| r.is_none()).count(),
            "built sampling program"
        );
        Ok(program)
    }

    /// The model being sampled.
    pub fn model(&self) -> &IsingEBM {
        &self.model
    }

    /// Free blocks, in update order.
    pub fn free_blocks(&self) -> &[Block] {
        &self.free_blocks
    }

    /// Clamped blocks.
    pub fn clamped_blocks(&self) -> &[Block] {
        &self.clamped_blocks
    }

    /// Model indices of the nodes of each free block.
    pub fn free_indices(&self) -> &[Vec<usize>] {
        &self.free_indices
    }

    /// Model indices of the nodes of each clamped block.
    pub fn clamped_indices(&self) -> &[Vec<usize>] {
        &self.clamped_indices
    }

    /// The block a node belongs to, `None` for background nodes and unknown nodes.
    pub fn role_of(&self, node: &Node) -> Option<BlockRole> {
        self.model.node_index(node).and_then(|i| self.roles[i])
    }

    /// Nodes in neither a free nor a clamped block.
    pub fn background_nodes(&self) -> Vec<Node> {
        self.roles
            .iter()
            .zip(self.model.nodes().iter())
            .filter(|(r, _)| r.is_none())
            .map(|(_, n)| *n)
            .collect()
    }

    /// Edges with both ends inside the given free block.
    pub fn conflicting_edges(&self, free_block: usize) -> Vec<Edge> {
        let role = Some(BlockRole::Free(free_block));
        self.model
            .edges()
            .iter()
            .filter(|(na, nb)| self.role_of(na) == role && self.role_of(nb) == role)
            .cloned()
            .collect()
    }

    /// Resolve a block against the model.
    pub(crate) fn resolve_block(&self, block: &Block) -> Result<Vec<usize>, BindingError> {
        block.iter().map(|n| self.model.index_of(n)).collect()
    }

    /// Check a clamp assignment against the clamped blocks.
    pub(crate) fn check_clamp(&self, state_clamp: &[Vec<bool>]) -> Result<(), BindingError> {
        if state_clamp.len() != self.clamped_blocks.len() {
            return Err(BindingError::ClampBlockCount {
                expected: self.clamped_blocks.len(),
                got: state_clamp.len(),
            });
        }
        self.clamped_blocks
            .iter()
            .zip(state_clamp.iter())
            .enumerate()
            .try_for_each(|(block, (b, values))| {
                if b.len() == values.len() {
                    Ok(())
                } else {
                    Err(BindingError::ClampBlockLength {
                        block,
                        expected: b.len(),
                        got: values.len(),
                    })
                }
            })
    }
}
