use crate::block::Node;
use thiserror::Error;

/// A malformed energy model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StructuralError {
    /// One bias is required per node.
    #[error("expected {n_nodes} biases (one per node), got {n_biases}")]
    BiasLength {
        /// Number of nodes in the model.
        n_nodes: usize,
        /// Number of biases supplied.
        n_biases: usize,
    },
    /// One weight is required per edge.
    #[error("expected {n_edges} weights (one per edge), got {n_weights}")]
    WeightLength {
        /// Number of edges in the model.
        n_edges: usize,
        /// Number of weights supplied.
        n_weights: usize,
    },
    /// A node appears twice in the node list.
    #[error("node {0:?} appears more than once in the node list")]
    DuplicateNode(Node),
    /// An edge endpoint is not in the node list.
    #[error("edge {edge} references unknown node {node:?}")]
    UnknownNode {
        /// Position of the edge in the edge list.
        edge: usize,
        /// The offending endpoint.
        node: Node,
    },
    /// An edge connects a node to itself.
    #[error("edge {edge} is a self-loop on node {node:?}")]
    SelfLoop {
        /// Position of the edge in the edge list.
        edge: usize,
        /// The repeated endpoint.
        node: Node,
    },
    /// Inverse temperature must be finite and non-negative.
    #[error("beta must be finite and non-negative, got {0}")]
    InvalidBeta(f64),
    /// Biases and weights must be finite.
    #[error("{what} {index} is not finite ({value})")]
    NonFinite {
        /// Either "bias" or "weight".
        what: &'static str,
        /// Position of the parameter.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// A partition, clamp assignment or output request which doesn't fit the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Blocks may not be empty.
    #[error("blocks must contain at least one node")]
    EmptyBlock,
    /// A node appears twice within one block.
    #[error("node {0:?} appears more than once in a block")]
    DuplicateInBlock(Node),
    /// A node is not part of the model.
    #[error("node {0:?} is not part of the model")]
    UnknownNode(Node),
    /// A node is covered by two blocks of the partition.
    #[error("node {node:?} is in {first} and in {second}")]
    OverlappingBlocks {
        /// The shared node.
        node: Node,
        /// Description of the first block, e.g. "free block 0".
        first: String,
        /// Description of the second block.
        second: String,
    },
    /// The clamp assignment has the wrong number of blocks.
    #[error("program declares {expected} clamped blocks but {got} clamp values were supplied")]
    ClampBlockCount {
        /// Number of clamped blocks in the program.
        expected: usize,
        /// Number of value vectors supplied.
        got: usize,
    },
    /// A clamp value vector does not match its block length.
    #[error("clamped block {block} has {expected} nodes but {got} values were supplied")]
    ClampBlockLength {
        /// Index of the clamped block.
        block: usize,
        /// Number of nodes in the block.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// A state vector does not cover exactly the model's nodes.
    #[error("state has {got} entries but the model has {expected} nodes")]
    StateLength {
        /// Number of nodes in the model.
        expected: usize,
        /// Length of the supplied state.
        got: usize,
    },
}

/// A sampling schedule which cannot be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// At least one sample must be collected.
    #[error("n_samples must be at least 1")]
    NoSamples,
    /// At least one sweep is needed between samples.
    #[error("steps_per_sample must be at least 1")]
    NoStepsPerSample,
    /// The total number of sweeps does not fit in a `usize`.
    #[error("n_warmup + n_samples * steps_per_sample overflows")]
    TooManySweeps,
}

/// Any error which can surface from a sampling run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    /// The model is malformed.
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// The partition, clamp values or requested outputs are malformed.
    #[error(transparent)]
    Binding(#[from] BindingError),
    /// The schedule is malformed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
