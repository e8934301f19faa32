#![deny(
    missing_docs,
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

//! `blockgibbs` is a library for sampling pairwise spin models (ising models) with block gibbs
//! sampling.
//!
//! A model is a set of spins with biases and pairwise couplings. Its nodes are partitioned into
//! free blocks, which are resampled from their conditional distribution on every sweep, and
//! clamped blocks, which are held fixed. A schedule controls how many sweeps are discarded as
//! warmup, how many samples are collected and how many sweeps separate them.
//!
//! It also offers a few feature gated modules:
//! - running independent chains on multiple threads with the `parallel` feature.
//! - autocorrelation calculations on sampled blocks: use `autocorrelations`
//! - model and schedule serialization using serde with the `serialize` feature.
//!
//! # Checkerboard Example
//! ```
//! use blockgibbs::prelude::*;
//!
//! // A ring of 8 spins, ferromagnetic couplings.
//! let edges = (0..8).map(|i| ((i, (i + 1) % 8), 1.0)).collect::<Vec<_>>();
//! let model = IsingEBM::from_weighted_edges(8, &edges, vec![0.0; 8], 1.0).unwrap();
//!
//! // Even and odd spins share no edge, so each can be updated at once.
//! let even = Block::new((0..8).step_by(2).map(Node).collect()).unwrap();
//! let odd = Block::new((1..8).step_by(2).map(Node).collect()).unwrap();
//! let program = SamplingProgram::new(model, vec![even, odd], vec![]).unwrap();
//!
//! let schedule = SamplingSchedule::new(100, 10, 2).unwrap();
//! let (k_init, k_sample) = RngKey::new(0).split_two();
//! let init = hinton_init(k_init, program.model());
//!
//! let everything = Block::new(Node::range(8)).unwrap();
//! let samples = sample_states(k_sample, &program, &schedule, &init, &[], &[everything]).unwrap();
//! assert_eq!(samples[0].len(), 10);
//! assert_eq!(samples[0][0].len(), 8);
//! ```

/// Nodes and blocks of nodes.
pub mod block;
/// Pairwise spin models and starting states.
pub mod classical;
/// Error types.
pub mod errors;
/// Block gibbs sampling.
pub mod gibbs;
/// Splittable random keys.
pub mod rng;

/// Autocorrelations of sampled blocks.
#[cfg(feature = "autocorrelations")]
pub mod autocorrelations;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::block::{Block, Node};
    pub use crate::classical::{hinton_init, make_random_spin_state, Edge, IsingEBM, IsingParams};
    pub use crate::errors::*;
    pub use crate::gibbs::*;
    pub use crate::rng::RngKey;

    #[cfg(feature = "autocorrelations")]
    pub use crate::autocorrelations::*;
}
