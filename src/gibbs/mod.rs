//! Block gibbs sampling: programs, schedules and the chains which run them.

pub use chain::*;
pub use chains::*;
pub use moments::*;
pub use program::*;
pub use sampling::*;
pub use schedule::*;

#[cfg(feature = "parallel")]
pub use chains::rayon_chains::*;

/// A single markov chain and the sweep which drives it.
pub mod chain;

/// Multiple independent chains.
pub mod chains;

/// Moment estimation from sampled states.
pub mod moments;

/// Binding a model to a partition of free and clamped blocks.
pub mod program;

/// High level sampling entry points.
pub mod sampling;

/// Warmup and thinning.
pub mod schedule;
