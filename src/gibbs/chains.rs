use crate::block::Block;
use crate::errors::SamplingError;
use crate::gibbs::program::SamplingProgram;
use crate::gibbs::sampling::{sample_states, BlockSamples};
use crate::gibbs::schedule::SamplingSchedule;
use crate::rng::RngKey;

/// Run one independent chain per initial state and sample `nodes_to_sample` from each.
///
/// Chain `k` runs on `key.split(init_states.len())[k]`, so a single chain reproduces
/// [`sample_states`] with the same key.
pub fn sample_chains(
    key: RngKey,
    program: &SamplingProgram,
    schedule: &SamplingSchedule,
    init_states: &[Vec<bool>],
    state_clamp: &[Vec<bool>],
    nodes_to_sample: &[Block],
) -> Result<Vec<Vec<BlockSamples>>, SamplingError> {
    key.split(init_states.len())
        .into_iter()
        .zip(init_states.iter())
        .map(|(k, init)| sample_states(k, program, schedule, init, state_clamp, nodes_to_sample))
        .collect()
}

/// Chains run across threads with rayon.
#[cfg(feature = "parallel")]
pub mod rayon_chains {
    use super::*;
    use rayon::prelude::*;

    /// Same as [`sample_chains`] but runs the chains in parallel. Results are identical.
    pub fn par_sample_chains(
        key: RngKey,
        program: &SamplingProgram,
        schedule: &SamplingSchedule,
        init_states: &[Vec<bool>],
        state_clamp: &[Vec<bool>],
        nodes_to_sample: &[Block],
    ) -> Result<Vec<Vec<BlockSamples>>, SamplingError> {
        key.split(init_states.len())
            .into_par_iter()
            .zip(init_states.par_iter())
            .map(|(k, init)| {
                sample_states(k, program, schedule, init, state_clamp, nodes_to_sample)
            })
            .collect()
    }

}
