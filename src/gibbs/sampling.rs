use crate::block::Block;
use crate::errors::SamplingError;
use crate::gibbs::chain::{project, GibbsChain};
use crate::gibbs::program::SamplingProgram;
use crate::gibbs::schedule::SamplingSchedule;
use crate::rng::RngKey;
use tracing::instrument;

/// Samples of one block: `n_samples` value vectors aligned to the block's nodes.
pub type BlockSamples = Vec<Vec<bool>>;

/// Run a chain according to `schedule` and fold `observe` over every collected state.
///
/// `init_state` has one value per model node, `state_clamp` one value vector per clamped
/// block of `program`. The states handed to `observe` cover all model nodes.
#[instrument(
    skip_all,
    fields(
        n_warmup = schedule.n_warmup,
        n_samples = schedule.n_samples,
        steps_per_sample = schedule.steps_per_sample
    )
)]
pub fn sample_with_observation<F, T>(
    key: RngKey,
    program: &SamplingProgram,
    schedule: &SamplingSchedule,
    init_state: &[bool],
    state_clamp: &[Vec<bool>],
    init_carry: T,
    observe: F,
) -> Result<T, SamplingError>
where
    F: FnMut(T, &[bool]) -> T,
{
    schedule.validate()?;
    let mut chain = GibbsChain::new(program, init_state, state_clamp)?;
    let carry = chain.run_measure(key, schedule, init_carry, observe)?;
    Ok(carry)
}

/// Sample the nodes of each block in `nodes_to_sample`.
///
/// Returns one entry per requested block, in request order, each holding `n_samples` value
/// vectors in chain order.
pub fn sample_states(
    key: RngKey,
    program: &SamplingProgram,
    schedule: &SamplingSchedule,
    init_state: &[bool],
    state_clamp: &[Vec<bool>],
    nodes_to_sample: &[Block],
) -> Result<Vec<BlockSamples>, SamplingError> {
    let targets = nodes_to_sample
        .iter()
        .map(|b| program.resolve_block(b))
        .collect::<Result<Vec<_>, _>>()?;
    let acc = targets
        .iter()
        .map(|_| Vec::with_capacity(schedule.n_samples))
        .collect::<Vec<BlockSamples>>();
    sample_with_observation(
        key,
        program,
        schedule,
        init_state,
        state_clamp,
        acc,
        |mut acc, state| {
            acc.iter_mut()
                .zip(targets.iter())
                .for_each(|(samples, indices)| samples.push(project(indices, state)));
            acc
        },
    )
}
