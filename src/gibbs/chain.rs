use crate::block::Block;
use crate::classical::ising::IsingEBM;
use crate::errors::{BindingError, ScheduleError};
use crate::gibbs::program::SamplingProgram;
use crate::gibbs::schedule::SamplingSchedule;
use crate::rng::RngKey;
use itertools::Itertools;
use rand::Rng;
use std::fmt::{Debug, Formatter};
use tracing::{debug, trace};

/// Where a chain is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPhase {
    /// Sweeps are being discarded.
    Warmup,
    /// Sweeps are being run and the state is read out every `steps_per_sample` sweeps.
    Sampling,
    /// All samples were collected.
    Done,
}

/// A single markov chain over the state of a [`SamplingProgram`].
///
/// The chain owns its state vector. Clamped nodes are set once on construction and never
/// touched again, background nodes keep their initial value.
pub struct GibbsChain<'a> {
    program: &'a SamplingProgram,
    state: Vec<bool>,
    phase: ChainPhase,
    n_sweeps: usize,
}

impl<'a> Debug for GibbsChain<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self
            .state
            .iter()
            .map(|b| if *b { "1" } else { "0" })
            .join("");
        let e = self.program.model().energy(&self.state).unwrap_or(f64::NAN);
        write!(f, "{:?}[{}]\t{}\t{}", self.phase, self.n_sweeps, s, e)
    }
}

impl<'a> GibbsChain<'a> {
    /// Start a chain from `init_state` (one value per model node) with the clamped blocks set
    /// to `state_clamp` (one value vector per clamped block).
    pub fn new(
        program: &'a SamplingProgram,
        init_state: &[bool],
        state_clamp: &[Vec<bool>],
    ) -> Result<Self, BindingError> {
        program.model().check_state(init_state)?;
        program.check_clamp(state_clamp)?;
        let mut state = init_state.to_vec();
        program
            .clamped_indices()
            .iter()
            .zip(state_clamp.iter())
            .for_each(|(indices, values)| {
                indices
                    .iter()
                    .zip(values.iter())
                    .for_each(|(i, v)| state[*i] = *v)
            });
        Ok(Self {
            program,
            state,
            phase: ChainPhase::Warmup,
            n_sweeps: 0,
        })
    }

    /// Update every free block once, in program order.
    pub fn sweep(&mut self, key: RngKey) {
        sample_blocks(key, self.program, &mut self.state);
        self.n_sweeps += 1;
    }

    /// The current state, one value per model node.
    pub fn state_ref(&self) -> &[bool] {
        &self.state
    }

    /// Take the current state.
    pub fn into_state(self) -> Vec<bool> {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    /// Number of sweeps taken so far.
    pub fn n_sweeps(&self) -> usize {
        self.n_sweeps
    }

    /// The current values of the nodes of `block`, in block order.
    pub fn project(&self, block: &Block) -> Result<Vec<bool>, BindingError> {
        let indices = self.program.resolve_block(block)?;
        Ok(project(&indices, &self.state))
    }

    /// Run a full schedule and fold `state_fold` over each collected state.
    ///
    /// `key` is split into a warmup key and a sampling key. The warmup key gives one key per
    /// warmup sweep, the sampling key one key per collected sample, and each of those one key
    /// per sweep in the round.
    pub fn run_measure<F, T>(
        &mut self,
        key: RngKey,
        schedule: &SamplingSchedule,
        init_t: T,
        mut state_fold: F,
    ) -> Result<T, ScheduleError>
    where
        F: FnMut(T, &[bool]) -> T,
    {
        schedule.validate()?;
        let (warmup_key, sample_key) = key.split_two();

        self.phase = ChainPhase::Warmup;
        debug!(n_warmup = schedule.n_warmup, "starting warmup");
        warmup_key
            .split(schedule.n_warmup)
            .into_iter()
            .for_each(|k| self.sweep(k));

        self.phase = ChainPhase::Sampling;
        debug!(
            n_samples = schedule.n_samples,
            steps_per_sample = schedule.steps_per_sample,
            "starting sampling"
        );
        let mut acc = init_t;
        for (t, round_key) in sample_key.split(schedule.n_samples).into_iter().enumerate() {
            round_key
                .split(schedule.steps_per_sample)
                .into_iter()
                .for_each(|k| self.sweep(k));
            trace!(sample = t, sweeps = self.n_sweeps, "collected sample");
            acc = state_fold(acc, &self.state);
        }

        self.phase = ChainPhase::Done;
        debug!(sweeps = self.n_sweeps, "chain done");
        Ok(acc)
    }
}

/// Values of `state` at `indices`.
pub(crate) fn project(indices: &[usize], state: &[bool]) -> Vec<bool> {
    indices.iter().map(|i| state[*i]).collect()
}

/// Perform one sweep: update each free block of `program` in order, each with its own key.
pub fn sample_blocks(key: RngKey, program: &SamplingProgram, state: &mut [bool]) {
    let blocks = program.free_indices();
    key.split(blocks.len())
        .into_iter()
        .zip(blocks.iter())
        .for_each(|(k, block)| sample_single_block(k, program.model(), block, state));
}

/// Resample the nodes at `block` from their conditionals.
///
/// All probabilities are computed from the state as it is before the update, so nodes within
/// the block never see each other's new values. One uniform is drawn per node in block order.
pub fn sample_single_block(key: RngKey, model: &IsingEBM, block: &[usize], state: &mut [bool]) {
    let probs = block
        .iter()
        .map(|i| model.conditional_probability_at(*i, state))
        .collect::<Vec<_>>();
    let mut rng = key.rng();
    block
        .iter()
        .zip(probs.into_iter())
        .for_each(|(i, p)| state[*i] = rng.gen::<f64>() < p);
}

/// Run `n_iters` sweeps, one key per sweep split from `key`.
pub fn run_blocks(key: RngKey, program: &SamplingProgram, state: &mut [bool], n_iters: usize) {
    key.split(n_iters)
        .into_iter()
        .for_each(|k| sample_blocks(k, program, state));
}
