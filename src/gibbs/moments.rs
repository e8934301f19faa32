use crate::block::Node;
use crate::classical::ising::{spin_value, Edge, IsingEBM};
use crate::errors::{BindingError, SamplingError};
use crate::gibbs::program::SamplingProgram;
use crate::gibbs::sampling::sample_with_observation;
use crate::gibbs::schedule::SamplingSchedule;
use crate::rng::RngKey;
use itertools::izip;

/// Running sums of `s_i` and `s_i s_j` (in the `{-1, +1}` encoding) over observed states.
#[derive(Debug, Clone)]
pub struct MomentAccumulator {
    first: Vec<usize>,
    second: Vec<(usize, usize)>,
    first_sums: Vec<f64>,
    second_sums: Vec<f64>,
    n_observed: usize,
}

impl MomentAccumulator {
    /// Track the first moments of `nodes` and the second moments of `pairs`.
    pub fn new(model: &IsingEBM, nodes: &[Node], pairs: &[Edge]) -> Result<Self, BindingError> {
        let first = nodes
            .iter()
            .map(|n| model.index_of(n))
            .collect::<Result<Vec<_>, _>>()?;
        let second = pairs
            .iter()
            .map(|(a, b)| Ok((model.index_of(a)?, model.index_of(b)?)))
            .collect::<Result<Vec<_>, BindingError>>()?;
        Ok(Self {
            first_sums: vec![0.0; first.len()],
            second_sums: vec![0.0; second.len()],
            first,
            second,
            n_observed: 0,
        })
    }

    /// Add a state to the sums.
    pub fn observe(mut self, state: &[bool]) -> Self {
        for (i, sum) in izip!(&self.first, &mut self.first_sums) {
            *sum += spin_value(state[*i]);
        }
        for ((a, b), sum) in izip!(&self.second, &mut self.second_sums) {
            *sum += spin_value(state[*a]) * spin_value(state[*b]);
        }
        self.n_observed += 1;
        self
    }

    /// Number of states observed.
    pub fn n_observed(&self) -> usize {
        self.n_observed
    }

    /// Unnormalized sums of first and second moments.
    pub fn sums(&self) -> (&[f64], &[f64]) {
        (&self.first_sums, &self.second_sums)
    }

    /// Mean first and second moments. Zero if nothing was observed.
    pub fn means(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.n_observed.max(1) as f64;
        (
            self.first_sums.iter().map(|s| s / n).collect(),
            self.second_sums.iter().map(|s| s / n).collect(),
        )
    }
}

/// Estimate `<s_i>` for each of `first_moment_nodes` and `<s_i s_j>` for each of
/// `second_moment_edges` from the samples of a single chain.
pub fn estimate_moments(
    key: RngKey,
    program: &SamplingProgram,
    schedule: &SamplingSchedule,
    init_state: &[bool],
    state_clamp: &[Vec<bool>],
    first_moment_nodes: &[Node],
    second_moment_edges: &[Edge],
) -> Result<(Vec<f64>, Vec<f64>), SamplingError> {
    let acc = MomentAccumulator::new(program.model(), first_moment_nodes, second_moment_edges)?;
    let acc = sample_with_observation(
        key,
        program,
        schedule,
        init_state,
        state_clamp,
        acc,
        |acc, state| acc.observe(state),
    )?;
    Ok(acc.means())
}
