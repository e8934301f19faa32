use crate::classical::ising::{sigmoid, IsingEBM};
use crate::rng::RngKey;
use rand::prelude::*;

/// Randomly build a spin state.
pub fn make_random_spin_state<R: Rng>(n: usize, rng: &mut R) -> Vec<bool> {
    (0..n).map(|_| -> bool { rng.gen() }).collect()
}

/// Draw each spin independently from its bias alone, ignoring the couplings.
///
/// Node `i` is +1 with probability `sigmoid(beta * b_i)`.
pub fn hinton_init(key: RngKey, model: &IsingEBM) -> Vec<bool> {
    let mut rng = key.rng();
    model
        .biases()
        .iter()
        .map(|b| rng.gen::<f64>() < sigmoid(model.beta() * b))
        .collect()
}
