use crate::classical::ising::spin_value;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::FftPlanner;
use std::ops::DivAssign;

/// Autocorrelation of the samples of one block, as returned by
/// [`sample_states`](crate::gibbs::sample_states).
///
/// Entry `tau` is the normalized circular autocorrelation at lag `tau` averaged over the
/// nodes of the block. Nodes which never change (such as clamped nodes) are skipped.
pub fn spin_autocorrelation(block_samples: &[Vec<bool>], use_fft: bool) -> Vec<f64> {
    let samples = block_samples
        .iter()
        .map(|s| s.iter().cloned().map(spin_value).collect())
        .collect::<Vec<Vec<f64>>>();
    if use_fft {
        fft_autocorrelation(&samples)
    } else {
        naive_autocorrelation(&samples)
    }
}

/// Columns of `samples` with nonzero variance.
fn varying_columns(samples: &[Vec<f64>]) -> Vec<usize> {
    let n = samples.first().map(|s| s.len()).unwrap_or(0);
    (0..n)
        .filter(|i| samples.iter().any(|s| s[*i] != samples[0][*i]))
        .collect()
}

/// Autocorrelation by FFT, `samples[t][i]` is the value of variable `i` at time `t`.
pub fn fft_autocorrelation(samples: &[Vec<f64>]) -> Vec<f64> {
    let tmax = samples.len();
    let columns = varying_columns(samples);
    if columns.is_empty() {
        return vec![0.0; tmax];
    }
    let n = columns.len();

    let means = columns
        .iter()
        .map(|i| (0..tmax).map(|t| samples[t][*i]).sum::<f64>() / tmax as f64)
        .collect::<Vec<_>>();

    let mut input = columns
        .iter()
        .zip(means.iter())
        .map(|(i, mean)| {
            let mut v = (0..tmax)
                .map(|t| Complex::<f64>::new(samples[t][*i] - mean, 0.0))
                .collect::<Vec<Complex<f64>>>();
            let norm = v.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
            v.iter_mut().for_each(|c| c.div_assign(norm));
            v
        })
        .collect::<Vec<_>>();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(tmax);
    let ifft = planner.plan_fft_inverse(tmax);

    input.iter_mut().for_each(|v| {
        fft.process(v);
        v.iter_mut()
            .for_each(|c| *c = Complex::new(c.norm_sqr(), 0.0));
        ifft.process(v);
    });

    // The inverse transform is unnormalized, hence the extra factor of tmax.
    (0..tmax)
        .map(|t| {
            input
                .iter()
                .map(|v| v[t].re)
                .fold(f64::zero(), |acc, x| acc + x)
                / ((n * tmax) as f64)
        })
        .collect()
}

/// Autocorrelation by direct summation over all lags.
pub fn naive_autocorrelation(samples: &[Vec<f64>]) -> Vec<f64> {
    let tmax = samples.len();
    let columns = varying_columns(samples);
    if columns.is_empty() {
        return vec![0.0; tmax];
    }
    let n = columns.len();
    let mu = columns
        .iter()
        .map(|i| samples.iter().map(|sample| sample[*i]).sum::<f64>() / tmax as f64)
        .collect::<Vec<_>>();
    let norms = columns
        .iter()
        .zip(mu.iter())
        .map(|(i, m)| {
            samples
                .iter()
                .map(|sample| (sample[*i] - m).powi(2))
                .sum::<f64>()
        })
        .collect::<Vec<_>>();

    (0..tmax)
        .map(|tau| {
            columns
                .iter()
                .enumerate()
                .map(|(k, i)| {
                    let d = (0..tmax)
                        .map(|t| {
                            (samples[t][*i] - mu[k]) * (samples[(t + tau) % tmax][*i] - mu[k])
                        })
                        .sum::<f64>();
                    d / norms[k]
                })
                .sum::<f64>()
                / n as f64
        })
        .collect()
}
