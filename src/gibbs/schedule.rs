use crate::errors::ScheduleError;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How long to run a chain and how often to read it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SamplingSchedule {
    /// Number of sweeps to discard before collecting samples.
    pub n_warmup: usize,
    /// Number of samples to collect.
    pub n_samples: usize,
    /// Number of sweeps between collected samples.
    pub steps_per_sample: usize,
}

impl SamplingSchedule {
    /// Make a new schedule, fails if `n_samples` or `steps_per_sample` is zero or if the total
    /// number of sweeps overflows.
    pub fn new(
        n_warmup: usize,
        n_samples: usize,
        steps_per_sample: usize,
    ) -> Result<Self, ScheduleError> {
        let schedule = SamplingSchedule {
            n_warmup,
            n_samples,
            steps_per_sample,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the schedule can be run.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.n_samples < 1 {
            Err(ScheduleError::NoSamples)
        } else if self.steps_per_sample < 1 {
            Err(ScheduleError::NoStepsPerSample)
        } else if self.total_sweeps().is_none() {
            Err(ScheduleError::TooManySweeps)
        } else {
            Ok(())
        }
    }

    /// Total number of sweeps a run with this schedule takes, `None` on overflow.
    pub fn total_sweeps(&self) -> Option<usize> {
        self.n_samples
            .checked_mul(self.steps_per_sample)
            .and_then(|n| n.checked_add(self.n_warmup))
    }
}
