//! Stochastic demand simulation: schedules, charge paths, aggregates.

pub mod aggregate;
pub mod charge_path;
pub mod engine;
/// Per-driver plug-in/out schedule sampling.
pub mod schedule;
pub mod types;

pub use engine::DemandModel;
pub use types::{DemandSummary, Driver, EmptyPopulationError, SimParams};

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draws from `Normal(mean, std_dev)`; a zero deviation returns the mean.
pub(crate) fn sample_normal<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}
