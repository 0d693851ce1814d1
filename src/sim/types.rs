//! Core simulation types: parameters, drivers, and population summaries.

use std::error::Error;
use std::fmt;

use serde::Serialize;

/// Hourly resolution of one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Invocation parameters for one simulation run.
///
/// # Examples
///
/// ```
/// use ev_demand_sim::sim::types::SimParams;
///
/// let params = SimParams::new(1000, 60.0, 42);
/// assert_eq!(params.population_size, 1000);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimParams {
    /// Total population size before archetype shares are applied.
    pub population_size: u32,
    /// Standard deviation of the plug-in/out time jitter, minutes.
    pub time_jitter_std_minutes: f32,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimParams {
    /// Default plug-in/out time jitter, minutes.
    pub const DEFAULT_JITTER_STD_MINUTES: f32 = 60.0;

    /// Creates simulation parameters.
    ///
    /// # Panics
    ///
    /// Panics if `time_jitter_std_minutes` is negative or not finite.
    pub fn new(population_size: u32, time_jitter_std_minutes: f32, seed: u64) -> Self {
        assert!(
            time_jitter_std_minutes.is_finite() && time_jitter_std_minutes >= 0.0,
            "time_jitter_std_minutes must be finite and >= 0"
        );
        Self {
            population_size,
            time_jitter_std_minutes,
            seed,
        }
    }
}

/// One synthetic driver-day, alive for the duration of a single run.
///
/// Sampled times are raw minute-of-day values and may fall outside
/// `[0, 1440)`; schedule and trajectory logic apply modulo-24-hour
/// reasoning where needed.
#[derive(Debug, Clone)]
pub struct Driver {
    /// Unique, deterministic per-run identifier.
    pub id: String,
    /// Index of this driver's archetype in the source table.
    pub archetype: usize,
    /// Sampled plug-in time, minutes.
    pub plug_in_minute: f32,
    /// Sampled plug-out time, minutes.
    pub plug_out_minute: f32,
    /// Hourly plugged-in indicator; index 0 = hour [00:00, 01:00).
    pub schedule: [u8; HOURS_PER_DAY],
    /// Hourly estimated SoC, fractions in [0, 1].
    pub soc_trajectory: [f32; HOURS_PER_DAY],
}

impl Driver {
    /// Whether any hour of this driver's day is spent plugged in.
    pub fn plugs_in_today(&self) -> bool {
        self.schedule.iter().any(|&h| h == 1)
    }
}

/// Population-level plug-in schedule statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    /// Fraction of retained drivers plugged in, per hour of day.
    pub hourly_fraction: [f32; HOURS_PER_DAY],
    /// Mean sampled plug-in time, rounded to the nearest hour. Raw sampled
    /// minutes are averaged without wrapping, so large jitter can push this
    /// outside [0, 24).
    pub mean_plug_in_hour: i32,
    /// Mean sampled plug-out time, rounded to the nearest hour (unwrapped,
    /// as above; an overnight dwell yields values above 24).
    pub mean_plug_out_hour: i32,
}

/// Population-level SoC trajectory statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySummary {
    /// Mean SoC per hour of day.
    pub mean: [f32; HOURS_PER_DAY],
    /// 5th percentile SoC per hour of day.
    pub p5: [f32; HOURS_PER_DAY],
    /// 95th percentile SoC per hour of day.
    pub p95: [f32; HOURS_PER_DAY],
}

/// Complete output of one simulation run, ready for charting or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSummary {
    /// Plug-in schedule statistics.
    pub schedule: ScheduleSummary,
    /// SoC trajectory statistics.
    pub soc: TrajectorySummary,
    /// Number of drivers retained after frequency gating.
    pub drivers_simulated: usize,
}

impl fmt::Display for DemandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Demand Summary ---")?;
        writeln!(f, "Drivers simulated:  {}", self.drivers_simulated)?;
        writeln!(f, "Mean plug-in hour:  {}", self.schedule.mean_plug_in_hour)?;
        writeln!(f, "Mean plug-out hour: {}", self.schedule.mean_plug_out_hour)?;
        writeln!(f, "hour  plugged_in  soc_mean  soc_p5  soc_p95")?;
        for h in 0..HOURS_PER_DAY {
            writeln!(
                f,
                "{:>4}  {:>10.3}  {:>8.3}  {:>6.3}  {:>7.3}",
                h,
                self.schedule.hourly_fraction[h],
                self.soc.mean[h],
                self.soc.p5[h],
                self.soc.p95[h],
            )?;
        }
        Ok(())
    }
}

/// An aggregation step received zero drivers.
///
/// Surfaced instead of returning zero-filled arrays, since a silently empty
/// result is indistinguishable from a real all-zero curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPopulationError;

impl fmt::Display for EmptyPopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no drivers were simulated; population too small or fully gated out")
    }
}

impl Error for EmptyPopulationError {}
