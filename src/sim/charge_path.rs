//! Synthesizes a 24-hour SoC trajectory for one driver-day.
//!
//! Trajectories are built in a dwell-relative frame (position 0 = the hour
//! the driver plugs in, or plugs out for a no-charge day) and rotated into
//! hour-of-day order as a separate, final step. Keeping the two phases
//! explicit makes the modulo-24 arithmetic testable in isolation.

use rand::Rng;

use crate::population::Archetype;

use super::sample_normal;
use super::types::{Driver, HOURS_PER_DAY};

/// SoC the model assumes a driver reaches by the time they unplug.
const UNPLUG_SOC: f32 = 0.8;

/// Builds the driver's hourly SoC trajectory in hour-of-day order.
///
/// A driver whose sampled window never crosses an hour mark gets a pure
/// linear discharge day; anyone else gets a charge path built backward from
/// the plug-out instant. Values are clamped into `[0, 1]` after
/// construction.
pub fn synthesize_charge_path<R: Rng>(
    rng: &mut R,
    archetype: &Archetype,
    driver: &Driver,
) -> [f32; HOURS_PER_DAY] {
    let path = if driver.plugs_in_today() {
        charging_day_path(rng, archetype, driver)
    } else {
        discharge_only_path(rng, archetype)
    };
    path.map(|soc| soc.clamp(0.0, 1.0))
}

/// Case: the driver does not plug in today.
///
/// The day starts `k` in 1..=4 days since the last charge and discharges
/// linearly at the archetype's average hourly rate. Built in
/// hours-since-plug-out order, then rotated so position 0 lands on the
/// archetype's nominal plug-out hour.
fn discharge_only_path<R: Rng>(rng: &mut R, archetype: &Archetype) -> [f32; HOURS_PER_DAY] {
    let daily_discharge = archetype.avg_daily_discharge();
    let hourly_discharge = daily_discharge / HOURS_PER_DAY as f32;
    let days_since_charge = rng.random_range(1.0_f32..4.0).round();

    let start = archetype.target_soc - days_since_charge * daily_discharge;
    let mut dwell = [0.0_f32; HOURS_PER_DAY];
    for (i, soc) in dwell.iter_mut().enumerate() {
        *soc = start - i as f32 * hourly_discharge;
    }

    let plug_out_hour = (archetype.plug_out_minute / 60) as usize % HOURS_PER_DAY;
    rotate_to_clock(&dwell, plug_out_hour)
}

/// Case: the driver has a plug-in window today.
fn charging_day_path<R: Rng>(
    rng: &mut R,
    archetype: &Archetype,
    driver: &Driver,
) -> [f32; HOURS_PER_DAY] {
    let plug_in_hour = clock_hour(driver.plug_in_minute);
    let plug_out_hour = clock_hour(driver.plug_out_minute);
    let (dwell, _) = build_dwell_path(rng, archetype, plug_in_hour, plug_out_hour);
    rotate_to_clock(&dwell, plug_in_hour)
}

/// Builds the dwell-relative trajectory and returns it with its end index.
///
/// Position 0 is the plug-in hour. The trajectory is seeded at `UNPLUG_SOC`
/// on the plug-out position, walked backward with clamped stochastic charge
/// increments down to a randomized plug-in SoC floor, then walked forward
/// from the plug-out position with clamped discharge decrements.
fn build_dwell_path<R: Rng>(
    rng: &mut R,
    archetype: &Archetype,
    plug_in_hour: usize,
    plug_out_hour: usize,
) -> ([f32; HOURS_PER_DAY], usize) {
    let end_index = if plug_out_hour >= plug_in_hour {
        plug_out_hour
    } else {
        plug_out_hour + HOURS_PER_DAY - plug_in_hour
    };

    let max_rise = archetype.max_soc_rise_per_hour();
    let charge_duration = end_index.max(1) as f32;
    let rise_factor = sample_normal(rng, max_rise, max_rise / 2.0);
    // Deliberate: only plug_in_soc is divided by the duration here.
    let required_rate = archetype.target_soc - archetype.plug_in_soc / charge_duration;
    let mean_rise = (max_rise * rise_factor).min(max_rise).max(required_rate).max(0.0);
    let std_dev = mean_rise / 3.0;
    let soc_floor = sample_normal(rng, archetype.plug_in_soc, 0.05);

    let mut path = [0.0_f32; HOURS_PER_DAY];
    path[end_index] = UNPLUG_SOC;
    let mut current = UNPLUG_SOC;

    // Backward from plug-out: subtracting in reverse is charging forward.
    for i in (0..end_index).rev() {
        if current - max_rise > soc_floor {
            let rise = sample_normal(rng, mean_rise, std_dev).clamp(0.0, max_rise);
            current -= rise;
        } else {
            current = soc_floor;
        }
        path[i] = current;
    }

    // Forward from plug-out: driving and idle discharge until midnight of
    // the dwell-relative day.
    let daily_discharge = archetype.avg_daily_discharge();
    let max_fall = archetype.max_discharge_per_hour();
    let tail_hours = (HOURS_PER_DAY - end_index) as f32;
    for i in end_index + 1..HOURS_PER_DAY {
        let fall =
            (sample_normal(rng, daily_discharge, std_dev) / tail_hours).clamp(0.0, max_fall);
        path[i] = path[i - 1] - fall;
    }

    (path, end_index)
}

/// Reduces a raw sampled minute value to an hour of day in `0..24`.
fn clock_hour(minute: f32) -> usize {
    ((minute / 60.0).floor() as i64).rem_euclid(HOURS_PER_DAY as i64) as usize
}

/// Maps a dwell-relative array into hour-of-day order: the element at dwell
/// index `i` lands at hour `(start_hour + i) mod 24`.
fn rotate_to_clock(dwell: &[f32; HOURS_PER_DAY], start_hour: usize) -> [f32; HOURS_PER_DAY] {
    let mut clock = [0.0_f32; HOURS_PER_DAY];
    for (i, &soc) in dwell.iter().enumerate() {
        clock[(start_hour + i) % HOURS_PER_DAY] = soc;
    }
    clock
}
