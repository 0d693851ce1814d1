//! Expands archetypes into individual drivers with sampled plug-in windows.

use rand::Rng;

use crate::population::ArchetypeTable;

use super::sample_normal;
use super::types::{Driver, HOURS_PER_DAY, SimParams};

/// Samples one day of plug-in schedules for the whole population.
///
/// Each archetype contributes `floor(population_size * share / 100)` drivers.
/// Per driver, plug-in time and dwell duration are drawn from Normal
/// distributions around the archetype's nominal window; archetypes with
/// `plugin_frequency_per_day < 1` then pass each driver through a Bernoulli
/// gate, so the returned population may be smaller than the nominal count.
/// An all-zero schedule (the sampled window never crosses an hour mark) is
/// retained; it becomes a pure-discharge day downstream.
///
/// Draws are consumed from the single `rng` stream in archetype order then
/// driver order; a discarded driver still consumes its time draws.
pub fn simulate_schedules<R: Rng>(
    rng: &mut R,
    table: &ArchetypeTable,
    params: &SimParams,
) -> Vec<Driver> {
    let mut drivers = Vec::new();
    for (index, archetype) in table.iter().enumerate() {
        let count = (params.population_size as f32 * archetype.population_share / 100.0)
            .floor() as usize;
        for i in 0..count {
            let plug_in = sample_normal(
                rng,
                archetype.plug_in_minute as f32,
                params.time_jitter_std_minutes,
            );
            let dwell = sample_normal(
                rng,
                archetype.nominal_dwell_minutes() as f32,
                params.time_jitter_std_minutes,
            );
            let plug_out = plug_in + dwell;

            if archetype.plugin_frequency_per_day < 1.0 {
                let u: f32 = rng.random();
                if u > archetype.plugin_frequency_per_day {
                    continue;
                }
            }

            drivers.push(Driver {
                id: format!("{}-{:04}", archetype.name, i),
                archetype: index,
                plug_in_minute: plug_in,
                plug_out_minute: plug_out,
                schedule: build_schedule(plug_in, plug_out),
                soc_trajectory: [0.0; HOURS_PER_DAY],
            });
        }
    }
    drivers
}

/// Marks the hours of one day covered by a sampled plug-in window.
///
/// Hour `j` covers minutes `[j*60, (j+1)*60)`. A window with
/// `plug_out < plug_in` wraps past midnight. Comparisons are strict: an
/// hour mark landing exactly on the plug-in or plug-out minute is not
/// counted as plugged in.
pub(crate) fn build_schedule(plug_in: f32, plug_out: f32) -> [u8; HOURS_PER_DAY] {
    let mut schedule = [0u8; HOURS_PER_DAY];
    for (j, slot) in schedule.iter_mut().enumerate() {
        let mark = (j * 60) as f32;
        let plugged = if plug_out < plug_in {
            mark > plug_in || mark < plug_out
        } else {
            plug_in < mark && mark < plug_out
        };
        if plugged {
            *slot = 1;
        }
    }
    schedule
}
