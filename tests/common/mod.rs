//! Shared test fixtures for integration tests.

use ev_demand_sim::population::{Archetype, ArchetypeTable};
use ev_demand_sim::sim::types::SimParams;

/// The reference commuter archetype: plug in 19:00, out 07:00, always plugs
/// in, 100% of the population.
pub fn commuter() -> Archetype {
    Archetype {
        name: "Commuter".to_string(),
        plug_in_minute: 1140,
        plug_out_minute: 420,
        plug_in_soc: 0.3,
        target_soc: 0.9,
        soc_requirement: 0.6,
        miles_per_year: 8000.0,
        efficiency_mi_per_kwh: 4.0,
        battery_kwh: 60.0,
        charger_kw: 7.0,
        plugin_frequency_per_day: 1.0,
        population_share: 100.0,
    }
}

/// A single-archetype table holding only the commuter.
pub fn commuter_table() -> ArchetypeTable {
    ArchetypeTable::new(vec![commuter()]).expect("commuter archetype is valid")
}

/// Deterministic parameters: 100 drivers, no time jitter, seed 42.
pub fn no_jitter_params() -> SimParams {
    SimParams::new(100, 0.0, 42)
}
