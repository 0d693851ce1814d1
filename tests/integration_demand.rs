//! End-to-end simulation runs against the reference commuter scenario.

mod common;

use ev_demand_sim::population::ArchetypeTable;
use ev_demand_sim::sim::types::{EmptyPopulationError, SimParams};
use ev_demand_sim::sim::DemandModel;

#[test]
fn commuter_scenario_with_zero_jitter() {
    let model = DemandModel::new(common::commuter_table(), common::no_jitter_params());
    let summary = model.run().expect("100 drivers expected");

    assert_eq!(summary.drivers_simulated, 100);

    // Every driver samples the identical 19:00 -> 07:00 window, so the
    // fraction curve is saturated inside the window and empty outside it.
    assert_eq!(summary.schedule.hourly_fraction[20], 1.0);
    assert_eq!(summary.schedule.hourly_fraction[23], 1.0);
    assert_eq!(summary.schedule.hourly_fraction[12], 0.0);
    assert_eq!(summary.schedule.hourly_fraction[15], 0.0);

    // Raw sampled minutes: plug-in 1140 (hour 19), plug-out 1860 (hour 31,
    // unwrapped past midnight).
    assert_eq!(summary.schedule.mean_plug_in_hour, 19);
    assert_eq!(summary.schedule.mean_plug_out_hour, 31);
}

#[test]
fn soc_bands_are_ordered_and_in_range() {
    let model = DemandModel::new(
        ArchetypeTable::uk_default(),
        SimParams::new(500, 60.0, 42),
    );
    let summary = model.run().expect("population is non-empty");

    for h in 0..24 {
        let (p5, mean, p95) = (
            summary.soc.p5[h],
            summary.soc.mean[h],
            summary.soc.p95[h],
        );
        assert!(p5.is_finite() && mean.is_finite() && p95.is_finite());
        assert!((0.0..=1.0).contains(&p5));
        assert!((0.0..=1.0).contains(&p95));
        assert!(p5 <= mean + 1e-6, "hour {h}: p5 {p5} above mean {mean}");
        assert!(mean <= p95 + 1e-6, "hour {h}: mean {mean} above p95 {p95}");
    }
}

#[test]
fn commuter_soc_peaks_at_unplug() {
    let model = DemandModel::new(common::commuter_table(), common::no_jitter_params());
    let summary = model.run().expect("100 drivers expected");

    // Every driver unplugs at hour 7 holding the fixed 0.8 unplug SoC.
    assert!((summary.soc.mean[7] - 0.8).abs() < 1e-5);
    assert_eq!(summary.soc.p5[7], 0.8);
    assert_eq!(summary.soc.p95[7], 0.8);
    // Mid-afternoon, long after unplugging, the fleet sits below the peak.
    assert!(summary.soc.mean[15] < 0.8);
}

#[test]
fn fixed_seed_reproduces_the_full_summary() {
    let run = |seed| {
        DemandModel::new(ArchetypeTable::uk_default(), SimParams::new(400, 60.0, seed)).run()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn zero_population_surfaces_empty_population_error() {
    let model = DemandModel::new(common::commuter_table(), SimParams::new(0, 60.0, 42));
    assert_eq!(model.run(), Err(EmptyPopulationError));
}

#[test]
fn tiny_population_below_share_threshold_is_empty() {
    // 15% share of 5 drivers floors to zero drivers.
    let mut archetype = common::commuter();
    archetype.population_share = 15.0;
    let table = ArchetypeTable::new(vec![archetype]).expect("valid table");
    let model = DemandModel::new(table, SimParams::new(5, 0.0, 42));
    assert_eq!(model.run(), Err(EmptyPopulationError));
}

#[test]
fn rarely_plugging_population_still_summarizes() {
    let mut archetype = common::commuter();
    archetype.plugin_frequency_per_day = 0.4;
    let table = ArchetypeTable::new(vec![archetype]).expect("valid table");
    let model = DemandModel::new(table, SimParams::new(1000, 60.0, 42));
    let summary = model.run().expect("some drivers retained");

    assert!(summary.drivers_simulated < 1000);
    assert!(summary.drivers_simulated > 100);
}
