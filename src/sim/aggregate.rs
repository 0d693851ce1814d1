//! Column-wise population statistics over driver schedules and trajectories.

use super::types::{
    Driver, EmptyPopulationError, HOURS_PER_DAY, ScheduleSummary, TrajectorySummary,
};

/// Aggregates per-driver schedules into the hourly plugged-in fraction and
/// the mean plug-in/out hours.
///
/// Mean hours are computed from the raw sampled minutes without wrapping
/// into one day, so an overnight population reports a mean plug-out hour
/// above 24. Pure function of its input.
///
/// # Errors
///
/// Returns `EmptyPopulationError` if `drivers` is empty.
pub fn aggregate_schedules(drivers: &[Driver]) -> Result<ScheduleSummary, EmptyPopulationError> {
    if drivers.is_empty() {
        return Err(EmptyPopulationError);
    }
    let n = drivers.len() as f32;

    let mut hourly_fraction = [0.0_f32; HOURS_PER_DAY];
    let mut plug_in_sum = 0.0_f32;
    let mut plug_out_sum = 0.0_f32;
    for driver in drivers {
        for (h, fraction) in hourly_fraction.iter_mut().enumerate() {
            *fraction += driver.schedule[h] as f32;
        }
        plug_in_sum += driver.plug_in_minute;
        plug_out_sum += driver.plug_out_minute;
    }
    for fraction in &mut hourly_fraction {
        *fraction /= n;
    }

    Ok(ScheduleSummary {
        hourly_fraction,
        mean_plug_in_hour: (plug_in_sum / n / 60.0).round() as i32,
        mean_plug_out_hour: (plug_out_sum / n / 60.0).round() as i32,
    })
}

/// Aggregates per-driver SoC trajectories into hourly mean and 5th/95th
/// percentile bands. Pure function of its input.
///
/// # Errors
///
/// Returns `EmptyPopulationError` if `drivers` is empty.
pub fn aggregate_trajectories(
    drivers: &[Driver],
) -> Result<TrajectorySummary, EmptyPopulationError> {
    if drivers.is_empty() {
        return Err(EmptyPopulationError);
    }

    let mut mean = [0.0_f32; HOURS_PER_DAY];
    let mut p5 = [0.0_f32; HOURS_PER_DAY];
    let mut p95 = [0.0_f32; HOURS_PER_DAY];
    let mut column = Vec::with_capacity(drivers.len());

    for h in 0..HOURS_PER_DAY {
        column.clear();
        column.extend(drivers.iter().map(|d| d.soc_trajectory[h]));
        column.sort_by(f32::total_cmp);

        mean[h] = column.iter().sum::<f32>() / column.len() as f32;
        p5[h] = percentile(&column, 5.0);
        p95[h] = percentile(&column, 95.0);
    }

    Ok(TrajectorySummary { mean, p5, p95 })
}

/// Percentile of a sorted sample with linear interpolation between order
/// statistics.
fn percentile(sorted: &[f32], p: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_with(schedule: [u8; HOURS_PER_DAY], soc: f32, times: (f32, f32)) -> Driver {
        Driver {
            id: format!("test-{soc}"),
            archetype: 0,
            plug_in_minute: times.0,
            plug_out_minute: times.1,
            schedule,
            soc_trajectory: [soc; HOURS_PER_DAY],
        }
    }

    #[test]
    fn empty_population_is_an_error() {
        assert_eq!(aggregate_schedules(&[]), Err(EmptyPopulationError));
        assert_eq!(aggregate_trajectories(&[]), Err(EmptyPopulationError));
    }

    #[test]
    fn hourly_fraction_is_column_mean() {
        let mut plugged = [0u8; HOURS_PER_DAY];
        plugged[20] = 1;
        let drivers = vec![
            driver_with(plugged, 0.5, (1140.0, 1860.0)),
            driver_with([0; HOURS_PER_DAY], 0.5, (1140.0, 1860.0)),
        ];
        let summary = aggregate_schedules(&drivers).expect("non-empty");
        assert_eq!(summary.hourly_fraction[20], 0.5);
        assert_eq!(summary.hourly_fraction[12], 0.0);
    }

    #[test]
    fn mean_hours_use_raw_unwrapped_minutes() {
        let drivers = vec![
            driver_with([0; HOURS_PER_DAY], 0.5, (1140.0, 1860.0)),
            driver_with([0; HOURS_PER_DAY], 0.5, (1260.0, 1980.0)),
        ];
        let summary = aggregate_schedules(&drivers).expect("non-empty");
        // (1140 + 1260) / 2 = 1200 minutes -> hour 20
        assert_eq!(summary.mean_plug_in_hour, 20);
        // (1860 + 1980) / 2 = 1920 minutes -> hour 32, past midnight and
        // deliberately not wrapped.
        assert_eq!(summary.mean_plug_out_hour, 32);
    }

    #[test]
    fn trajectory_mean_and_bands() {
        let drivers: Vec<Driver> = (1..=10)
            .map(|i| driver_with([0; HOURS_PER_DAY], i as f32 / 10.0, (0.0, 0.0)))
            .collect();
        let summary = aggregate_trajectories(&drivers).expect("non-empty");
        assert!((summary.mean[0] - 0.55).abs() < 1e-5);
        // Linear interpolation: rank 0.45 between 0.1 and 0.2.
        assert!((summary.p5[0] - 0.145).abs() < 1e-5);
        assert!((summary.p95[0] - 0.955).abs() < 1e-5);
        // Constant trajectories: every hour column is identical.
        assert_eq!(summary.mean[0], summary.mean[23]);
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let sorted = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(percentile(&sorted, 0.0), 0.0);
        assert_eq!(percentile(&sorted, 100.0), 3.0);
        assert_eq!(percentile(&sorted, 50.0), 1.5);
        assert_eq!(percentile(&[0.7], 5.0), 0.7);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let drivers = vec![
            driver_with([1; HOURS_PER_DAY], 0.4, (600.0, 1200.0)),
            driver_with([0; HOURS_PER_DAY], 0.8, (660.0, 1100.0)),
        ];
        assert_eq!(aggregate_schedules(&drivers), aggregate_schedules(&drivers));
        assert_eq!(
            aggregate_trajectories(&drivers),
            aggregate_trajectories(&drivers)
        );
    }
}
