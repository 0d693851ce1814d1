//! API response and query types.
//!
//! Field names follow the summary CSV column layout for consistency across
//! export formats.

use serde::{Deserialize, Serialize};

use crate::sim::types::{DemandSummary, SimParams};

/// Combined response: run parameters and the full demand summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Run parameters used for this simulation.
    pub params: SimParams,
    /// Aggregated demand summary.
    pub summary: DemandSummary,
}

/// One hour of the aggregate demand curve.
#[derive(Debug, Serialize)]
pub struct CurvePoint {
    /// Hour of day, 0..24.
    pub hour: usize,
    /// Fraction of drivers plugged in during this hour.
    pub plug_in_fraction: f32,
    /// Mean SoC across drivers.
    pub soc_mean: f32,
    /// 5th percentile SoC.
    pub soc_p5: f32,
    /// 95th percentile SoC.
    pub soc_p95: f32,
}

impl CurvePoint {
    /// Extracts the record for one hour from the summary.
    pub fn from_summary(summary: &DemandSummary, hour: usize) -> Self {
        Self {
            hour,
            plug_in_fraction: summary.schedule.hourly_fraction[hour],
            soc_mean: summary.soc.mean[hour],
            soc_p5: summary.soc.p5[hour],
            soc_p95: summary.soc.p95[hour],
        }
    }
}

/// Optional hour-range filter for `/curve`.
#[derive(Debug, Deserialize)]
pub struct CurveQuery {
    /// First hour to include (inclusive).
    pub from: Option<usize>,
    /// Last hour to include (inclusive).
    pub to: Option<usize>,
}

/// Error payload for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}
