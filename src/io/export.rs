//! CSV export for the hourly demand summary.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::{DemandSummary, HOURS_PER_DAY};

/// Column header for the hourly summary CSV.
const HEADER: &str = "hour,plug_in_fraction,soc_mean,soc_p5,soc_p95";

/// Exports the demand summary to a CSV file at the given path.
///
/// Writes a header row followed by one row per hour of day. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(summary: &DemandSummary, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(summary, buf)
}

/// Writes the demand summary as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(summary: &DemandSummary, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;
    for h in 0..HOURS_PER_DAY {
        wtr.write_record(&[
            h.to_string(),
            format!("{:.4}", summary.schedule.hourly_fraction[h]),
            format!("{:.4}", summary.soc.mean[h]),
            format!("{:.4}", summary.soc.p5[h]),
            format!("{:.4}", summary.soc.p95[h]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::sim::types::{ScheduleSummary, TrajectorySummary};

    use super::*;

    fn make_summary() -> DemandSummary {
        DemandSummary {
            schedule: ScheduleSummary {
                hourly_fraction: [0.25; HOURS_PER_DAY],
                mean_plug_in_hour: 19,
                mean_plug_out_hour: 31,
            },
            soc: TrajectorySummary {
                mean: [0.6; HOURS_PER_DAY],
                p5: [0.4; HOURS_PER_DAY],
                p95: [0.8; HOURS_PER_DAY],
            },
            drivers_simulated: 100,
        }
    }

    #[test]
    fn header_matches_schema() {
        let mut buf = Vec::new();
        write_csv(&make_summary(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(first_line, HEADER);
    }

    #[test]
    fn one_row_per_hour() {
        let mut buf = Vec::new();
        write_csv(&make_summary(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines = output.as_deref().unwrap_or("").lines().count();
        assert_eq!(lines, 1 + HOURS_PER_DAY);
    }

    #[test]
    fn deterministic_output() {
        let summary = make_summary();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&summary, &mut buf1).ok();
        write_csv(&summary, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&make_summary(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(5));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            for i in 1..5 {
                let val: Result<f32, _> = rec.as_ref().map(|r| r[i].parse()).unwrap();
                assert!(val.is_ok(), "column {i} should parse as f32");
            }
            row_count += 1;
        }
        assert_eq!(row_count, HOURS_PER_DAY);
    }
}
