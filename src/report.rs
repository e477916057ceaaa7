//! Console and CSV output of scenario timings.
//!
//! Timing tuples go to the given writer (stdout from the CLI); logs go to
//! stderr.

use crate::error::Result;
use crate::scenario::{lifecycle, ScenarioReport};
use crate::timing::{format_duration, format_rate, rate};
use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// `["label", 1.234567]`
pub fn format_tuple(label: &str, secs: f64) -> String {
    format!("[{:?}, {:.6}]", label, secs)
}

pub fn print_tuple<W: Write>(out: &mut W, label: &str, secs: f64) -> io::Result<()> {
    writeln!(out, "{}", format_tuple(label, secs))
}

pub fn print_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(80))
}

pub fn print_report<W: Write>(out: &mut W, report: &ScenarioReport) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        format!("{} over", report.scenario).bold(),
        report.transport.to_string().cyan().bold()
    )?;
    for timing in &report.timings {
        writeln!(
            out,
            "  {:.<40} {:>10} | {:>14} | {}",
            timing.step,
            format_duration(timing.elapsed),
            format_rate(timing.count, timing.elapsed),
            timing.count
        )?;
    }
    writeln!(out, "  {:.<40} {}", "total", format_duration(report.total).green())
}

/// Prints every report, one tuple per transport, then the speed-up of the
/// fastest transport over the slowest.
pub fn print_comparison<W: Write>(out: &mut W, reports: &[ScenarioReport]) -> io::Result<()> {
    for report in reports {
        print_report(out, report)?;
        writeln!(out)?;
    }

    writeln!(out, "{}", "=".repeat(80))?;
    for report in reports {
        print_tuple(out, report.transport.as_str(), report.total.as_secs_f64())?;
        print_separator(out)?;
    }

    if let Some((fastest, slowest)) = crate::scenario::compare::spread(reports) {
        let fast = fastest.total.as_secs_f64();
        if fast > 0.0 {
            writeln!(
                out,
                "{} is {:.2}x faster than {}",
                fastest.transport.as_str().green().bold(),
                slowest.total.as_secs_f64() / fast,
                slowest.transport.as_str().yellow()
            )?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    scenario: &'a str,
    transport: &'a str,
    step: &'a str,
    count: Option<u64>,
    elapsed_secs: f64,
    ops_per_sec: Option<f64>,
}

/// One row per timing, then a `total` row per report whose count is the
/// number of imported documents.
pub fn write_csv(path: &Path, reports: &[ScenarioReport]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for report in reports {
        for timing in &report.timings {
            writer.serialize(CsvRow {
                scenario: &report.scenario,
                transport: report.transport.as_str(),
                step: &timing.step,
                count: Some(timing.count),
                elapsed_secs: timing.elapsed.as_secs_f64(),
                ops_per_sec: Some(rate(timing.count, timing.elapsed)),
            })?;
        }

        let documents = report.timing(lifecycle::STEP_IMPORT).map(|t| t.count);
        writer.serialize(CsvRow {
            scenario: &report.scenario,
            transport: report.transport.as_str(),
            step: "total",
            count: documents,
            elapsed_secs: report.total.as_secs_f64(),
            ops_per_sec: documents.map(|docs| rate(docs, report.total)),
        })?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), "wrote CSV report");
    Ok(())
}
