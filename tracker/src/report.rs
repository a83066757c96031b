//! History and summary reports built on the moving average

use crate::average::MovingAverage;
use crate::config::OutputFormat;
use crate::db::{Database, Measurement};
use crate::error::ReportError;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub day: NaiveDate,
    pub value: f64,
    pub average: f64,
}

/// Runs one moving average over measurements already sorted by day.
///
/// The window is validated before anything is consumed, so an invalid window
/// never yields partial output.
pub fn moving_average(measurements: &[Measurement], window: i64) -> Result<Vec<ReportRow>, ReportError> {
    let mut engine = MovingAverage::new(window)?;
    Ok(measurements
        .iter()
        .map(|m| ReportRow {
            day: m.day,
            value: m.value,
            average: engine.consume(m.value),
        })
        .collect())
}

pub fn history(db: &Database, window: i64) -> Result<Vec<ReportRow>, ReportError> {
    let measurements = db.list_ordered()?;
    debug!("History over {} measurements, window {}", measurements.len(), window);
    moving_average(&measurements, window)
}

/// The latest measurement together with its trailing average.
pub fn summary(db: &Database, window: i64) -> Result<Option<ReportRow>, ReportError> {
    Ok(history(db, window)?.pop())
}

pub fn render_history(rows: &[ReportRow], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows),
        OutputFormat::Text => {
            let mut out = String::new();
            for row in rows {
                let _ = writeln!(out, "{}", format_row(row));
            }
            Ok(out)
        }
    }
}

pub fn render_summary(row: Option<&ReportRow>, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&row),
        OutputFormat::Text => Ok(match row {
            Some(row) => format!("{}\n", format_row(row)),
            None => "No measurements recorded yet.\n".to_string(),
        }),
    }
}

fn format_row(row: &ReportRow) -> String {
    format!("{}  {:>7.1}  {:>7.1}", row.day, row.value, row.average)
}
