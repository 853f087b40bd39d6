//! Aggregation of extracted rates into the dated export table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::period::Period;

/// One successfully extracted bulletin rate. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "USD Mid Rate")]
    pub rate: f64,
}

/// Map an English month name to its calendar number.
pub fn month_number(name: &str) -> Option<u32> {
    match name {
        "January" => Some(1),
        "February" => Some(2),
        "March" => Some(3),
        "April" => Some(4),
        "May" => Some(5),
        "June" => Some(6),
        "July" => Some(7),
        "August" => Some(8),
        "September" => Some(9),
        "October" => Some(10),
        "November" => Some(11),
        "December" => Some(12),
        _ => None,
    }
}

/// In-memory rate table, appended to across the whole run and exported once.
///
/// Duplicate dates are appended as-is, not merged: the publisher has one
/// bulletin per day, so duplicates only arise from overlapping period
/// queries and are left visible rather than silently collapsed.
#[derive(Debug, Default)]
pub struct RateTable {
    records: Vec<RateRecord>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add one `(day label, rate)` pair for `period`, normalizing to an ISO
    /// `YYYY-MM-DD` date with a two-digit day. Pairs whose month name or day
    /// label cannot be resolved to a calendar date are skipped with a
    /// warning; the run continues.
    pub fn push(&mut self, period: &Period, day_label: &str, rate: f64) {
        let Some(month) = month_number(period.month) else {
            warn!(
                month = period.month,
                day = day_label,
                "could not determine month number, skipping record"
            );
            return;
        };
        let date = day_label
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|day| NaiveDate::from_ymd_opt(period.year, month, day));
        let Some(date) = date else {
            warn!(
                day = day_label,
                period = %period.title(),
                "day label is not a calendar day, skipping record"
            );
            return;
        };
        self.records.push(RateRecord {
            date: date.format("%Y-%m-%d").to_string(),
            rate,
        });
    }

    /// Sort ascending by date and write the two-column CSV to `path`.
    ///
    /// ISO date strings sort lexicographically in chronological order, so a
    /// plain string sort suffices. An empty table writes nothing and returns
    /// `None`, so a dry run never leaves an empty export behind.
    pub fn export_csv(&mut self, path: &Path) -> Result<Option<PathBuf>> {
        if self.records.is_empty() {
            return Ok(None);
        }
        // stable sort keeps duplicate dates in insertion order
        self.records.sort_by(|a, b| a.date.cmp(&b.date));

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush().context("flushing rate table")?;
        Ok(Some(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const APRIL_2024: Period = Period::new("April", 2024);

    #[test]
    fn day_label_is_zero_padded() {
        let mut table = RateTable::new();
        table.push(&APRIL_2024, "5", 40.0);
        table.push(&APRIL_2024, "05", 41.0);
        assert_eq!(table.records[0].date, "2024-04-05");
        assert_eq!(table.records[1].date, "2024-04-05");
    }

    #[test]
    fn unknown_month_is_skipped() {
        let mut table = RateTable::new();
        table.push(&Period::new("Avril", 2024), "5", 40.0);
        assert!(table.is_empty());
    }

    #[test]
    fn non_numeric_day_label_is_skipped() {
        let mut table = RateTable::new();
        table.push(&APRIL_2024, "Holiday", 40.0);
        table.push(&APRIL_2024, "32", 40.0);
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_dates_are_kept() {
        let mut table = RateTable::new();
        table.push(&APRIL_2024, "5", 40.0);
        table.push(&APRIL_2024, "5", 41.0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn export_sorts_by_date_ascending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.csv");

        let mut table = RateTable::new();
        table.push(&APRIL_2024, "10", 97.5);
        table.push(&APRIL_2024, "3", 97.2);
        let written = table.export_csv(&path).unwrap();
        assert_eq!(written, Some(path.clone()));

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Date,USD Mid Rate",
                "2024-04-03,97.2",
                "2024-04-10,97.5",
            ]
        );
    }

    #[test]
    fn empty_table_skips_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.csv");

        let mut table = RateTable::new();
        assert_eq!(table.export_csv(&path).unwrap(), None);
        assert!(!path.exists());
    }
}
