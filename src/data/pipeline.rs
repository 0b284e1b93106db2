use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::error::LoadError;
use super::loader::{RawTable, CARRIER, DELIVERED, ROUTED, STORED};
use super::model::{LoadReport, PackageRecord, PackageTable};

/// The only accepted timestamp layout: `MM/DD/YYYY HH:MM`, 24-hour clock.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

const FILL_TEXT: &str = "0";
const FILL_HOURS: f64 = 0.0;

// ---------------------------------------------------------------------------
// Stage rows
// ---------------------------------------------------------------------------

/// A raw row with its lifecycle cells parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedRow {
    pub carrier: Option<String>,
    pub routed: Option<NaiveDateTime>,
    pub stored: Option<NaiveDateTime>,
    pub delivered: Option<NaiveDateTime>,
    pub passthrough: Vec<Option<String>>,
}

/// A row with both ends of its lifecycle present.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteRow {
    pub carrier: Option<String>,
    pub routed: NaiveDateTime,
    pub stored: Option<NaiveDateTime>,
    pub delivered: NaiveDateTime,
    pub passthrough: Vec<Option<String>>,
}

/// A complete row with its durations.  Interval durations are missing when
/// the stored timestamp is.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub row: CompleteRow,
    pub routed_to_stored: Option<f64>,
    pub stored_to_delivered: Option<f64>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub rows: Vec<TimedRow>,
    pub passthrough_columns: Vec<String>,
    pub unparsed: BTreeMap<String, usize>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run every stage over a freshly read file.
pub fn build_table(raw: RawTable) -> Result<PackageTable, LoadError> {
    let rows_read = raw.rows.len();
    let normalized = normalize_timestamps(raw)?;
    for (column, n) in &normalized.unparsed {
        if *n > 0 {
            log::debug!("{n} unparseable values in '{column}'");
        }
    }

    let complete = retain_complete(normalized.rows);
    let rows_dropped = rows_read - complete.len();
    log::debug!("Dropped {rows_dropped} of {rows_read} rows without a complete lifecycle");

    let records = fill_missing(derive_durations(complete));

    Ok(PackageTable {
        records,
        passthrough_columns: normalized.passthrough_columns,
        report: LoadReport {
            rows_read,
            rows_dropped,
            unparsed: normalized.unparsed,
        },
    })
}

/// Parse a timestamp cell as read.  Anything not matching
/// [`TIMESTAMP_FORMAT`] exactly, surrounding whitespace included, is
/// treated as missing.
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    if cell.trim() != cell {
        return None;
    }
    NaiveDateTime::parse_from_str(cell, TIMESTAMP_FORMAT).ok()
}

/// Parse the three lifecycle columns and split off the passthrough ones.
pub fn normalize_timestamps(raw: RawTable) -> Result<Normalized, LoadError> {
    let carrier_idx = raw.require(CARRIER)?;
    let lifecycle = [
        (ROUTED, raw.require(ROUTED)?),
        (STORED, raw.require(STORED)?),
        (DELIVERED, raw.require(DELIVERED)?),
    ];

    let reserved = [carrier_idx, lifecycle[0].1, lifecycle[1].1, lifecycle[2].1];
    let passthrough_idx: Vec<usize> = (0..raw.headers.len())
        .filter(|i| !reserved.contains(i))
        .collect();
    let passthrough_columns = passthrough_idx
        .iter()
        .map(|&i| raw.headers[i].clone())
        .collect();

    let mut unparsed: BTreeMap<String, usize> = lifecycle
        .iter()
        .map(|(name, _)| (name.to_string(), 0))
        .collect();

    let rows = raw
        .rows
        .into_iter()
        .map(|mut cells| {
            let mut parsed = [None; 3];
            for (slot, (name, idx)) in parsed.iter_mut().zip(&lifecycle) {
                if let Some(text) = &cells[*idx] {
                    *slot = parse_timestamp(text);
                    if slot.is_none() {
                        *unparsed.entry(name.to_string()).or_default() += 1;
                    }
                }
            }
            let [routed, stored, delivered] = parsed;
            TimedRow {
                carrier: cells[carrier_idx].take(),
                routed,
                stored,
                delivered,
                passthrough: passthrough_idx.iter().map(|&i| cells[i].take()).collect(),
            }
        })
        .collect();

    Ok(Normalized {
        rows,
        passthrough_columns,
        unparsed,
    })
}

/// Keep rows with both a routed and a delivered timestamp.
pub fn retain_complete(rows: Vec<TimedRow>) -> Vec<CompleteRow> {
    rows.into_iter()
        .filter_map(|r| {
            Some(CompleteRow {
                routed: r.routed?,
                delivered: r.delivered?,
                carrier: r.carrier,
                stored: r.stored,
                passthrough: r.passthrough,
            })
        })
        .collect()
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// Compute interval and total durations in hours.  Negative spans are kept.
pub fn derive_durations(rows: Vec<CompleteRow>) -> Vec<DerivedRow> {
    rows.into_iter()
        .map(|row| DerivedRow {
            routed_to_stored: row.stored.map(|s| hours_between(row.routed, s)),
            stored_to_delivered: row.stored.map(|s| hours_between(s, row.delivered)),
            total: hours_between(row.routed, row.delivered),
            row,
        })
        .collect()
}

/// Replace every remaining missing value with zero: `0.0` for durations,
/// `"0"` for text cells.
pub fn fill_missing(rows: Vec<DerivedRow>) -> Vec<PackageRecord> {
    rows.into_iter()
        .map(|d| PackageRecord {
            carrier: d.row.carrier.unwrap_or_else(|| FILL_TEXT.to_string()),
            routed: d.row.routed,
            stored: d.row.stored,
            delivered: d.row.delivered,
            routed_to_stored_hours: d.routed_to_stored.unwrap_or(FILL_HOURS),
            stored_to_delivered_hours: d.stored_to_delivered.unwrap_or(FILL_HOURS),
            total_hours: d.total,
            passthrough: d
                .row
                .passthrough
                .into_iter()
                .map(|c| c.unwrap_or_else(|| FILL_TEXT.to_string()))
                .collect(),
        })
        .collect()
}
