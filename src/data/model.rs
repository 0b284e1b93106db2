use std::collections::BTreeMap;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// PackageRecord – one row of the normalised table
// ---------------------------------------------------------------------------

/// A single package lifecycle after parsing, filtering and zero filling.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    pub carrier: String,
    pub routed: NaiveDateTime,
    /// `None` when the source cell was blank or unparseable.
    pub stored: Option<NaiveDateTime>,
    pub delivered: NaiveDateTime,
    /// `0.0` when `stored` is missing.
    pub routed_to_stored_hours: f64,
    /// `0.0` when `stored` is missing.
    pub stored_to_delivered_hours: f64,
    /// May be negative: inverted spans are kept as-is.
    pub total_hours: f64,
    /// Values of the non-lifecycle columns, aligned with
    /// [`PackageTable::passthrough_columns`].
    pub passthrough: Vec<String>,
}

// ---------------------------------------------------------------------------
// LoadReport – what the pipeline did to the file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Data rows in the file.
    pub rows_read: usize,
    /// Rows removed for lacking a routed or delivered timestamp.
    pub rows_dropped: usize,
    /// Per timestamp column: non-blank cells that failed to parse.
    pub unparsed: BTreeMap<String, usize>,
}

// ---------------------------------------------------------------------------
// PackageTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The normalised dataset.  Built once per loaded file and only read
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageTable {
    /// Records in file order.
    pub records: Vec<PackageRecord>,
    /// Names of the columns carried through untouched.
    pub passthrough_columns: Vec<String>,
    pub report: LoadReport,
}

impl PackageTable {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records per carrier, most frequent first.  Equal counts are ordered by
    /// carrier name so repeated calls agree.
    pub fn carrier_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for rec in &self.records {
            *counts.entry(rec.carrier.as_str()).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(carrier, n)| (carrier.to_string(), n))
            .collect();
        // BTreeMap order is by name, and sort_by is stable.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Mean of a per-record value, `None` for an empty table.
    pub fn mean_of(&self, value: impl Fn(&PackageRecord) -> f64) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: f64 = self.records.iter().map(value).sum();
        Some(sum / self.records.len() as f64)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{record, table};

    #[test]
    fn carrier_counts_orders_by_count_then_name() {
        let t = table(vec![
            record("USPS", "01/01/2024 08:00", None, "01/01/2024 09:00"),
            record("UPS", "01/01/2024 08:00", None, "01/01/2024 09:00"),
            record("FedEx", "01/01/2024 08:00", None, "01/01/2024 09:00"),
            record("UPS", "01/01/2024 08:00", None, "01/01/2024 09:00"),
        ]);
        assert_eq!(
            t.carrier_counts(),
            vec![
                ("UPS".to_string(), 2),
                ("FedEx".to_string(), 1),
                ("USPS".to_string(), 1),
            ]
        );
    }

    #[test]
    fn mean_of_empty_table_is_none() {
        assert_eq!(table(Vec::new()).mean_of(|r| r.total_hours), None);
    }

    #[test]
    fn mean_of_total_hours() {
        let t = table(vec![
            record("UPS", "01/01/2024 08:00", None, "01/01/2024 10:00"),
            record("UPS", "01/01/2024 08:00", None, "01/01/2024 12:00"),
        ]);
        assert_eq!(t.mean_of(|r| r.total_hours), Some(3.0));
    }
}
