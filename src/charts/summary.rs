use serde::Serialize;

use crate::data::model::PackageTable;

/// Headline numbers shown above the tabs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_packages: usize,
    /// Most frequent carrier; ties go to the smallest name.
    pub top_carrier: Option<String>,
    pub mean_total_hours: Option<f64>,
}

impl SummaryStats {
    pub fn compute(table: &PackageTable) -> Self {
        Self {
            total_packages: table.len(),
            top_carrier: table.carrier_counts().into_iter().next().map(|(c, _)| c),
            mean_total_hours: table.mean_of(|r| r.total_hours),
        }
    }

    pub fn top_carrier_text(&self) -> &str {
        self.top_carrier.as_deref().unwrap_or("n/a")
    }

    pub fn mean_total_text(&self) -> String {
        match self.mean_total_hours {
            Some(h) => format!("{h:.2} Hours"),
            None => "n/a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    #[test]
    fn count_mode_and_mean() {
        let t = table(vec![
            record("UPS", "01/01/2024 08:00", None, "01/01/2024 14:00"),
            record("FedEx", "01/01/2024 08:00", None, "01/01/2024 10:00"),
            record("UPS", "01/01/2024 14:00", None, "01/01/2024 08:00"),
        ]);
        let s = SummaryStats::compute(&t);
        assert_eq!(s.total_packages, 3);
        assert_eq!(s.top_carrier.as_deref(), Some("UPS"));
        // (6 + 2 - 6) / 3
        assert!((s.mean_total_hours.unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.mean_total_text(), "0.67 Hours");
    }

    #[test]
    fn mode_tie_goes_to_smallest_name() {
        let t = table(vec![
            record("USPS", "01/01/2024 08:00", None, "01/01/2024 09:00"),
            record("DHL", "01/01/2024 08:00", None, "01/01/2024 09:00"),
        ]);
        assert_eq!(SummaryStats::compute(&t).top_carrier_text(), "DHL");
    }

    #[test]
    fn empty_table_reports_na() {
        let s = SummaryStats::compute(&table(Vec::new()));
        assert_eq!(s.total_packages, 0);
        assert_eq!(s.top_carrier_text(), "n/a");
        assert_eq!(s.mean_total_text(), "n/a");
    }

    #[test]
    fn recomputation_is_identical() {
        let t = table(vec![record("UPS", "01/01/2024 08:00", None, "01/01/2024 09:30")]);
        assert_eq!(SummaryStats::compute(&t), SummaryStats::compute(&t));
    }
}
