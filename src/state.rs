use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::charts::summary::SummaryStats;
use crate::charts::{self, ChartId, Figure};
use crate::color::CarrierColors;
use crate::data::loader;
use crate::data::model::PackageTable;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    PackageFlow,
    StatisticalInsights,
    AdditionalInsights,
    HeatmapTrends,
    Records,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::PackageFlow,
        Tab::StatisticalInsights,
        Tab::AdditionalInsights,
        Tab::HeatmapTrends,
        Tab::Records,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::PackageFlow => "📦 Package Flow",
            Tab::StatisticalInsights => "📈 Statistical Insights",
            Tab::AdditionalInsights => "📊 Additional Insights",
            Tab::HeatmapTrends => "🔥 Heatmap & Trends",
            Tab::Records => "🗒 Records",
        }
    }

    /// Charts shown on this tab, left to right.
    pub fn charts(self) -> &'static [ChartId] {
        match self {
            Tab::PackageFlow => &[ChartId::Flow],
            Tab::StatisticalInsights => &[ChartId::CarrierBar, ChartId::Histogram],
            Tab::AdditionalInsights => &[ChartId::Timeline, ChartId::CarrierPie],
            Tab::HeatmapTrends => &[ChartId::PickupHeatmap],
            Tab::Records => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded package table; replaced wholesale, never edited.
    pub table: Arc<PackageTable>,

    /// File the table was loaded from.
    pub source: PathBuf,

    pub summary: SummaryStats,

    pub colors: CarrierColors,

    pub active_tab: Tab,

    /// Figures for `active_tab`, rebuilt on tab switch and on load.
    pub figures: Vec<Figure>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: PackageTable, source: PathBuf) -> Self {
        let mut state = Self {
            summary: SummaryStats::compute(&table),
            colors: CarrierColors::new(&table),
            table: Arc::new(table),
            source,
            active_tab: Tab::PackageFlow,
            figures: Vec::new(),
            status_message: None,
        };
        state.refresh_figures();
        state
    }

    /// Ingest a newly loaded table and rebuild everything derived from it.
    pub fn set_table(&mut self, table: PackageTable, source: PathBuf) {
        self.summary = SummaryStats::compute(&table);
        self.colors = CarrierColors::new(&table);
        self.table = Arc::new(table);
        self.source = source;
        self.status_message = None;
        self.refresh_figures();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.refresh_figures();
        }
    }

    /// Rerun the builders for the active tab.
    pub fn refresh_figures(&mut self) {
        let table = Arc::clone(&self.table);
        self.figures = self
            .active_tab
            .charts()
            .iter()
            .map(|id| id.build(&table))
            .collect();
        log::debug!("Built {} figure(s) for {:?}", self.figures.len(), self.active_tab);
    }

    /// Load another package file.  On failure the current table stays.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let table =
            loader::load_file(path).with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} packages from {} ({} of {} rows dropped)",
            table.len(),
            path.display(),
            table.report.rows_dropped,
            table.report.rows_read
        );
        self.set_table(table, path.to_path_buf());
        Ok(())
    }

    /// Log a failed file action and keep it for the status line.
    pub fn report_failure(&mut self, action: &str, err: &anyhow::Error) {
        log::error!("Failed to {action}: {err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    /// Write every chart description as pretty JSON.
    pub fn export_figures(&self, path: &Path) -> Result<()> {
        let figures = charts::build_all(&self.table);
        let json = serde_json::to_string_pretty(&figures).context("serializing figures")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} figures to {}", figures.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::fixtures::{record, table};

    fn state() -> AppState {
        AppState::new(
            table(vec![
                record("UPS", "01/01/2024 08:00", Some("01/01/2024 10:00"), "01/01/2024 14:00"),
                record("DHL", "01/02/2024 08:00", None, "01/02/2024 09:00"),
            ]),
            PathBuf::from("packages.csv"),
        )
    }

    #[test]
    fn starts_on_the_flow_tab() {
        let s = state();
        assert_eq!(s.active_tab, Tab::PackageFlow);
        assert_eq!(s.figures.len(), 1);
        assert_eq!(s.figures[0].id, ChartId::Flow);
        assert_eq!(s.summary.total_packages, 2);
    }

    #[test]
    fn switching_tabs_rebuilds_figures() {
        let mut s = state();
        s.select_tab(Tab::AdditionalInsights);
        let ids: Vec<ChartId> = s.figures.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![ChartId::Timeline, ChartId::CarrierPie]);

        s.select_tab(Tab::Records);
        assert!(s.figures.is_empty());
    }

    #[test]
    fn every_chart_sits_on_exactly_one_tab() {
        for id in ChartId::ALL {
            let n = Tab::ALL.iter().filter(|t| t.charts().contains(&id)).count();
            assert_eq!(n, 1, "{id:?}");
        }
    }

    #[test]
    fn failed_load_keeps_current_table() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        let err = s.load_path(&dir.path().join("missing.csv")).unwrap_err();
        assert_eq!(s.table.len(), 2);
        assert!(format!("{err:#}").contains("missing.csv"));
    }

    #[test]
    fn reported_failure_lands_in_the_status_line() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        let err = s.load_path(&dir.path().join("missing.csv")).unwrap_err();
        s.report_failure("load file", &err);

        let msg = s.status_message.as_deref().unwrap_or("");
        assert!(msg.starts_with("Error: loading"));
        assert!(msg.contains("missing.csv"));
    }

    #[test]
    fn successful_load_replaces_table() {
        let mut s = state();
        s.status_message = Some("stale".into());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Carrier,Routed Date Time,Stored Date Time,Delivered Date Time").unwrap();
        writeln!(file, "USPS,03/01/2024 08:00,,03/01/2024 20:00").unwrap();

        s.load_path(file.path()).unwrap();
        assert_eq!(s.table.len(), 1);
        assert_eq!(s.summary.top_carrier.as_deref(), Some("USPS"));
        assert_eq!(s.source.as_path(), file.path());
        assert!(s.status_message.is_none());
    }

    #[test]
    fn export_writes_all_figures() {
        let s = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures.json");
        s.export_figures(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json.as_array().map(|a| a.len()), Some(ChartId::ALL.len()));
    }
}
