/// Chart builders: pure functions from the package table to a UI-agnostic
/// [`Figure`] description.  The UI decides how a figure is drawn.
pub mod distribution;
pub mod flow;
pub mod heatmap;
pub mod summary;
pub mod timeline;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::data::model::PackageTable;

pub use flow::FlowDiagram;
pub use heatmap::Heatmap;

// ---------------------------------------------------------------------------
// Chart identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Flow,
    CarrierBar,
    Histogram,
    Timeline,
    CarrierPie,
    PickupHeatmap,
}

impl ChartId {
    pub const ALL: [ChartId; 6] = [
        ChartId::Flow,
        ChartId::CarrierBar,
        ChartId::Histogram,
        ChartId::Timeline,
        ChartId::CarrierPie,
        ChartId::PickupHeatmap,
    ];

    /// The builder registered for this chart.
    pub fn builder(self) -> fn(&PackageTable) -> Figure {
        match self {
            ChartId::Flow => flow::package_flow,
            ChartId::CarrierBar => distribution::carrier_bar,
            ChartId::Histogram => distribution::processing_histogram,
            ChartId::Timeline => timeline::processing_over_time,
            ChartId::CarrierPie => distribution::carrier_pie,
            ChartId::PickupHeatmap => heatmap::pickup_heatmap,
        }
    }

    pub fn build(self, table: &PackageTable) -> Figure {
        (self.builder())(table)
    }
}

/// Build every chart, in [`ChartId::ALL`] order.
pub fn build_all(table: &PackageTable) -> Vec<Figure> {
    ChartId::ALL.iter().map(|id| id.build(table)).collect()
}

// ---------------------------------------------------------------------------
// Figure descriptions
// ---------------------------------------------------------------------------

/// An RGBA colour, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba(r, g, b, 255)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub id: ChartId,
    pub title: String,
    pub kind: FigureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FigureKind {
    Flow(FlowDiagram),
    Bar(CategoryChart),
    Pie(CategoryChart),
    Histogram(Histogram),
    Line(TimeSeries),
    Heatmap(Heatmap),
}

/// Counts per category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub category_label: String,
    pub value_label: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub value_label: String,
    pub bins: Vec<HistogramBin>,
}

/// Half-open `[start, end)`; the last bin also holds its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<TimePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint {
    pub at: NaiveDateTime,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    #[test]
    fn every_id_builds_its_own_figure() {
        let t = table(vec![record(
            "UPS",
            "01/01/2024 08:00",
            Some("01/01/2024 10:00"),
            "01/01/2024 14:00",
        )]);
        for fig in build_all(&t) {
            let kind_matches = matches!(
                (fig.id, &fig.kind),
                (ChartId::Flow, FigureKind::Flow(_))
                    | (ChartId::CarrierBar, FigureKind::Bar(_))
                    | (ChartId::Histogram, FigureKind::Histogram(_))
                    | (ChartId::Timeline, FigureKind::Line(_))
                    | (ChartId::CarrierPie, FigureKind::Pie(_))
                    | (ChartId::PickupHeatmap, FigureKind::Heatmap(_))
            );
            assert!(kind_matches, "{:?} built {:?}", fig.id, fig.kind);
        }
    }

    #[test]
    fn builders_are_pure() {
        let t = table(vec![
            record("UPS", "01/01/2024 08:00", Some("01/01/2024 10:00"), "01/01/2024 14:00"),
            record("DHL", "01/02/2024 08:00", None, "01/02/2024 09:00"),
        ]);
        assert_eq!(build_all(&t), build_all(&t));
    }

    #[test]
    fn empty_table_still_builds() {
        let figures = build_all(&table(Vec::new()));
        assert_eq!(figures.len(), ChartId::ALL.len());
    }

    #[test]
    fn figures_serialize_with_a_type_tag() {
        let t = table(vec![record("UPS", "01/01/2024 08:00", None, "01/01/2024 14:00")]);
        let json = serde_json::to_value(ChartId::CarrierPie.build(&t)).unwrap();
        assert_eq!(json["id"], "carrier_pie");
        assert_eq!(json["kind"]["type"], "pie");
        assert_eq!(json["kind"]["categories"][0]["name"], "UPS");
    }
}
