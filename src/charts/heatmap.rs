use serde::Serialize;

use super::{ChartId, Figure, FigureKind};
use crate::data::model::PackageTable;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    /// Hour of day, `00`..`23`.
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// Row-major, `y_labels.len()` rows of `x_labels.len()` cells.  Empty
    /// when there is nothing to plot.
    pub cells: Vec<Vec<f64>>,
    pub note: Option<String>,
}

/// Pickup pattern grid.  The package export carries no pickup timestamps,
/// so the grid is returned with its axes only.
pub fn pickup_heatmap(_table: &PackageTable) -> Figure {
    Figure {
        id: ChartId::PickupHeatmap,
        title: "Package Pickup Heatmap".to_string(),
        kind: FigureKind::Heatmap(Heatmap {
            x_labels: (0..24).map(|h| format!("{h:02}")).collect(),
            y_labels: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            cells: Vec::new(),
            note: Some("Pickup times are not part of the package export yet.".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    #[test]
    fn heatmap_has_axes_but_no_cells() {
        let t = table(vec![record("UPS", "01/01/2024 08:00", None, "01/01/2024 09:00")]);
        let FigureKind::Heatmap(h) = pickup_heatmap(&t).kind else {
            panic!("expected a heatmap");
        };
        assert_eq!(h.x_labels.len(), 24);
        assert_eq!(h.x_labels[0], "00");
        assert_eq!(h.y_labels.len(), 7);
        assert!(h.cells.is_empty());
        assert!(h.note.is_some());
    }
}
