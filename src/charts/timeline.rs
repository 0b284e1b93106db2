use super::{ChartId, Figure, FigureKind, TimePoint, TimeSeries};
use crate::data::model::PackageTable;

/// Total processing time per package, ordered by routed timestamp.
/// Packages routed at the same minute keep their file order.
pub fn processing_over_time(table: &PackageTable) -> Figure {
    let mut points: Vec<TimePoint> = table
        .records
        .iter()
        .map(|r| TimePoint {
            at: r.routed,
            value: r.total_hours,
        })
        .collect();
    points.sort_by_key(|p| p.at);

    Figure {
        id: ChartId::Timeline,
        title: "Processing Time Over Time".to_string(),
        kind: FigureKind::Line(TimeSeries {
            x_label: "Routed Date Time".to_string(),
            y_label: "Total Processing Time (hours)".to_string(),
            points,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table, ts};

    #[test]
    fn sorted_by_routed_timestamp_stably() {
        let t = table(vec![
            record("A", "01/03/2024 08:00", None, "01/03/2024 09:00"),
            record("B", "01/01/2024 08:00", None, "01/01/2024 10:00"),
            record("C", "01/03/2024 08:00", None, "01/03/2024 11:00"),
        ]);
        let FigureKind::Line(series) = processing_over_time(&t).kind else {
            panic!("expected a line chart");
        };
        let got: Vec<_> = series.points.iter().map(|p| (p.at, p.value)).collect();
        assert_eq!(
            got,
            vec![
                (ts("01/01/2024 08:00"), 2.0),
                (ts("01/03/2024 08:00"), 1.0),
                (ts("01/03/2024 08:00"), 3.0),
            ]
        );
    }
}
