use super::{Category, CategoryChart, ChartId, Figure, FigureKind, Histogram, HistogramBin};
use crate::data::model::PackageTable;

// ---------------------------------------------------------------------------
// Carrier share
// ---------------------------------------------------------------------------

fn carrier_categories(table: &PackageTable) -> CategoryChart {
    CategoryChart {
        category_label: "Carrier".to_string(),
        value_label: "Count".to_string(),
        categories: table
            .carrier_counts()
            .into_iter()
            .map(|(name, n)| Category {
                name,
                value: n as f64,
            })
            .collect(),
    }
}

pub fn carrier_bar(table: &PackageTable) -> Figure {
    Figure {
        id: ChartId::CarrierBar,
        title: "Carrier Distribution".to_string(),
        kind: FigureKind::Bar(carrier_categories(table)),
    }
}

pub fn carrier_pie(table: &PackageTable) -> Figure {
    Figure {
        id: ChartId::CarrierPie,
        title: "Package Volume by Carrier".to_string(),
        kind: FigureKind::Pie(carrier_categories(table)),
    }
}

// ---------------------------------------------------------------------------
// Processing-time histogram
// ---------------------------------------------------------------------------

pub fn processing_histogram(table: &PackageTable) -> Figure {
    let values: Vec<f64> = table.records.iter().map(|r| r.total_hours).collect();
    Figure {
        id: ChartId::Histogram,
        title: "Package Processing Histogram".to_string(),
        kind: FigureKind::Histogram(Histogram {
            value_label: "Total Processing Time (hours)".to_string(),
            bins: bin_values(&values, sturges_bins(values.len())),
        }),
    }
}

/// Sturges' rule: `ceil(log2 n) + 1`, at least one bin.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Split `values` into `bins` equal-width bins over their observed range.
/// A zero-width range becomes one bin of width 1 centred on the value.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
