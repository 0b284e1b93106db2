use serde::Serialize;

use super::{ChartId, Figure, FigureKind, Rgba};
use crate::data::model::PackageTable;

const LABELS: [&str; 5] = ["Arrived", "Sorting", "Storage", "Out for Delivery", "Delivered"];

const NODE_COLORS: [Rgba; 5] = [
    Rgba::rgb(0xFF, 0xD7, 0x00),
    Rgba::rgb(0x1E, 0x90, 0xFF),
    Rgba::rgb(0xFF, 0x45, 0x00),
    Rgba::rgb(0x32, 0xCD, 0x32),
    Rgba::rgb(0x94, 0x00, 0xD3),
];

/// Link endpoints, as indices into [`LABELS`].
const LINKS: [(usize, usize); 5] = [(0, 1), (1, 2), (1, 3), (2, 3), (2, 4)];

/// Fixed weights for the last three links.  They do not come from the
/// loaded data and are marked as placeholders in the figure.
const PLACEHOLDER_WEIGHTS: [f64; 3] = [4000.0, 3200.0, 1200.0];

// 60% opacity
const LINK_ALPHA: u8 = 153;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub label: String,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub color: Rgba,
    /// `true` when `value` is a fixed constant rather than derived from data.
    pub placeholder: bool,
}

/// Five-stage flow.  Arrived → Sorting carries the mean routed → stored
/// hours and Sorting → Storage the mean stored → delivered hours; the
/// remaining weights are constants.
pub fn package_flow(table: &PackageTable) -> Figure {
    let routed_to_stored = table.mean_of(|r| r.routed_to_stored_hours).unwrap_or(0.0);
    let stored_to_delivered = table.mean_of(|r| r.stored_to_delivered_hours).unwrap_or(0.0);

    let measured = [routed_to_stored, stored_to_delivered];
    let links = LINKS
        .iter()
        .enumerate()
        .map(|(i, &(source, target))| {
            let (value, placeholder) = match measured.get(i) {
                Some(&v) => (v, false),
                None => (PLACEHOLDER_WEIGHTS[i - measured.len()], true),
            };
            let Rgba(r, g, b, _) = NODE_COLORS[i];
            FlowLink {
                source,
                target,
                value,
                color: Rgba(r, g, b, LINK_ALPHA),
                placeholder,
            }
        })
        .collect();

    let nodes = LABELS
        .iter()
        .zip(NODE_COLORS)
        .map(|(label, color)| FlowNode {
            label: label.to_string(),
            color,
        })
        .collect();

    Figure {
        id: ChartId::Flow,
        title: "Real-time Package Flow".to_string(),
        kind: FigureKind::Flow(FlowDiagram { nodes, links }),
    }
}

impl FlowDiagram {
    /// Layout column of every node: the longest path from a source node.
    /// Nodes without outgoing links are pushed to the last column.
    pub fn node_columns(&self) -> Vec<usize> {
        let n = self.nodes.len();
        let mut column = vec![0usize; n];
        // Longest path by relaxation; at most n - 1 rounds in a DAG.
        for _ in 0..n {
            let mut changed = false;
            for link in &self.links {
                if link.source < n && link.target < n && column[link.target] < column[link.source] + 1 {
                    column[link.target] = column[link.source] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        let last = column.iter().copied().max().unwrap_or(0);
        for (i, col) in column.iter_mut().enumerate() {
            if !self.links.iter().any(|l| l.source == i) && self.links.iter().any(|l| l.target == i) {
                *col = last;
            }
        }
        column
    }

    /// Flow through each node: the larger of its incoming and outgoing sums.
    pub fn node_throughput(&self) -> Vec<f64> {
        let mut incoming = vec![0.0; self.nodes.len()];
        let mut outgoing = vec![0.0; self.nodes.len()];
        for link in &self.links {
            if let Some(v) = outgoing.get_mut(link.source) {
                *v += link.value.abs();
            }
            if let Some(v) = incoming.get_mut(link.target) {
                *v += link.value.abs();
            }
        }
        incoming
            .into_iter()
            .zip(outgoing)
            .map(|(i, o): (f64, f64)| i.max(o))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    fn diagram(table: &PackageTable) -> FlowDiagram {
        match package_flow(table).kind {
            FigureKind::Flow(d) => d,
            other => panic!("expected a flow diagram, got {other:?}"),
        }
    }

    #[test]
    fn first_two_links_carry_mean_intervals() {
        let t = table(vec![
            record("UPS", "01/01/2024 08:00", Some("01/01/2024 10:00"), "01/01/2024 14:00"),
            record("UPS", "01/01/2024 08:00", Some("01/01/2024 12:00"), "01/01/2024 14:00"),
        ]);
        let d = diagram(&t);

        assert_eq!(d.links[0].value, 3.0);
        assert_eq!(d.links[1].value, 3.0);
        assert!(!d.links[0].placeholder);
        assert!(!d.links[1].placeholder);
    }

    #[test]
    fn remaining_links_are_flagged_constants() {
        let d = diagram(&table(Vec::new()));
        let placeholders: Vec<(f64, bool)> = d.links[2..].iter().map(|l| (l.value, l.placeholder)).collect();
        assert_eq!(placeholders, vec![(4000.0, true), (3200.0, true), (1200.0, true)]);
        assert_eq!(d.links[0].value, 0.0);
    }

    #[test]
    fn stage_labels_and_links_are_fixed() {
        let d = diagram(&table(Vec::new()));
        let labels: Vec<&str> = d.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, LABELS);
        let ends: Vec<(usize, usize)> = d.links.iter().map(|l| (l.source, l.target)).collect();
        assert_eq!(ends, LINKS);
        assert!(d.links.iter().all(|l| l.color.3 == LINK_ALPHA));
    }

    #[test]
    fn columns_follow_longest_path() {
        let d = diagram(&table(Vec::new()));
        assert_eq!(d.node_columns(), vec![0, 1, 2, 3, 3]);
    }

    #[test]
    fn throughput_is_max_of_in_and_out() {
        let d = diagram(&table(Vec::new()));
        let t = d.node_throughput();
        // Storage: in 0.0, out 3200 + 1200
        assert_eq!(t[2], 4400.0);
        // Out for Delivery: in 4000 + 3200
        assert_eq!(t[3], 7200.0);
    }
}
