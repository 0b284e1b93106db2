use eframe::egui::{self, epaint::CubicBezierShape, Align2, Color32, FontId, Rect, Sense, Stroke, Ui};

use crate::charts::FlowDiagram;
use crate::color::to_color32;

const HEIGHT: f32 = 440.0;
const NODE_WIDTH: f32 = 40.0;
const NODE_PAD: f32 = 15.0;
const MIN_NODE_HEIGHT: f32 = 4.0;

// ---------------------------------------------------------------------------
// Flow (Sankey) diagram
// ---------------------------------------------------------------------------

/// Place nodes in their layout columns, each as tall as its throughput.
fn node_rects(diagram: &FlowDiagram, area: Rect) -> Vec<Rect> {
    let columns = diagram.node_columns();
    let throughput = diagram.node_throughput();
    let n_cols = columns.iter().copied().max().map_or(1, |m| m + 1);

    // One scale for every column, fitted to the fullest column.
    let mut col_sum = vec![0.0_f64; n_cols];
    let mut col_count = vec![0usize; n_cols];
    for (&c, &t) in columns.iter().zip(&throughput) {
        col_sum[c] += t;
        col_count[c] += 1;
    }
    let scale = col_sum
        .iter()
        .zip(&col_count)
        .filter(|(sum, _)| **sum > 0.0)
        .map(|(sum, &n)| {
            let free = area.height() - NODE_PAD * n.saturating_sub(1) as f32;
            free.max(0.0) as f64 / sum
        })
        .fold(f64::INFINITY, f64::min);
    let scale = if scale.is_finite() { scale } else { 0.0 };

    let col_step = if n_cols > 1 {
        (area.width() - NODE_WIDTH) / (n_cols - 1) as f32
    } else {
        0.0
    };

    let mut cursor = vec![area.top(); n_cols];
    columns
        .iter()
        .zip(&throughput)
        .map(|(&c, &t)| {
            let h = ((t * scale) as f32).max(MIN_NODE_HEIGHT);
            let min = egui::pos2(area.left() + c as f32 * col_step, cursor[c]);
            cursor[c] += h + NODE_PAD;
            Rect::from_min_size(min, egui::vec2(NODE_WIDTH, h))
        })
        .collect()
}

pub fn flow_diagram(ui: &mut Ui, diagram: &FlowDiagram) {
    let (response, painter) = ui.allocate_painter(egui::vec2(ui.available_width(), HEIGHT), Sense::hover());
    let area = response.rect.shrink2(egui::vec2(90.0, 10.0));
    let rects = node_rects(diagram, area);
    let text_color = ui.visuals().text_color();

    let throughput = diagram.node_throughput();
    let mut out_offset = vec![0.0_f32; rects.len()];
    let mut in_offset = vec![0.0_f32; rects.len()];

    for link in &diagram.links {
        let (Some(src), Some(dst)) = (rects.get(link.source), rects.get(link.target)) else {
            continue;
        };
        let src_scale = scale_of(src, throughput[link.source]);
        let dst_scale = scale_of(dst, throughput[link.target]);
        let thickness = ((link.value.abs() * src_scale.min(dst_scale)) as f32).max(1.0);

        let y0 = src.top() + out_offset[link.source] + thickness / 2.0;
        let y1 = dst.top() + in_offset[link.target] + thickness / 2.0;
        out_offset[link.source] += thickness;
        in_offset[link.target] += thickness;

        let p0 = egui::pos2(src.right(), y0);
        let p3 = egui::pos2(dst.left(), y1);
        let mid_x = (p0.x + p3.x) / 2.0;
        let bezier = CubicBezierShape::from_points_stroke(
            [p0, egui::pos2(mid_x, y0), egui::pos2(mid_x, y1), p3],
            false,
            Color32::TRANSPARENT,
            Stroke::new(thickness, to_color32(link.color)),
        );
        painter.add(bezier);

        let label = if link.placeholder {
            format!("{:.0}*", link.value)
        } else {
            format!("{:.2} h", link.value)
        };
        painter.text(
            egui::pos2(mid_x, (y0 + y1) / 2.0),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(12.0),
            text_color,
        );
    }

    for (node, rect) in diagram.nodes.iter().zip(&rects) {
        painter.rect_filled(*rect, 0.0, to_color32(node.color));
        let (pos, align) = if rect.center().x < response.rect.center().x {
            (egui::pos2(rect.left() - 6.0, rect.center().y), Align2::RIGHT_CENTER)
        } else {
            (egui::pos2(rect.right() + 6.0, rect.center().y), Align2::LEFT_CENTER)
        };
        painter.text(pos, align, &node.label, FontId::proportional(16.0), text_color);
    }

    if diagram.links.iter().any(|l| l.placeholder) {
        ui.label(
            egui::RichText::new("* fixed placeholder weight, not derived from the loaded packages")
                .small()
                .italics(),
        );
    }
}

/// Pixels per unit of flow for a node.
fn scale_of(rect: &Rect, throughput: f64) -> f64 {
    if throughput > 0.0 {
        rect.height() as f64 / throughput
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{flow::package_flow, FigureKind};
    use crate::data::model::PackageTable;

    #[test]
    fn nodes_fit_inside_the_area() {
        let FigureKind::Flow(diagram) = package_flow(&PackageTable::default()).kind else {
            panic!("expected a flow diagram");
        };
        let area = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 400.0));
        let rects = node_rects(&diagram, area);

        assert_eq!(rects.len(), 5);
        for r in &rects {
            assert!(r.left() >= area.left() && r.right() <= area.right() + 0.01);
            assert!(r.top() >= area.top() && r.bottom() <= area.bottom() + MIN_NODE_HEIGHT);
        }
        // Source column on the left, sinks on the right.
        assert_eq!(rects[0].left(), 0.0);
        assert!((rects[4].right() - 800.0).abs() < 0.01);
        assert_eq!(rects[3].left(), rects[4].left());
    }
}
