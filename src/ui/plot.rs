use std::f32::consts::{FRAC_PI_2, TAU};

use chrono::DateTime;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::charts::{CategoryChart, Figure, FigureKind, Heatmap, Histogram, TimeSeries};
use crate::color::CarrierColors;
use crate::ui::flow;

const CHART_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Figure card
// ---------------------------------------------------------------------------

/// Render one figure inside a titled card.
pub fn figure_card(ui: &mut Ui, figure: &Figure, colors: &CarrierColors) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(RichText::new(&figure.title).strong());
        });
        ui.add_space(4.0);

        let id = format!("{:?}", figure.id);
        match &figure.kind {
            FigureKind::Flow(diagram) => flow::flow_diagram(ui, diagram),
            FigureKind::Bar(chart) => bar_chart(ui, &id, chart, colors),
            FigureKind::Pie(chart) => pie_chart(ui, chart, colors),
            FigureKind::Histogram(hist) => histogram(ui, &id, hist),
            FigureKind::Line(series) => line_chart(ui, &id, series),
            FigureKind::Heatmap(map) => heatmap(ui, map),
        }
    });
}

// ---------------------------------------------------------------------------
// egui_plot charts
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, id: &str, chart: &CategoryChart, colors: &CarrierColors) {
    let bars: Vec<Bar> = chart
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.value)
                .name(&c.name)
                .fill(colors.color_for(&c.name))
                .width(0.7)
        })
        .collect();

    let names: Vec<String> = chart.categories.iter().map(|c| c.name.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(chart.category_label.clone())
        .y_axis_label(chart.value_label.clone())
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn histogram(ui: &mut Ui, id: &str, hist: &Histogram) {
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.1} – {:.1} h", b.start, b.end))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(hist.value_label.clone())
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(0x1E, 0x90, 0xFF)));
        });
}

fn line_chart(ui: &mut Ui, id: &str, series: &TimeSeries) {
    let points: PlotPoints = series
        .points
        .iter()
        .map(|p| [p.at.and_utc().timestamp() as f64, p.value])
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
        .x_axis_formatter(|mark, _range| {
            DateTime::from_timestamp(mark.value as i64, 0)
                .map(|t| t.format("%m/%d %H:%M").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(&series.y_label)
                    .color(Color32::from_rgb(0x32, 0xCD, 0x32))
                    .width(1.5),
            );
        });
}

// ---------------------------------------------------------------------------
// Painter charts
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, chart: &CategoryChart, colors: &CarrierColors) {
    let (response, painter) = ui.allocate_painter(
        egui::vec2(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    let rect = response.rect;
    let text_color = ui.visuals().text_color();

    let total: f64 = chart.categories.iter().map(|c| c.value).sum();
    if total <= 0.0 {
        painter.text(rect.center(), Align2::CENTER_CENTER, "No data", FontId::proportional(16.0), text_color);
        return;
    }

    let radius = (rect.height() / 2.0 - 12.0).min(rect.width() * 0.3);
    let center = egui::pos2(rect.left() + radius + 12.0, rect.center().y);

    let mut start = -FRAC_PI_2;
    for (i, c) in chart.categories.iter().enumerate() {
        let share = (c.value / total) as f32;
        let sweep = share * TAU;
        let color = colors.color_for(&c.name);

        // Fan of thin triangles so large slices stay convex.
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let arc = |k: usize| -> Pos2 {
            let a = start + sweep * k as f32 / steps as f32;
            center + radius * egui::vec2(a.cos(), a.sin())
        };
        for k in 0..steps {
            painter.add(Shape::convex_polygon(vec![center, arc(k), arc(k + 1)], color, Stroke::NONE));
        }

        if share >= 0.04 {
            let mid = start + sweep / 2.0;
            let pos = center + radius * 0.65 * egui::vec2(mid.cos(), mid.sin());
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", share * 100.0),
                FontId::proportional(13.0),
                Color32::BLACK,
            );
        }

        // Legend
        let y = rect.top() + 16.0 + i as f32 * 20.0;
        let swatch = egui::Rect::from_center_size(
            egui::pos2(center.x + radius + 36.0, y),
            egui::vec2(12.0, 12.0),
        );
        painter.rect_filled(swatch, 2.0, color);
        painter.text(
            egui::pos2(swatch.right() + 8.0, y),
            Align2::LEFT_CENTER,
            format!("{} ({})", c.name, c.value),
            FontId::proportional(13.0),
            text_color,
        );

        start += sweep;
    }
}

fn heatmap(ui: &mut Ui, map: &Heatmap) {
    let (response, painter) = ui.allocate_painter(
        egui::vec2(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(11.0);

    let grid = egui::Rect::from_min_max(
        egui::pos2(rect.left() + 40.0, rect.top() + 8.0),
        egui::pos2(rect.right() - 8.0, rect.bottom() - 24.0),
    );
    let cols = map.x_labels.len().max(1);
    let rows = map.y_labels.len().max(1);
    let cell_w = grid.width() / cols as f32;
    let cell_h = grid.height() / rows as f32;

    let max = map
        .cells
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);

    for row in 0..rows {
        for col in 0..cols {
            let cell = egui::Rect::from_min_size(
                egui::pos2(grid.left() + col as f32 * cell_w, grid.top() + row as f32 * cell_h),
                egui::vec2(cell_w - 1.0, cell_h - 1.0),
            );
            let value = map.cells.get(row).and_then(|r| r.get(col)).copied();
            let fill = match value {
                Some(v) if max > 0.0 => heat_color((v / max) as f32),
                _ => Color32::from_gray(40),
            };
            painter.rect_filled(cell, 0.0, fill);
        }
    }

    for (row, label) in map.y_labels.iter().enumerate() {
        painter.text(
            egui::pos2(grid.left() - 6.0, grid.top() + (row as f32 + 0.5) * cell_h),
            Align2::RIGHT_CENTER,
            label,
            font.clone(),
            text_color,
        );
    }
    for (col, label) in map.x_labels.iter().enumerate() {
        painter.text(
            egui::pos2(grid.left() + (col as f32 + 0.5) * cell_w, grid.bottom() + 4.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            text_color,
        );
    }

    if let Some(note) = &map.note {
        painter.text(grid.center(), Align2::CENTER_CENTER, note, FontId::proportional(16.0), text_color);
    }
}

/// Dark blue → yellow for `t` in `[0, 1]`.
fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    Color32::from_rgb(
        (30.0 + 225.0 * t) as u8,
        (30.0 + 185.0 * t) as u8,
        (120.0 * (1.0 - t)) as u8,
    )
}
