use chrono::NaiveDateTime;
use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::PackageTable;
use crate::data::pipeline::TIMESTAMP_FORMAT;

const FIXED_COLUMNS: [&str; 7] = [
    "Carrier",
    "Routed Date Time",
    "Stored Date Time",
    "Delivered Date Time",
    "Routed → Stored (h)",
    "Stored → Delivered (h)",
    "Total Processing Time (h)",
];

fn timestamp(t: &NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Read-only view of every record with its derived columns.
pub fn records_table(ui: &mut Ui, table: &PackageTable) {
    if table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No packages with a complete routed → delivered span.");
        });
        return;
    }

    let n_columns = FIXED_COLUMNS.len() + table.passthrough_columns.len();

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(90.0), n_columns)
            .header(22.0, |mut header| {
                for name in FIXED_COLUMNS
                    .iter()
                    .copied()
                    .chain(table.passthrough_columns.iter().map(String::as_str))
                {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let rec = &table.records[row.index()];
                    let fixed = [
                        rec.carrier.clone(),
                        timestamp(&rec.routed),
                        rec.stored.as_ref().map(timestamp).unwrap_or_default(),
                        timestamp(&rec.delivered),
                        format!("{:.2}", rec.routed_to_stored_hours),
                        format!("{:.2}", rec.stored_to_delivered_hours),
                        format!("{:.2}", rec.total_hours),
                    ];
                    for text in fixed.iter().chain(&rec.passthrough) {
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
