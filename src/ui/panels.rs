use eframe::egui::{self, Color32, RichText, Ui};

use crate::charts::summary::SummaryStats;
use crate::state::{AppState, Tab};

const GOLD: Color32 = Color32::from_rgb(0xFF, 0xD7, 0x00);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export figures…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} packages from {}",
            state.table.len(),
            state.source.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("📦 Advanced Package Tracking Dashboard 🚀")
                .size(28.0)
                .color(GOLD),
        );
    });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

pub fn summary_cards(ui: &mut Ui, summary: &SummaryStats) {
    let cards = [
        (
            format!("📦 Total Packages: {}", summary.total_packages),
            Color32::from_rgb(0xFF, 0x45, 0x00),
        ),
        (
            format!("🚚 Top Carrier: {}", summary.top_carrier_text()),
            Color32::from_rgb(0x32, 0xCD, 0x32),
        ),
        (
            format!("⏳ Avg. Processing Time: {}", summary.mean_total_text()),
            Color32::from_rgb(0x1E, 0x90, 0xFF),
        ),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (text, color)) in cols.iter_mut().zip(cards) {
            col.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(text).size(20.0).strong().color(color));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui
                .selectable_label(state.active_tab == tab, tab.label())
                .clicked()
            {
                state.select_tab(tab);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open package data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            state.report_failure("load file", &e);
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figures")
        .add_filter("JSON", &["json"])
        .set_file_name("figures.json")
        .save_file();

    if let Some(path) = file {
        match state.export_figures(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => state.report_failure("export figures", &e),
        }
    }
}
