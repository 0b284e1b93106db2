use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, headline, summary cards, tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.separator();
            panels::header(ui);
            panels::summary_cards(ui, &self.state.summary);
            ui.add_space(4.0);
            panels::tab_bar(ui, &mut self.state);
        });

        // ---- Central panel: the active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.active_tab == Tab::Records {
                table::records_table(ui, &self.state.table);
                return;
            }

            let figures = &self.state.figures;
            let colors = &self.state.colors;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match figures.len() {
                    0 => {}
                    1 => plot::figure_card(ui, &figures[0], colors),
                    n => ui.columns(n, |cols| {
                        for (col, fig) in cols.iter_mut().zip(figures) {
                            plot::figure_card(col, fig, colors);
                        }
                    }),
                });
        });
    }
}
