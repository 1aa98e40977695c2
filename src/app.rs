use std::time::Duration;

use eframe::egui;

use crate::data::loader::LoadRequest;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SolverBenchApp {
    pub state: AppState,
}

impl SolverBenchApp {
    /// Start the app, optionally loading a results file right away.
    pub fn new(initial: Option<LoadRequest>) -> Self {
        let mut state = AppState::default();
        state
            .filters
            .subscribe(|filters| log::trace!("filter state changed: {filters:?}"));
        if let Some(request) = initial {
            state.start_load(request);
        }
        Self { state }
    }
}

impl eframe::App for SolverBenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();
        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: filtered results ----
        egui::TopBottomPanel::bottom("results_table")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::results_table(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::runtime_memory_plot(ui, &self.state);
        });
    }
}
