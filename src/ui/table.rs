use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Benchmark",
    "Size",
    "Solver",
    "Version",
    "Status",
    "Runtime (s)",
    "Memory (MB)",
    "Objective",
];

// ---------------------------------------------------------------------------
// Filtered results table (bottom panel)
// ---------------------------------------------------------------------------

pub fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(180.0))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let r = &ds.results[state.visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(&r.benchmark);
                });
                row.col(|ui| {
                    ui.label(&r.size);
                });
                row.col(|ui| {
                    ui.label(RichText::new(r.solver.name()).color(state.colors.color_for(&r.solver)));
                });
                row.col(|ui| {
                    ui.label(&r.solver_version);
                });
                row.col(|ui| {
                    ui.label(r.status.to_string());
                });
                row.col(|ui| {
                    ui.label(r.runtime.to_string());
                });
                row.col(|ui| {
                    ui.label(r.memory_usage.to_string());
                });
                row.col(|ui| {
                    ui.label(
                        r.objective_value
                            .map(|v| format!("{v:.4e}"))
                            .unwrap_or_else(|| "–".to_string()),
                    );
                });
            });
        });
}
