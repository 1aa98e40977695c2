use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Runtime vs memory chart (central panel)
// ---------------------------------------------------------------------------

/// Render one line + point series per solver from the aggregated chart data.
pub fn runtime_memory_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.is_loading() {
                ui.spinner();
            } else {
                ui.heading("Open a results file to compare solvers  (File → Open results…)");
            }
        });
        return;
    }

    let chart = &state.chart;
    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data for the selected filters");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Solver:");
        for (name, color) in state.colors.legend_entries() {
            if chart.series.iter().any(|s| s.solver.name() == name) {
                ui.label(RichText::new(format!("● {name}")).color(color));
            }
        }
    });

    Plot::new("runtime_memory_plot")
        .legend(Legend::default())
        .x_axis_label("Runtime (s)")
        .y_axis_label("Memory Usage (MB)")
        .include_x(chart.runtime_domain.min)
        .include_x(chart.runtime_domain.max)
        .include_y(chart.memory_domain.min)
        .include_y(chart.memory_domain.max)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!(
                    "Solver: {name}\nRuntime: {:.2}s\nMemory: {:.1}MB",
                    value.x, value.y
                )
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = state.colors.color_for(&series.solver);
                let name = series.solver.to_string();
                let coords: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|p| [p.runtime, p.memory_usage])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(coords.clone()))
                        .name(&name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(&name)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}
