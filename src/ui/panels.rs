use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::category::Category;
use crate::data::loader::LoadRequest;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        let any_selected = !state.filters.read().is_empty();
        if ui
            .add_enabled(any_selected, egui::Button::new("Reset").small())
            .clicked()
        {
            state.reset_filters();
        }
    });
    ui.separator();

    let observed = match &state.dataset {
        Some(ds) => ds.observed_tags.clone(),
        None => {
            ui.label("No results loaded.");
            return;
        }
    };

    // Toggles are applied after the widgets so the state is not borrowed
    // while the panel is drawn.
    let mut toggles: Vec<(Category, String)> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for category in Category::ALL {
                let selection = state.filters.read().selected(category);
                let listed: Vec<&str> = category.values().iter().map(|(v, _)| *v).collect();
                let unlisted: BTreeSet<&str> = observed
                    .get(&category)
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .filter(|v| !listed.contains(v))
                    .collect();

                let n_selected = selection.len();
                let n_total = listed.len() + unlisted.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", category.title());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(category.key())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for value in listed.iter().chain(unlisted.iter()) {
                            let text = match category.label_for(value) {
                                Ok(label) => RichText::new(label),
                                Err(_) => RichText::new(format!("{value} (unlisted)")).weak(),
                            };
                            let mut checked = selection.contains(*value);
                            if ui.checkbox(&mut checked, text).changed() {
                                toggles.push((category, value.to_string()));
                            }
                        }
                    });
            }
        });

    for (category, value) in toggles {
        state.toggle_filter_value(category, &value);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open results…").clicked() {
                open_results_dialog(state);
                ui.close_menu();
            }
            let can_tag = state.source.is_some() && !state.is_loading();
            if ui
                .add_enabled(can_tag, egui::Button::new("Open metadata…"))
                .clicked()
            {
                open_metadata_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} results loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_results_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark results")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let metadata = state.source.as_ref().and_then(|s| s.metadata.clone());
        state.start_load(LoadRequest {
            results: path,
            metadata,
        });
    }
}

pub fn open_metadata_dialog(state: &mut AppState) {
    let Some(source) = state.source.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark metadata")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.start_load(LoadRequest {
            metadata: Some(path),
            ..source
        });
    }
}
