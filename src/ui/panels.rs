use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use iris_explorer::data::loader::load_file;
use iris_explorer::report::Page;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – label filter
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let labels = dataset.labels().to_vec();
    let counts = dataset.label_counts();
    let label_field = dataset.label_field().to_string();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!(
                "{label_field}  ({}/{})",
                state.filters.len(),
                labels.len()
            ));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for label in &labels {
                let mut text = RichText::new(format!(
                    "{label}  ({})",
                    counts.get(label).copied().unwrap_or(0)
                ));
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(label));
                }

                let mut checked = state.filters.contains(label);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_label(label);
                }
            }
        });
}

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
        });

        ui.separator();

        for page in Page::ALL {
            if ui
                .selectable_label(state.page == page, page.short_name())
                .clicked()
            {
                state.set_page(page);
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} selected",
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
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open labelled data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path, &state.label_field) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with attributes {:?}",
                    dataset.len(),
                    dataset.attributes()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
