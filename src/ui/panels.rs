use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{export_report_json, export_view_csv};
use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Left side panel – navigation and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: section menu, then the optional filter.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Menu");
    ui.separator();

    ui.strong("Go to Section");
    for section in Section::ALL {
        ui.radio_value(&mut state.section, section, section.label());
    }
    ui.separator();

    ui.heading("Filter Options");

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the closures.
    let categorical = state.classes.categorical.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label("Select Column to Filter (Optional)");
            let mut column = state.filter_column.clone();
            egui::ComboBox::from_id_salt("filter_column")
                .selected_text(column.as_deref().unwrap_or("None"))
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut column, None, "None");
                    for col in &categorical {
                        ui.selectable_value(&mut column, Some(col.clone()), col.as_str());
                    }
                });
            if column != state.filter_column {
                state.set_filter_column(column);
            }

            let Some(col) = state.filter_column.clone() else {
                return;
            };

            ui.add_space(4.0);
            ui.label(format!("Select {col}"));
            let choices = state.filter_choices.clone();
            if choices.is_empty() {
                ui.label(RichText::new("Column has no values").italics());
                return;
            }
            let mut value = state.filter_value.clone();
            let selected = value.as_ref().map(|v| v.to_string()).unwrap_or_default();
            egui::ComboBox::from_id_salt("filter_value")
                .selected_text(selected)
                .show_ui(ui, |ui: &mut Ui| {
                    for choice in &choices {
                        ui.selectable_value(&mut value, Some(choice.clone()), choice.to_string());
                    }
                });
            if let Some(v) = value {
                state.set_filter_value(v);
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
            let loaded = state.dataset.is_some();
            if ui
                .add_enabled(loaded, egui::Button::new("Export view as CSV…"))
                .clicked()
            {
                export_view_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Export summary as JSON…"))
                .clicked()
            {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open car data")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load file: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

fn export_view_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export filtered rows")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered.csv")
        .save_file()
    else {
        return;
    };
    let result = match state.view() {
        Some(view) => export_view_csv(&view, &path),
        None => return,
    };
    report_export(state, result);
}

fn export_summary_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export summary")
        .add_filter("JSON", &["json"])
        .set_file_name("summary.json")
        .save_file()
    else {
        return;
    };
    let result = match &state.report {
        Some(report) => export_report_json(report, &path),
        None => return,
    };
    report_export(state, result);
}

fn report_export(state: &mut AppState, result: Result<(), crate::error::DashboardError>) {
    match result {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("{e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
