use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter");
    ui.separator();

    let (first, last) = state.dataset.date_bounds();
    ui.label(RichText::new(format!("Data covers {first} to {last}")).weak());
    ui.add_space(4.0);

    ui.strong("Start date");
    ui.add(DatePickerButton::new(&mut state.pending_start).id_salt("start_date"));
    ui.strong("End date");
    ui.add(DatePickerButton::new(&mut state.pending_end).id_salt("end_date"));
    ui.add_space(4.0);

    let mut include_all = state.include_all;
    if ui.checkbox(&mut include_all, "Show all data").changed() {
        state.set_include_all(include_all);
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Apply filter").clicked() {
            state.apply_filter();
        }
        if ui.button("Reset range").clicked() {
            state.reset_range();
        }
    });

    if state.pending_start > state.pending_end {
        ui.label(
            RichText::new("Start date is after end date; no day will match.")
                .color(Color32::YELLOW),
        );
    }
    if state.include_all {
        ui.label(RichText::new("Showing every day; the date range is ignored.").italics());
    } else if !state.has_pending_changes() {
        let applied = state.applied();
        ui.label(RichText::new(format!("Showing {} to {}", applied.start, applied.end)).weak());
    } else {
        ui.label(RichText::new("Press \"Apply filter\" to use the new dates.").italics());
    }
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

        ui.label(format!(
            "{} days loaded, {} in range",
            state.dataset.len(),
            state.view.records.len()
        ))
        .on_hover_text(state.source.display().to_string());

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
        .set_title("Open daily rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                // The running session keeps its current dataset.
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
