use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::columns::{GroupingColumn, NumericColumn, ResponseColumn};
use crate::controller::Phase;
use crate::state::{AppState, Tab};
use crate::ui::{plot, table};

const INTRO: &str = "The most recent Census Bureau data showed that women earned 83 cents for \
every $1 earned by men. This dashboard provides descriptive statistics on sex differences using \
data from the 2018 General Social Survey, a personal-interview survey conducted by the National \
Opinion Research Center at the University of Chicago. Variables shown include annual income, sex, \
years of education, socioeconomic index and job prestige, which was measured by having \
respondents rank jobs on a hierarchical ladder and aggregating the rankings.";

// ---------------------------------------------------------------------------
// Left side panel – question / grouping dropdowns
// ---------------------------------------------------------------------------

/// Render the selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Responses to Survey Questions");
    ui.separator();

    let current = state.controller.selection();

    ui.strong("Select Question");
    egui::ComboBox::from_id_salt("question")
        .width(ui.available_width())
        .selected_text(current.response.name())
        .show_ui(ui, |ui: &mut Ui| {
            for col in ResponseColumn::ALL {
                if ui
                    .selectable_label(current.response == col, col.name())
                    .on_hover_text(col.question())
                    .clicked()
                {
                    state.controller.select_response(col);
                }
            }
        });
    ui.label(RichText::new(current.response.question()).italics());
    ui.add_space(8.0);

    ui.strong("Select Grouping Variable");
    egui::ComboBox::from_id_salt("grouping")
        .width(ui.available_width())
        .selected_text(current.grouping.name())
        .show_ui(ui, |ui: &mut Ui| {
            for col in GroupingColumn::ALL {
                if ui
                    .selectable_label(current.grouping == col, col.name())
                    .clicked()
                {
                    state.controller.select_grouping(col);
                }
            }
        });

    // Render whatever the dropdowns asked for this frame.
    state.refresh_chart();
    if state.controller.phase() == Phase::Rendering {
        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.spinner();
            ui.weak("Updating chart…");
        });
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

        if state.loading {
            ui.spinner();
        }

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} respondents", ds.len()));
        }

        if let Some(notice) = state.controller.notice() {
            ui.separator();
            ui.label(RichText::new(notice.to_string()).color(Color32::YELLOW));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard page
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey extract to begin  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Exploring the 2018 General Social Survey");
            ui.label(INTRO);
            ui.add_space(12.0);

            if let Some(chart) = state.controller.chart() {
                plot::response_chart(ui, chart);
                state.controller.delivered();
            }
            ui.add_space(12.0);

            let Some(summary) = &state.summary else {
                return;
            };

            ui.heading("Mean Income, Job Prestige, Socioeconomic Index, and Years of Education by Sex");
            table::summary_table(ui, &summary.means_by_sex);
            ui.add_space(12.0);

            ui.columns(2, |cols| {
                cols[0].heading("Income Distribution by Sex");
                plot::boxes_by_sex(
                    &mut cols[0],
                    "income_by_sex",
                    NumericColumn::Income.label(),
                    &summary.income_boxes,
                    &summary.sex_colors,
                    220.0,
                );
                cols[1].heading("Job Prestige by Sex");
                plot::boxes_by_sex(
                    &mut cols[1],
                    "prestige_by_sex",
                    NumericColumn::JobPrestige.label(),
                    &summary.prestige_boxes,
                    &summary.sex_colors,
                    220.0,
                );
            });
            ui.add_space(12.0);

            ui.heading("Relationship Between Income and Job Prestige By Sex");
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut state.tab, Tab::Scatter, "Scatterplot");
                ui.selectable_value(
                    &mut state.tab,
                    Tab::PrestigeBoxes,
                    "Boxplot by Job Prestige Categories",
                );
            });
            match state.tab {
                Tab::Scatter => plot::prestige_scatter(ui, summary),
                Tab::PrestigeBoxes => plot::prestige_category_boxes(ui, summary),
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
