use std::collections::BTreeMap;
use std::path::Path;

use crate::color::ColorMap;
use crate::controller::SelectionController;
use crate::data::columns::{NumericColumn, Selection};
use crate::data::model::{CellValue, SurveyDataset};
use crate::data::stats::{
    box_by_group, group_means, income_by_prestige_category, ols, scatter_by_group, BoxSummary,
    GroupMeans, LinearFit, ScatterPoint,
};

/// Columns of the summary table, in display order.
pub const SUMMARY_COLUMNS: [NumericColumn; 4] = [
    NumericColumn::JobPrestige,
    NumericColumn::Income,
    NumericColumn::SocioeconomicIndex,
    NumericColumn::Education,
];

/// Extra columns shown when hovering a scatter point.
pub const SCATTER_HOVER: [NumericColumn; 2] =
    [NumericColumn::Education, NumericColumn::SocioeconomicIndex];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Scatter,
    PrestigeBoxes,
}

// ---------------------------------------------------------------------------
// Static views, computed once per dataset
// ---------------------------------------------------------------------------

/// Everything on the dashboard that does not depend on the dropdowns.
#[derive(Debug, Clone)]
pub struct SummaryViews {
    pub means_by_sex: Vec<GroupMeans>,
    pub income_boxes: Vec<(CellValue, BoxSummary)>,
    pub prestige_boxes: Vec<(CellValue, BoxSummary)>,
    pub scatter: BTreeMap<CellValue, (Vec<ScatterPoint>, Option<LinearFit>)>,
    pub prestige_categories: Vec<(&'static str, Vec<(CellValue, BoxSummary)>)>,
    pub sex_colors: ColorMap,
}

impl SummaryViews {
    pub fn compute(dataset: &SurveyDataset) -> Self {
        let scatter = scatter_by_group(
            dataset,
            NumericColumn::JobPrestige,
            NumericColumn::Income,
            &SCATTER_HOVER,
            "sex",
        )
        .into_iter()
        .map(|(sex, pts)| {
            let xy: Vec<[f64; 2]> = pts.iter().map(|p| p.xy).collect();
            let fit = ols(&xy);
            (sex, (pts, fit))
        })
        .collect();

        let sexes = dataset.unique_values.get("sex");
        Self {
            means_by_sex: group_means(dataset, "sex", &SUMMARY_COLUMNS),
            income_boxes: box_by_group(dataset, NumericColumn::Income, "sex"),
            prestige_boxes: box_by_group(dataset, NumericColumn::JobPrestige, "sex"),
            scatter,
            prestige_categories: income_by_prestige_category(dataset),
            sex_colors: ColorMap::new(sexes.into_iter().flatten()),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<SurveyDataset>,

    /// Dropdown selection and the response chart rendered for it.
    pub controller: SelectionController,

    /// Static views for the loaded dataset.
    pub summary: Option<SummaryViews>,

    /// Active tab of the prestige section.
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl AppState {
    pub fn new(initial: Selection) -> Self {
        Self {
            dataset: None,
            controller: SelectionController::new(initial),
            summary: None,
            tab: Tab::Scatter,
            status_message: None,
            loading: false,
        }
    }

    /// State whose initial selection is given by raw column names, as they
    /// come from settings.  Unknown names are logged by the controller and
    /// the default selection is kept.
    pub fn with_selection_names(response: &str, grouping: &str) -> Self {
        let mut state = Self::default();
        let _ = state.controller.request_named(response, grouping);
        state
    }

    /// Ingest a newly loaded dataset and recompute every view.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        self.summary = Some(SummaryViews::compute(&dataset));
        self.controller.invalidate();
        self.controller.process(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a file and ingest it, reporting failures in the status bar.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match crate::data::loader::load_file(path) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("{} contains no respondents", path.display());
                } else {
                    log::info!(
                        "Loaded {} respondents from {}",
                        dataset.len(),
                        path.display()
                    );
                }
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Render any pending dropdown change.
    pub fn refresh_chart(&mut self) {
        if let Some(ds) = &self.dataset {
            self.controller.process(ds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{GroupingColumn, ResponseColumn};
    use crate::data::model::Record;

    fn dataset() -> SurveyDataset {
        let rows = [
            ("Female", 40.0, 20_000.0, "very satisfied"),
            ("Female", 60.0, 40_000.0, "mod. satisfied"),
            ("Male", 30.0, 25_000.0, "very satisfied"),
            ("Male", 70.0, 70_000.0, "very dissatisfied"),
        ];
        SurveyDataset::from_records(
            rows.iter()
                .map(|(sex, prestige, income, satjob)| {
                    Record::from_pairs([
                        ("sex", CellValue::from(*sex)),
                        ("job_prestige", CellValue::Float(*prestige)),
                        ("income", CellValue::Float(*income)),
                        ("satjob", CellValue::from(*satjob)),
                    ])
                })
                .collect(),
        )
    }

    #[test]
    fn set_dataset_renders_chart_and_summaries() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.means_by_sex.len(), 2);
        assert_eq!(summary.means_by_sex[0].means[1], Some(30_000.0));
        assert_eq!(summary.income_boxes.len(), 2);
        let (_, fit) = &summary.scatter[&CellValue::from("Female")];
        assert!(fit.is_some());

        let chart = state.controller.chart().unwrap();
        assert_eq!(chart.categories, vec!["Female", "Male"]);
    }

    #[test]
    fn dropdown_change_is_rendered_on_refresh() {
        let mut state = AppState::new(Selection::new(
            ResponseColumn::Satjob,
            GroupingColumn::Sex,
        ));
        state.set_dataset(dataset());
        state.controller.select_grouping(GroupingColumn::Region);
        state.refresh_chart();
        assert_eq!(
            state.controller.chart().unwrap().selection.grouping,
            GroupingColumn::Region
        );
    }

    #[test]
    fn settings_names_select_the_initial_chart() {
        let mut state = AppState::with_selection_names("child_suffer", "region");
        assert_eq!(
            state.controller.selection(),
            Selection::new(ResponseColumn::ChildSuffer, GroupingColumn::Region)
        );
        state.set_dataset(dataset());
        assert_eq!(
            state.controller.chart().unwrap().selection,
            Selection::new(ResponseColumn::ChildSuffer, GroupingColumn::Region)
        );
    }

    #[test]
    fn unknown_settings_names_keep_the_default_selection() {
        let mut state = AppState::with_selection_names("income", "region");
        assert_eq!(state.controller.selection(), Selection::default());
        state.set_dataset(dataset());
        let chart = state.controller.chart().unwrap();
        assert_eq!(chart.selection, Selection::default());
        assert!(state.controller.notice().is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn load_failure_sets_status_message() {
        let mut state = AppState::default();
        state.load_path(Path::new("/nonexistent/gss.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert!(!state.loading);
    }
}
