use crate::chart::GroupedBarChart;
use crate::data::aggregate::aggregate;
use crate::data::columns::{GroupingColumn, ResponseColumn, Selection};
use crate::data::model::SurveyDataset;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Selection controller: dropdowns → aggregation → chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The chart on screen matches the current selection.
    Idle,
    /// A chart has been built but not drawn yet.
    Rendering,
}

/// Owns the (question, grouping) selection and the chart rendered for it.
///
/// Dropdown changes call [`request`](Self::request); the frame loop calls
/// [`process`](Self::process) once per frame and [`delivered`](Self::delivered)
/// once the chart has been drawn.  Only the latest request is rendered, so
/// several changes within one frame coalesce, and a request arriving while
/// `Rendering` replaces the undrawn chart on the next `process`.
#[derive(Debug)]
pub struct SelectionController {
    selection: Selection,
    pending: Option<Selection>,
    phase: Phase,
    chart: Option<GroupedBarChart>,
    notice: Option<DashboardError>,
    renders: usize,
}

impl SelectionController {
    pub fn new(initial: Selection) -> Self {
        Self {
            selection: initial,
            pending: Some(initial),
            phase: Phase::Idle,
            chart: None,
            notice: None,
            renders: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Chart for the current selection, `None` before the first render.
    pub fn chart(&self) -> Option<&GroupedBarChart> {
        self.chart.as_ref()
    }

    /// Non-fatal condition from the last render (an empty aggregation).
    pub fn notice(&self) -> Option<&DashboardError> {
        self.notice.as_ref()
    }

    /// How many aggregations have been run.
    #[cfg(test)]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Ask for `selection` to be rendered.  Replaces any request that has not
    /// been processed yet.
    pub fn request(&mut self, selection: Selection) {
        if self.pending.is_none() && selection == self.selection && self.chart.is_some() {
            return;
        }
        self.selection = selection;
        self.pending = Some(selection);
    }

    pub fn select_response(&mut self, response: ResponseColumn) {
        self.request(Selection::new(response, self.selection.grouping));
    }

    pub fn select_grouping(&mut self, grouping: GroupingColumn) {
        self.request(Selection::new(self.selection.response, grouping));
    }

    /// Request a selection by raw column names.  Unknown names leave the
    /// selection and the current chart untouched.
    pub fn request_named(&mut self, response: &str, grouping: &str) -> Result<(), DashboardError> {
        match Selection::parse(response, grouping) {
            Ok(selection) => {
                self.request(selection);
                Ok(())
            }
            Err(e) => {
                log::warn!("ignoring selection ({response}, {grouping}): {e}");
                Err(e)
            }
        }
    }

    /// Force a re-render of the current selection, e.g. after a new dataset
    /// was loaded.
    pub fn invalidate(&mut self) {
        self.chart = None;
        self.pending = Some(self.selection);
    }

    /// Render the pending request, if any.  Returns whether a new chart was
    /// produced.
    pub fn process(&mut self, dataset: &SurveyDataset) -> bool {
        let Some(selection) = self.pending.take() else {
            return false;
        };

        self.phase = Phase::Rendering;
        let agg = aggregate(dataset, selection);
        self.notice = agg
            .is_empty()
            .then_some(DashboardError::EmptyAggregation { selection });
        if let Some(notice) = &self.notice {
            log::info!("{notice}");
        }
        self.chart = Some(GroupedBarChart::from_aggregation(&agg));
        self.renders += 1;
        log::debug!(
            "render #{}: {} by {}, {} rows over {} groups",
            self.renders,
            selection.response,
            selection.grouping,
            agg.rows.len(),
            agg.groups.len()
        );
        true
    }

    /// The render adapter has drawn the current chart.
    pub fn delivered(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}
