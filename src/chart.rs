use eframe::egui::Color32;

use crate::color::rank_color;
use crate::data::aggregate::Aggregation;
use crate::data::columns::Selection;

// ---------------------------------------------------------------------------
// Grouped bar chart description
// ---------------------------------------------------------------------------

/// One coloured series: the counts of a single answer across the x categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: &'static str,
    pub color: Color32,
    /// `(category index, count)` for every category where the answer was given.
    pub bars: Vec<(usize, usize)>,
}

/// Everything the plot layer needs to draw the response chart, decoupled
/// from egui_plot types.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBarChart {
    pub selection: Selection,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub legend_title: &'static str,
    /// Display names of the x categories, in axis order.
    pub categories: Vec<String>,
    /// Respondents counted per category, for bar tooltips.
    pub totals: Vec<usize>,
    /// Series in legend order (answer rank).
    pub series: Vec<BarSeries>,
    /// Number of answers on the scale; fixes bar width and slot positions.
    pub slots: usize,
}

impl GroupedBarChart {
    /// Build the chart from an aggregation.  Answers nobody gave get no
    /// series, so the chart simply shows fewer colours.
    pub fn from_aggregation(agg: &Aggregation) -> Self {
        let categories: Vec<String> = agg.groups.iter().map(|g| g.to_string()).collect();
        let totals: Vec<usize> = agg.groups.iter().map(|g| agg.group_total(g)).collect();
        let slots = agg.label_order.len();

        let mut series: Vec<BarSeries> = Vec::new();
        for row in &agg.rows {
            let Some(cat) = agg.groups.iter().position(|g| *g == row.grouping) else {
                continue;
            };
            if let Some(s) = series.last_mut().filter(|s| s.label == row.label) {
                s.bars.push((cat, row.count));
                continue;
            }
            let rank = agg
                .label_order
                .iter()
                .position(|l| *l == row.label)
                .unwrap_or(slots);
            series.push(BarSeries {
                label: row.label,
                color: rank_color(rank, slots),
                bars: vec![(cat, row.count)],
            });
        }

        GroupedBarChart {
            selection: agg.selection,
            x_label: agg.selection.grouping.name(),
            y_label: "Counts",
            legend_title: "Responses",
            categories,
            totals,
            series,
            slots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Width of a single bar so that `slots` bars fill 80% of a category.
    pub fn bar_width(&self) -> f64 {
        0.8 / self.slots.max(1) as f64
    }

    /// x position of the bar for answer `rank` within category `cat`.
    pub fn bar_x(&self, cat: usize, rank: usize) -> f64 {
        let w = self.bar_width();
        cat as f64 - 0.4 + w * (rank as f64 + 0.5)
    }

    /// Tooltip text for one bar.
    pub fn bar_name(&self, cat: usize, label: &str, count: usize) -> String {
        let total = self.totals.get(cat).copied().unwrap_or(count);
        format!(
            "{}: {label}\n{count} of {total} respondents",
            self.categories.get(cat).map(String::as_str).unwrap_or("")
        )
    }

    /// Rank of a series' label on the scale.
    pub fn rank_of(&self, series: &BarSeries) -> usize {
        self.selection
            .response
            .vocabulary()
            .rank(series.label)
            .unwrap_or(0)
    }

    /// Category name for an x axis tick, empty between categories.
    pub fn category_at(&self, x: f64) -> &str {
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return "";
        }
        self.categories
            .get(nearest as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::columns::{GroupingColumn, ResponseColumn};
    use crate::data::model::{CellValue, Record, SurveyDataset};

    fn dataset() -> SurveyDataset {
        let rows = [
            ("Female", "very satisfied"),
            ("Female", "very satisfied"),
            ("Male", "very satisfied"),
            ("Male", "a little dissat"),
        ];
        SurveyDataset::from_records(
            rows.iter()
                .map(|(s, a)| {
                    Record::from_pairs([("sex", CellValue::from(*s)), ("satjob", CellValue::from(*a))])
                })
                .collect(),
        )
    }

    #[test]
    fn series_follow_answer_rank_and_skip_unobserved_answers() {
        let agg = aggregate(
            &dataset(),
            Selection::new(ResponseColumn::Satjob, GroupingColumn::Sex),
        );
        let chart = GroupedBarChart::from_aggregation(&agg);

        assert_eq!(chart.categories, vec!["Female", "Male"]);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["very satisfied", "a little dissat"]);
        assert_eq!(chart.series[0].bars, vec![(0, 2), (1, 1)]);
        assert_eq!(chart.series[1].bars, vec![(1, 1)]);
        assert_eq!(chart.totals, vec![2, 2]);
        assert_eq!(chart.x_label, "sex");
        assert_eq!(chart.y_label, "Counts");
        assert_eq!(chart.slots, 4);
    }

    #[test]
    fn series_colour_depends_on_rank_not_position() {
        let agg = aggregate(
            &dataset(),
            Selection::new(ResponseColumn::Satjob, GroupingColumn::Sex),
        );
        let chart = GroupedBarChart::from_aggregation(&agg);
        assert_eq!(chart.series[1].color, rank_color(2, 4));
        assert_eq!(chart.rank_of(&chart.series[1]), 2);
    }

    #[test]
    fn bars_are_centred_on_their_category() {
        let agg = aggregate(
            &dataset(),
            Selection::new(ResponseColumn::Satjob, GroupingColumn::Sex),
        );
        let chart = GroupedBarChart::from_aggregation(&agg);
        let first = chart.bar_x(1, 0);
        let last = chart.bar_x(1, 3);
        assert!(((first + last) / 2.0 - 1.0).abs() < 1e-9);
        assert_eq!(chart.category_at(1.0), "Male");
        assert_eq!(chart.category_at(0.5), "");
        assert_eq!(chart.category_at(7.0), "");
    }

    #[test]
    fn bar_names_show_count_out_of_category_total() {
        let agg = aggregate(
            &dataset(),
            Selection::new(ResponseColumn::Satjob, GroupingColumn::Sex),
        );
        let chart = GroupedBarChart::from_aggregation(&agg);
        assert_eq!(
            chart.bar_name(1, "a little dissat", 1),
            "Male: a little dissat\n1 of 2 respondents"
        );
    }

    #[test]
    fn empty_aggregation_gives_empty_chart() {
        let agg = aggregate(
            &SurveyDataset::default(),
            Selection::new(ResponseColumn::ChildSuffer, GroupingColumn::Education),
        );
        let chart = GroupedBarChart::from_aggregation(&agg);
        assert!(chart.is_empty());
        assert!(chart.categories.is_empty());
    }
}
