use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoint,
    PlotPoints, Points,
};

use crate::chart::GroupedBarChart;
use crate::color::ColorMap;
use crate::data::columns::NumericColumn;
use crate::data::model::CellValue;
use crate::data::stats::{BoxSummary, ScatterPoint};
use crate::state::{SummaryViews, SCATTER_HOVER};

// ---------------------------------------------------------------------------
// Response bar chart (driven by the dropdowns)
// ---------------------------------------------------------------------------

/// Draw the grouped bar chart for the current selection.
pub fn response_chart(ui: &mut Ui, chart: &GroupedBarChart) {
    ui.label(RichText::new(chart.legend_title).strong());
    if chart.is_empty() {
        ui.weak(format!("No responses to {}.", chart.selection));
    }

    let axis = chart.clone();

    Plot::new("response_chart")
        .legend(Legend::default())
        .height(480.0)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            axis.category_at(mark.value).to_string()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let rank = chart.rank_of(series);
                let bars: Vec<Bar> = series
                    .bars
                    .iter()
                    .map(|&(cat, count)| {
                        Bar::new(chart.bar_x(cat, rank), count as f64)
                            .width(chart.bar_width())
                            .name(chart.bar_name(cat, series.label, count))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(series.label).color(series.color));
            }
        });
}

// ---------------------------------------------------------------------------
// Box plots by sex
// ---------------------------------------------------------------------------

fn box_elem(position: f64, summary: &BoxSummary, color: Color32, name: &str) -> BoxElem {
    BoxElem::new(
        position,
        BoxSpread::new(
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
        ),
    )
    .box_width(0.5)
    .name(format!("{name} (n = {})", summary.count))
    .fill(color.linear_multiply(0.4))
    .stroke(Stroke::new(1.5, color))
}

/// Horizontal box plot of one variable, one box per sex.
pub fn boxes_by_sex(
    ui: &mut Ui,
    id: &str,
    axis_label: &str,
    boxes: &[(CellValue, BoxSummary)],
    colors: &ColorMap,
    height: f32,
) {
    let names: Vec<String> = boxes.iter().map(|(g, _)| g.to_string()).collect();

    Plot::new(id)
        .height(height)
        .x_axis_label(axis_label)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            names.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, (group, summary)) in boxes.iter().enumerate() {
                let color = colors.color_for(group);
                let elem = box_elem(i as f64, summary, color, &group.to_string());
                plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal().color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Prestige tabs
// ---------------------------------------------------------------------------

/// Tooltip for a hovered scatter item: coordinates, plus education and
/// socioeconomic index when the cursor is on a respondent.
fn scatter_tooltip(name: &str, value: &PlotPoint, points: &[ScatterPoint]) -> String {
    let mut text = format!(
        "{}: {:.0}\n{}: {:.0}",
        NumericColumn::JobPrestige.label(),
        value.x,
        NumericColumn::Income.label(),
        value.y
    );
    if name.is_empty() {
        return text;
    }
    text = format!("{name}\n{text}");
    if let Some(p) = points.iter().find(|p| p.xy == [value.x, value.y]) {
        for (col, v) in SCATTER_HOVER.iter().zip(&p.hover) {
            match v {
                Some(v) => text.push_str(&format!("\n{}: {v:.1}", col.label())),
                None => text.push_str(&format!("\n{}: n/a", col.label())),
            }
        }
    }
    text
}

/// Job prestige vs income, coloured by sex, with per-sex OLS trendlines.
pub fn prestige_scatter(ui: &mut Ui, summary: &SummaryViews) {
    let hover: Vec<ScatterPoint> = summary
        .scatter
        .values()
        .flat_map(|(points, _)| points.iter().cloned())
        .collect();

    Plot::new("prestige_scatter")
        .legend(Legend::default())
        .height(520.0)
        .x_axis_label(NumericColumn::JobPrestige.label())
        .y_axis_label(NumericColumn::Income.label())
        .label_formatter(move |name: &str, value: &PlotPoint| {
            scatter_tooltip(name, value, &hover)
        })
        .show(ui, |plot_ui| {
            for (sex, (points, fit)) in &summary.scatter {
                let color = summary.sex_colors.color_for(sex);
                let name = sex.to_string();
                let xy: Vec<[f64; 2]> = points.iter().map(|p| p.xy).collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(xy))
                        .radius(2.5)
                        .color(color)
                        .name(&name),
                );

                if let Some(fit) = fit {
                    let (lo, hi) = points
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                            (lo.min(p.xy[0]), hi.max(p.xy[0]))
                        });
                    let line = Line::new(PlotPoints::from(vec![
                        [lo, fit.predict(lo)],
                        [hi, fit.predict(hi)],
                    ]))
                    .color(color)
                    .width(2.0)
                    .name(format!("{name} trend"));
                    plot_ui.line(line);
                }
            }
        });
}

/// Income by sex within each prestige category, two facets per row.
pub fn prestige_category_boxes(ui: &mut Ui, summary: &SummaryViews) {
    if summary.prestige_categories.is_empty() {
        ui.label("No respondents with income, sex and job prestige.");
        return;
    }

    for pair in summary.prestige_categories.chunks(2) {
        ui.columns(2, |cols| {
            for (col, (label, boxes)) in cols.iter_mut().zip(pair) {
                col.label(RichText::new(*label).strong());
                boxes_by_sex(
                    col,
                    &format!("prestige_{label}"),
                    NumericColumn::Income.label(),
                    boxes,
                    &summary.sex_colors,
                    160.0,
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_tooltip_adds_education_and_socioeconomic_index() {
        let points = vec![ScatterPoint {
            xy: [50.0, 20_000.0],
            hover: vec![Some(16.0), None],
        }];
        let text = scatter_tooltip("Female", &PlotPoint::new(50.0, 20_000.0), &points);
        assert_eq!(
            text,
            "Female\nJob Prestige: 50\nAnnual Income: 20000\nEducation: 16.0\nSocioeconomic Index: n/a"
        );

        let text = scatter_tooltip("", &PlotPoint::new(50.0, 20_000.0), &points);
        assert_eq!(text, "Job Prestige: 50\nAnnual Income: 20000");
    }
}
