//! Descriptive statistics behind the static dashboard views: the summary
//! table, the income / prestige box plots and the prestige scatter.

use std::collections::BTreeMap;

use super::columns::NumericColumn;
use super::model::{CellValue, SurveyDataset};

/// Mean of each requested column for one group.  `None` where the group has
/// no non-missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    pub group: CellValue,
    pub means: Vec<Option<f64>>,
}

/// Per-group means, groups ascending.  Missing cells are skipped per column,
/// rows without a group value are ignored.
pub fn group_means(
    dataset: &SurveyDataset,
    by: &str,
    columns: &[NumericColumn],
) -> Vec<GroupMeans> {
    // group → per-column (sum, n)
    let mut acc: BTreeMap<CellValue, Vec<(f64, usize)>> = BTreeMap::new();
    for rec in &dataset.records {
        let Some(group) = rec.get(by) else { continue };
        let slots = acc
            .entry(group.clone())
            .or_insert_with(|| vec![(0.0, 0); columns.len()]);
        for (slot, col) in slots.iter_mut().zip(columns) {
            if let Some(v) = rec.number(col.name()) {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    acc.into_iter()
        .map(|(group, slots)| GroupMeans {
            group,
            means: slots
                .into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect(),
        })
        .collect()
}

/// Round to two decimals for display.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Box plot summaries
// ---------------------------------------------------------------------------

/// Tukey-style box: quartiles plus whiskers at the furthest observations
/// within 1.5 IQR of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub count: usize,
}

/// Linear-interpolated quantile of sorted data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= q1 - fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= q3 + fence)
            .unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            count: sorted.len(),
        })
    }
}

/// Box summary of `value` for each group of `by`, groups ascending.
pub fn box_by_group(
    dataset: &SurveyDataset,
    value: NumericColumn,
    by: &str,
) -> Vec<(CellValue, BoxSummary)> {
    let mut groups: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for rec in &dataset.records {
        if let (Some(g), Some(v)) = (rec.get(by), rec.number(value.name())) {
            groups.entry(g.clone()).or_default().push(v);
        }
    }
    groups
        .into_iter()
        .filter_map(|(g, vals)| BoxSummary::from_values(&vals).map(|b| (g, b)))
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter + OLS trendline
// ---------------------------------------------------------------------------

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit; `None` with fewer than two points or no
/// spread in `x`.
pub fn ols(points: &[[f64; 2]]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p[0] - mean_x).powi(2)).sum();
    if sxx.abs() < f64::EPSILON {
        return None;
    }
    let sxy: f64 = points
        .iter()
        .map(|p| (p[0] - mean_x) * (p[1] - mean_y))
        .sum();
    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// One scatter point plus the values of the hover columns (possibly missing).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub xy: [f64; 2],
    pub hover: Vec<Option<f64>>,
}

/// Points per group, skipping rows where the group, `x` or `y` is missing.
/// `hover` columns ride along for tooltips and may be missing.
pub fn scatter_by_group(
    dataset: &SurveyDataset,
    x: NumericColumn,
    y: NumericColumn,
    hover: &[NumericColumn],
    by: &str,
) -> BTreeMap<CellValue, Vec<ScatterPoint>> {
    let mut out: BTreeMap<CellValue, Vec<ScatterPoint>> = BTreeMap::new();
    for rec in &dataset.records {
        if let (Some(g), Some(xv), Some(yv)) =
            (rec.get(by), rec.number(x.name()), rec.number(y.name()))
        {
            out.entry(g.clone()).or_default().push(ScatterPoint {
                xy: [xv, yv],
                hover: hover.iter().map(|c| rec.number(c.name())).collect(),
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Prestige categories
// ---------------------------------------------------------------------------

pub const PRESTIGE_LABELS: [&str; 6] = [
    "very low prestige",
    "low prestige",
    "kinda low prestige",
    "kinda prestige",
    "high prestige",
    "very high prestige",
];

/// Equal-width binning over the observed range.  Bins are right-inclusive and
/// the lowest edge is pulled down by 0.1% of the range so the minimum lands
/// in the first bin.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualWidthBins {
    pub edges: Vec<f64>,
}

impl EqualWidthBins {
    pub fn fit(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        let (lo, hi) = if min == max {
            let pad = |v: f64| if v == 0.0 { 0.001 } else { 0.001 * v.abs() };
            (min - pad(min), max + pad(max))
        } else {
            (min, max)
        };

        let step = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
        // pin the top edge so rounding in `step` cannot exclude the maximum
        if let Some(top) = edges.last_mut() {
            *top = hi;
        }
        if min != max {
            edges[0] -= (hi - lo) * 0.001;
        }
        Some(EqualWidthBins { edges })
    }

    /// Index of the bin containing `v`, `None` outside the fitted range.
    pub fn bin(&self, v: f64) -> Option<usize> {
        if !v.is_finite() {
            return None;
        }
        self.edges
            .windows(2)
            .position(|w| v > w[0] && v <= w[1])
    }
}

/// Income box summaries by sex inside each prestige category.  Rows missing
/// income, sex or prestige are dropped first.
pub fn income_by_prestige_category(
    dataset: &SurveyDataset,
) -> Vec<(&'static str, Vec<(CellValue, BoxSummary)>)> {
    let complete: Vec<(CellValue, f64, f64)> = dataset
        .records
        .iter()
        .filter_map(|rec| {
            Some((
                rec.get("sex")?.clone(),
                rec.number(NumericColumn::Income.name())?,
                rec.number(NumericColumn::JobPrestige.name())?,
            ))
        })
        .collect();

    let prestige: Vec<f64> = complete.iter().map(|(_, _, p)| *p).collect();
    let Some(bins) = EqualWidthBins::fit(&prestige, PRESTIGE_LABELS.len()) else {
        return Vec::new();
    };

    let mut cells: BTreeMap<usize, BTreeMap<CellValue, Vec<f64>>> = BTreeMap::new();
    for (sex, income, p) in complete {
        if let Some(b) = bins.bin(p) {
            cells.entry(b).or_default().entry(sex).or_default().push(income);
        }
    }

    cells
        .into_iter()
        .map(|(b, by_sex)| {
            let boxes = by_sex
                .into_iter()
                .filter_map(|(sex, vals)| BoxSummary::from_values(&vals).map(|s| (sex, s)))
                .collect();
            (PRESTIGE_LABELS[b], boxes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn person(sex: &str, income: Option<f64>, prestige: Option<f64>, educ: f64) -> Record {
        let mut rec = Record::from_pairs([("sex", CellValue::from(sex))]);
        rec.values.insert("education".into(), CellValue::Float(educ));
        if let Some(i) = income {
            rec.values.insert("income".into(), CellValue::Float(i));
        }
        if let Some(p) = prestige {
            rec.values.insert("job_prestige".into(), CellValue::Float(p));
        }
        rec
    }

    #[test]
    fn group_means_skip_missing_cells() {
        let ds = SurveyDataset::from_records(vec![
            person("Female", Some(10_000.0), Some(40.0), 12.0),
            person("Female", None, Some(60.0), 16.0),
            person("Male", Some(30_000.0), None, 14.0),
        ]);
        let cols = [NumericColumn::Income, NumericColumn::JobPrestige, NumericColumn::Education];
        let means = group_means(&ds, "sex", &cols);

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].group, CellValue::from("Female"));
        assert_eq!(means[0].means, vec![Some(10_000.0), Some(50.0), Some(14.0)]);
        assert_eq!(means[1].group, CellValue::from("Male"));
        assert_eq!(means[1].means, vec![Some(30_000.0), None, Some(14.0)]);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(47.123_456), 47.12);
        assert_eq!(round2(0.005_1), 0.01);
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let b = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(b.q1, 1.75);
        assert_eq!(b.median, 2.5);
        assert_eq!(b.q3, 3.25);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 4.0);
        assert_eq!(b.count, 4);
    }

    #[test]
    fn box_whiskers_stop_at_the_fence() {
        let b = BoxSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(b.upper_whisker, 5.0);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn ols_recovers_a_line() {
        let pts: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 3.0 * i as f64 + 2.0]).collect();
        let fit = ols(&pts).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-9);
        assert!((fit.intercept - 2.0).abs() < 1e-9);
        assert!((fit.predict(20.0) - 62.0).abs() < 1e-9);

        assert!(ols(&[[1.0, 1.0]]).is_none());
        assert!(ols(&[[1.0, 1.0], [1.0, 5.0]]).is_none());
    }

    #[test]
    fn scatter_drops_incomplete_rows() {
        let ds = SurveyDataset::from_records(vec![
            person("Male", Some(20_000.0), Some(50.0), 12.0),
            person("Male", None, Some(40.0), 12.0),
            person("Female", Some(25_000.0), Some(45.0), 12.0),
        ]);
        let pts = scatter_by_group(
            &ds,
            NumericColumn::JobPrestige,
            NumericColumn::Income,
            &[NumericColumn::Education, NumericColumn::SocioeconomicIndex],
            "sex",
        );
        assert_eq!(
            pts[&CellValue::from("Male")],
            vec![ScatterPoint {
                xy: [50.0, 20_000.0],
                hover: vec![Some(12.0), None],
            }]
        );
        assert_eq!(pts[&CellValue::from("Female")].len(), 1);
        assert_eq!(pts[&CellValue::from("Female")][0].xy, [45.0, 25_000.0]);
    }

    #[test]
    fn equal_width_bins_put_min_in_first_and_max_in_last() {
        let values = [16.0, 40.0, 80.0];
        let bins = EqualWidthBins::fit(&values, 6).unwrap();
        assert_eq!(bins.edges.len(), 7);
        assert_eq!(bins.bin(16.0), Some(0));
        assert_eq!(bins.bin(80.0), Some(5));
        assert_eq!(bins.bin(26.0), Some(0));
        assert_eq!(bins.bin(27.0), Some(1));
        assert_eq!(bins.bin(100.0), None);
    }

    #[test]
    fn top_edge_is_exactly_the_maximum() {
        let bins = EqualWidthBins::fit(&[24.85, 50.0, 110.67], 6).unwrap();
        assert_eq!(bins.edges.last().copied(), Some(110.67));
        assert_eq!(bins.bin(110.67), Some(5));
        assert_eq!(bins.bin(24.85), Some(0));
    }

    #[test]
    fn highest_prestige_respondents_are_kept() {
        let ds = SurveyDataset::from_records(vec![
            person("Female", Some(10_000.0), Some(24.85), 12.0),
            person("Male", Some(80_000.0), Some(110.67), 18.0),
        ]);
        let cats = income_by_prestige_category(&ds);
        let labels: Vec<&str> = cats.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["very low prestige", "very high prestige"]);
        let counted: usize = cats
            .iter()
            .flat_map(|(_, boxes)| boxes.iter().map(|(_, b)| b.count))
            .sum();
        assert_eq!(counted, 2);
    }

    #[test]
    fn constant_values_still_bin() {
        let bins = EqualWidthBins::fit(&[50.0, 50.0], 6).unwrap();
        assert!(bins.bin(50.0).is_some());
    }

    #[test]
    fn prestige_categories_group_income_by_sex() {
        let ds = SurveyDataset::from_records(vec![
            person("Female", Some(10_000.0), Some(16.0), 12.0),
            person("Male", Some(12_000.0), Some(17.0), 12.0),
            person("Male", Some(90_000.0), Some(80.0), 18.0),
            person("Female", None, Some(80.0), 18.0),
        ]);
        let cats = income_by_prestige_category(&ds);
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].0, "very low prestige");
        assert_eq!(cats[0].1.len(), 2);
        assert_eq!(cats[1].0, "very high prestige");
        assert_eq!(cats[1].1.len(), 1);
        assert_eq!(cats[1].1[0].0, CellValue::from("Male"));
    }
}
