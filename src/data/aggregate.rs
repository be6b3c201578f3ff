use std::collections::BTreeMap;

use super::columns::{Selection, Vocabulary};
use super::model::{CellValue, SurveyDataset};

// ---------------------------------------------------------------------------
// Long-format count table
// ---------------------------------------------------------------------------

/// One observed (group, answer) combination and how many respondents gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountRow {
    pub grouping: CellValue,
    pub label: &'static str,
    pub count: usize,
}

/// Result of aggregating one [`Selection`]: rows plus the axis orders the
/// chart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub selection: Selection,
    /// Rows ordered by answer rank, then by grouping value.
    pub rows: Vec<CountRow>,
    /// Full label order for the legend / series colours.
    pub label_order: &'static [&'static str],
    /// Grouping values that appear in `rows`, ascending.
    pub groups: Vec<CellValue>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total respondents counted for one grouping value.
    pub fn group_total(&self, group: &CellValue) -> usize {
        self.rows
            .iter()
            .filter(|r| &r.grouping == group)
            .map(|r| r.count)
            .sum()
    }
}

/// Cross-tabulate `selection.grouping` against `selection.response` and
/// reshape into long format.
///
/// Rows missing either value are skipped, as are answers outside the
/// question's vocabulary.  Only observed combinations are emitted.
pub fn aggregate(dataset: &SurveyDataset, selection: Selection) -> Aggregation {
    let vocab: Vocabulary = selection.response.vocabulary();
    let response_col = selection.response.name();
    let grouping_col = selection.grouping.name();

    // group value → per-rank counts
    let mut crosstab: BTreeMap<CellValue, [usize; 4]> = BTreeMap::new();
    let mut off_vocabulary = 0usize;

    for rec in &dataset.records {
        let (Some(group), Some(answer)) = (rec.get(grouping_col), rec.get(response_col)) else {
            continue;
        };
        let Some(rank) = answer.as_str().and_then(|a| vocab.rank(a)) else {
            off_vocabulary += 1;
            continue;
        };
        crosstab.entry(group.clone()).or_insert([0; 4])[rank] += 1;
    }

    if off_vocabulary > 0 {
        log::debug!("{response_col}: skipped {off_vocabulary} answers outside the {vocab:?} scale");
    }

    // Melt: label-major so the output is already sorted by rank, with the
    // crosstab's ascending group order inside each rank.
    let labels = vocab.labels();
    let mut rows = Vec::new();
    for (rank, &label) in labels.iter().enumerate() {
        for (group, counts) in &crosstab {
            if counts[rank] > 0 {
                rows.push(CountRow {
                    grouping: group.clone(),
                    label,
                    count: counts[rank],
                });
            }
        }
    }

    Aggregation {
        selection,
        rows,
        label_order: labels,
        groups: crosstab.into_keys().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{GroupingColumn, ResponseColumn};
    use crate::data::model::Record;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().map(|(k, v)| (*k, CellValue::from(*v))))
    }

    fn satjob_by_sex() -> Selection {
        Selection::new(ResponseColumn::Satjob, GroupingColumn::Sex)
    }

    #[test]
    fn counts_observed_combinations_in_rank_order() {
        let ds = SurveyDataset::from_records(vec![
            rec(&[("sex", "Female"), ("satjob", "very satisfied")]),
            rec(&[("sex", "Female"), ("satjob", "very satisfied")]),
            rec(&[("sex", "Male"), ("satjob", "a little dissat")]),
        ]);

        let agg = aggregate(&ds, satjob_by_sex());
        assert_eq!(
            agg.rows,
            vec![
                CountRow {
                    grouping: "Female".into(),
                    label: "very satisfied",
                    count: 2
                },
                CountRow {
                    grouping: "Male".into(),
                    label: "a little dissat",
                    count: 1
                },
            ]
        );
        assert_eq!(agg.label_order, Vocabulary::Satisfaction.labels());
    }

    #[test]
    fn rank_order_is_independent_of_input_order() {
        let answers = ["strongly disagree", "agree", "disagree", "strongly agree"];
        let mut records: Vec<Record> = Vec::new();
        for (i, &a) in answers.iter().enumerate() {
            let region = if i % 2 == 0 { "south atlantic" } else { "new england" };
            records.push(rec(&[("region", region), ("men_overwork", a)]));
        }
        let forward = SurveyDataset::from_records(records.clone());
        records.reverse();
        let backward = SurveyDataset::from_records(records);

        let sel = Selection::new(ResponseColumn::MenOverwork, GroupingColumn::Region);
        let a = aggregate(&forward, sel);
        let b = aggregate(&backward, sel);
        assert_eq!(a, b);

        let ranks: Vec<usize> = a
            .rows
            .iter()
            .map(|r| Vocabulary::Agreement.rank(r.label).unwrap())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn ties_keep_ascending_group_order() {
        let ds = SurveyDataset::from_records(vec![
            rec(&[("region", "pacific"), ("child_suffer", "agree")]),
            rec(&[("region", "e. nor. central"), ("child_suffer", "agree")]),
            rec(&[("region", "new england"), ("child_suffer", "agree")]),
        ]);
        let agg = aggregate(
            &ds,
            Selection::new(ResponseColumn::ChildSuffer, GroupingColumn::Region),
        );
        let groups: Vec<String> = agg.rows.iter().map(|r| r.grouping.to_string()).collect();
        assert_eq!(groups, vec!["e. nor. central", "new england", "pacific"]);
    }

    #[test]
    fn numeric_groups_sort_numerically() {
        let ds = SurveyDataset::from_records(vec![
            Record::from_pairs([
                ("education", CellValue::Float(16.0)),
                ("male_breadwinner", CellValue::from("agree")),
            ]),
            Record::from_pairs([
                ("education", CellValue::Float(9.0)),
                ("male_breadwinner", CellValue::from("agree")),
            ]),
        ]);
        let agg = aggregate(
            &ds,
            Selection::new(ResponseColumn::MaleBreadwinner, GroupingColumn::Education),
        );
        assert_eq!(agg.groups, vec![CellValue::Float(9.0), CellValue::Float(16.0)]);
    }

    #[test]
    fn only_the_selected_vocabulary_appears() {
        let ds = SurveyDataset::from_records(vec![
            rec(&[("sex", "Male"), ("satjob", "agree")]),
            rec(&[("sex", "Male"), ("satjob", "mod. satisfied")]),
            rec(&[("sex", "Male"), ("relationship", "very satisfied")]),
            rec(&[("sex", "Male"), ("relationship", "strongly agree")]),
        ]);

        let sat = aggregate(&ds, satjob_by_sex());
        assert!(sat
            .rows
            .iter()
            .all(|r| Vocabulary::Satisfaction.rank(r.label).is_some()));
        assert_eq!(sat.rows.len(), 1);

        let rel = aggregate(
            &ds,
            Selection::new(ResponseColumn::Relationship, GroupingColumn::Sex),
        );
        assert!(rel
            .rows
            .iter()
            .all(|r| Vocabulary::Agreement.rank(r.label).is_some()));
        assert_eq!(rel.rows.len(), 1);
        assert_eq!(rel.label_order, Vocabulary::Agreement.labels());
    }

    #[test]
    fn group_totals_match_non_missing_responses() {
        let mut records = vec![
            rec(&[("sex", "Female"), ("satjob", "very satisfied")]),
            rec(&[("sex", "Female"), ("satjob", "mod. satisfied")]),
            rec(&[("sex", "Female"), ("satjob", "mod. satisfied")]),
            rec(&[("sex", "Female")]),
            rec(&[("sex", "Male"), ("satjob", "very dissatisfied")]),
            rec(&[("satjob", "very satisfied")]),
        ];
        records.push(Record::from_pairs([
            ("sex", CellValue::from("Male")),
            ("satjob", CellValue::Null),
        ]));
        let ds = SurveyDataset::from_records(records);
        let agg = aggregate(&ds, satjob_by_sex());

        for group in &agg.groups {
            let expected = ds
                .records
                .iter()
                .filter(|r| r.get("sex") == Some(group) && r.get("satjob").is_some())
                .count();
            assert_eq!(agg.group_total(group), expected, "{group}");
        }
        assert_eq!(agg.group_total(&"Female".into()), 3);
        assert_eq!(agg.group_total(&"Male".into()), 1);
    }

    #[test]
    fn unobserved_combinations_are_not_zero_filled() {
        let ds = SurveyDataset::from_records(vec![rec(&[
            ("sex", "Male"),
            ("satjob", "very satisfied"),
        ])]);
        let agg = aggregate(&ds, satjob_by_sex());
        assert_eq!(agg.rows.len(), 1);
        assert!(agg.rows.iter().all(|r| r.count > 0));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let ds = SurveyDataset::from_records(vec![
            rec(&[("sex", "Male"), ("satjob", "very satisfied")]),
            rec(&[("sex", "Female"), ("satjob", "a little dissat")]),
        ]);
        assert_eq!(aggregate(&ds, satjob_by_sex()), aggregate(&ds, satjob_by_sex()));
    }

    #[test]
    fn empty_dataset_yields_empty_aggregation() {
        let agg = aggregate(&SurveyDataset::default(), satjob_by_sex());
        assert!(agg.is_empty());
        assert!(agg.groups.is_empty());
    }
}
