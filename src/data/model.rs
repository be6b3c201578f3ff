use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.  Grouping values end up as `BTreeMap`
/// keys, so `CellValue` must be `Ord`, and equality is defined by that order.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can key maps by CellValue --

/// `-0.0` and `0.0` are the same number.
fn float_key(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        // Integers and floats share one rank so a numeric column that mixes
        // `12` and `12.5` still sorts numerically.
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => float_key(*a).total_cmp(&float_key(*b)),
            (Integer(a), Float(b)) => (*a as f64)
                .total_cmp(&float_key(*b))
                .then(std::cmp::Ordering::Less),
            (Float(a), Integer(b)) => float_key(*a)
                .total_cmp(&(*b as f64))
                .then(std::cmp::Ordering::Greater),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Whole floats (education years read from parquet) print like ints.
            CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for numeric statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_nan() => None,
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The string payload, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

// ---------------------------------------------------------------------------
// Record – one survey respondent
// ---------------------------------------------------------------------------

/// One row of the survey table: column_name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    /// Build a record from `(column, value)` pairs.
    #[cfg(test)]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Record {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The non-missing value of a column.  Nulls and NaNs count as absent.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column).filter(|v| !v.is_null())
    }

    /// Numeric value of a column, if present and numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The cleaned survey table.  Constructed once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// All respondents (rows), in file order.
    pub records: Vec<Record>,
    /// Sorted list of column names present in at least one row.
    pub column_names: Vec<String>,
    /// For each column the sorted set of distinct non-missing values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl SurveyDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.values {
                column_names_set.insert(col.clone());
                if !val.is_null() {
                    unique_values
                        .entry(col.clone())
                        .or_default()
                        .insert(val.clone());
                }
            }
        }
        SurveyDataset {
            records,
            column_names: column_names_set.into_iter().collect(),
            unique_values,
        }
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_sort_by_value_across_int_and_float() {
        let mut vals = vec![
            CellValue::Float(12.5),
            CellValue::Integer(16),
            CellValue::Integer(12),
            CellValue::Null,
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                CellValue::Null,
                CellValue::Integer(12),
                CellValue::Float(12.5),
                CellValue::Integer(16),
            ]
        );
    }

    #[test]
    fn equality_agrees_with_ordering() {
        assert_eq!(CellValue::Float(-0.0), CellValue::Float(0.0));
        assert_eq!(
            CellValue::Float(-0.0).cmp(&CellValue::Float(0.0)),
            std::cmp::Ordering::Equal
        );
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Integer(12), CellValue::Float(12.0));
        assert!(CellValue::Integer(0) < CellValue::Float(-0.0));

        let keys: BTreeSet<CellValue> = [CellValue::Float(0.0), CellValue::Float(-0.0)]
            .into_iter()
            .collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn record_get_treats_null_and_nan_as_missing() {
        let rec = Record::from_pairs([
            ("sex", CellValue::from("Female")),
            ("income", CellValue::Float(f64::NAN)),
            ("satjob", CellValue::Null),
        ]);
        assert_eq!(rec.get("sex"), Some(&CellValue::from("Female")));
        assert_eq!(rec.get("income"), None);
        assert_eq!(rec.get("satjob"), None);
        assert_eq!(rec.get("region"), None);
    }

    #[test]
    fn unique_values_skip_nulls() {
        let ds = SurveyDataset::from_records(vec![
            Record::from_pairs([("sex", CellValue::from("Male"))]),
            Record::from_pairs([("sex", CellValue::Null)]),
            Record::from_pairs([("sex", CellValue::from("Female"))]),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["sex".to_string()]);
        let sexes: Vec<String> = ds.unique_values["sex"].iter().map(|v| v.to_string()).collect();
        assert_eq!(sexes, vec!["Female", "Male"]);
    }

    #[test]
    fn whole_floats_display_without_decimals() {
        assert_eq!(CellValue::Float(12.0).to_string(), "12");
        assert_eq!(CellValue::Float(3.14159).to_string(), "3.14");
    }
}
