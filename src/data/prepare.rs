use std::collections::BTreeMap;

use super::model::{CellValue, Record};

// ---------------------------------------------------------------------------
// Raw GSS extract → cleaned dashboard table
// ---------------------------------------------------------------------------

/// GSS variable names and the names the dashboard uses for them.
const RENAMES: [(&str, &str); 12] = [
    ("wtss", "weight"),
    ("educ", "education"),
    ("coninc", "income"),
    ("prestg10", "job_prestige"),
    ("mapres10", "mother_job_prestige"),
    ("papres10", "father_job_prestige"),
    ("sei10", "socioeconomic_index"),
    ("fechld", "relationship"),
    ("fefam", "male_breadwinner"),
    ("fepol", "men_bettersuited"),
    ("fepresch", "child_suffer"),
    ("meovrwrk", "men_overwork"),
];

/// Columns kept after cleaning (post-rename names).
pub const KEPT_COLUMNS: [&str; 17] = [
    "id",
    "weight",
    "sex",
    "education",
    "region",
    "age",
    "income",
    "job_prestige",
    "mother_job_prestige",
    "father_job_prestige",
    "socioeconomic_index",
    "satjob",
    "relationship",
    "male_breadwinner",
    "men_bettersuited",
    "child_suffer",
    "men_overwork",
];

/// Survey codes for "no usable answer".
const NA_TOKENS: [&str; 7] = [
    "IAP",
    "IAP,DK,NA,uncodeable",
    "NOT SURE",
    "DK",
    "IAP, DK, NA, uncodeable",
    ".a",
    "CAN'T CHOOSE",
];

/// Map a raw column name to its cleaned name, or `None` if the column is
/// not used by the dashboard.
pub fn clean_column_name(raw: &str) -> Option<&'static str> {
    let renamed = RENAMES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to);
    match renamed {
        Some(name) => Some(name),
        None => KEPT_COLUMNS.iter().copied().find(|c| *c == raw),
    }
}

/// Generic missing-value spellings that CSV exports produce alongside the
/// survey codes.
const DEFAULT_NA_TOKENS: [&str; 18] = [
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Whether a raw text cell is one of the survey's missing-value codes or a
/// generic missing-value spelling.
pub fn is_missing_token(s: &str) -> bool {
    s.is_empty() || NA_TOKENS.contains(&s) || DEFAULT_NA_TOKENS.contains(&s)
}

/// Clean one raw row: select and rename columns, normalise missing codes,
/// top-code `age` and capitalise `sex`.
pub fn clean_record(raw: BTreeMap<String, CellValue>) -> Record {
    let mut values = BTreeMap::new();
    for (col, val) in raw {
        let Some(name) = clean_column_name(&col) else {
            continue;
        };
        let val = match val {
            CellValue::String(s) if is_missing_token(&s) => CellValue::Null,
            other => other,
        };
        let val = match name {
            "age" => clean_age(val),
            "sex" => clean_sex(val),
            _ => val,
        };
        values.insert(name.to_string(), val);
    }
    Record { values }
}

fn clean_age(val: CellValue) -> CellValue {
    match val {
        CellValue::String(s) if s == "89 or older" => CellValue::Float(89.0),
        CellValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),
        CellValue::Integer(i) => CellValue::Float(i as f64),
        other => other,
    }
}

fn clean_sex(val: CellValue) -> CellValue {
    match val {
        CellValue::String(s) if s == "female" => CellValue::from("Female"),
        CellValue::String(s) if s == "male" => CellValue::from("Male"),
        other => other,
    }
}
