use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Synthetic respondents, written with raw GSS column names so the file goes
/// through the same cleaning as the real extract.
const RESPONDENTS: usize = 2348;

const REGIONS: [&str; 9] = [
    "new england",
    "middle atlantic",
    "e. nor. central",
    "w. nor. central",
    "south atlantic",
    "e. sou. central",
    "w. sou. central",
    "mountain",
    "pacific",
];

const SATISFACTION: [&str; 4] = [
    "very satisfied",
    "mod. satisfied",
    "a little dissat",
    "very dissatisfied",
];

const AGREEMENT: [&str; 4] = ["strongly agree", "agree", "disagree", "strongly disagree"];

/// Agreement-scale questions, by raw GSS name.
const AGREEMENT_QUESTIONS: [&str; 5] = ["fechld", "fefam", "fepol", "fepresch", "meovrwrk"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index drawn from unnormalised `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut r = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if r < *w {
                return i;
            }
            r -= w;
        }
        weights.len() - 1
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// A survey answer, or one of the GSS "no answer" codes.
fn answer(rng: &mut SimpleRng, labels: &[&str; 4], weights: &[f64; 4]) -> String {
    if rng.chance(0.3) {
        // Split ballot: most respondents were not asked every question.
        return "IAP".to_string();
    }
    labels[rng.weighted(weights)].to_string()
}

fn str_array(values: &[String]) -> ArrayRef {
    Arc::new(StringArray::from(
        values.iter().map(String::as_str).collect::<Vec<_>>(),
    ))
}

fn main() {
    let mut rng = SimpleRng::new(2018);

    let mut ids: Vec<i64> = Vec::with_capacity(RESPONDENTS);
    let mut sex: Vec<String> = Vec::with_capacity(RESPONDENTS);
    let mut region: Vec<String> = Vec::with_capacity(RESPONDENTS);
    let mut educ: Vec<Option<f64>> = Vec::with_capacity(RESPONDENTS);
    let mut age: Vec<String> = Vec::with_capacity(RESPONDENTS);
    let mut coninc: Vec<Option<f64>> = Vec::with_capacity(RESPONDENTS);
    let mut prestg10: Vec<Option<f64>> = Vec::with_capacity(RESPONDENTS);
    let mut sei10: Vec<Option<f64>> = Vec::with_capacity(RESPONDENTS);
    let mut satjob: Vec<String> = Vec::with_capacity(RESPONDENTS);
    let mut agreement: Vec<Vec<String>> =
        vec![Vec::with_capacity(RESPONDENTS); AGREEMENT_QUESTIONS.len()];

    for i in 0..RESPONDENTS {
        let female = rng.chance(0.55);
        let years = rng.gauss(13.7, 3.0).round().clamp(0.0, 20.0);
        let prestige = (rng.gauss(44.0, 13.0) + (years - 13.0) * 1.5).clamp(16.0, 80.0).round();
        let pay_gap = if female { 0.83 } else { 1.0 };
        let income = (rng.gauss(12_000.0, 9_000.0) + prestige * 700.0) * pay_gap;
        let years_old = rng.gauss(48.0, 17.0).round().clamp(18.0, 95.0);

        ids.push(i as i64 + 1);
        sex.push(if female { "female" } else { "male" }.to_string());
        let r = rng.weighted(&[5.0, 13.0, 15.0, 7.0, 20.0, 6.0, 11.0, 8.0, 15.0]);
        region.push(REGIONS[r].to_string());
        educ.push(Some(years));
        age.push(if years_old >= 89.0 {
            "89 or older".to_string()
        } else {
            format!("{years_old}")
        });
        coninc.push((!rng.chance(0.1)).then_some(income.max(300.0).round()));
        prestg10.push((!rng.chance(0.05)).then_some(prestige));
        let sei = (prestige * 1.1 + rng.gauss(0.0, 8.0)).clamp(9.0, 93.0);
        sei10.push((!rng.chance(0.05)).then_some(sei));

        satjob.push(answer(&mut rng, &SATISFACTION, &[0.45, 0.38, 0.11, 0.06]));

        // Traditional-role questions lean towards disagreement.
        let lean = if female { 1.2 } else { 1.0 };
        for (q, column) in agreement.iter_mut().enumerate() {
            let weights = match q {
                0 | 4 => [0.3, 0.45, 0.18, 0.07],
                _ => [0.06, 0.2 / lean, 0.45 * lean, 0.25 * lean],
            };
            column.push(answer(&mut rng, &AGREEMENT, &weights));
        }
    }

    let mut fields = vec![
        Field::new("id", DataType::Int64, false),
        Field::new("sex", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("educ", DataType::Float64, true),
        Field::new("age", DataType::Utf8, false),
        Field::new("coninc", DataType::Float64, true),
        Field::new("prestg10", DataType::Float64, true),
        Field::new("sei10", DataType::Float64, true),
        Field::new("satjob", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(ids)),
        str_array(&sex),
        str_array(&region),
        Arc::new(Float64Array::from(educ)),
        str_array(&age),
        Arc::new(Float64Array::from(coninc)),
        Arc::new(Float64Array::from(prestg10)),
        Arc::new(Float64Array::from(sei10)),
        str_array(&satjob),
    ];
    for (name, values) in AGREEMENT_QUESTIONS.iter().zip(&agreement) {
        fields.push(Field::new(*name, DataType::Utf8, false));
        columns.push(str_array(values));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch =
        RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gss_sample.parquet".to_string());
    let file = std::fs::File::create(&output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {RESPONDENTS} synthetic respondents to {output_path}");
}
