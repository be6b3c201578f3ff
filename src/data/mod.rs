/// Data layer: survey table, cleaning, loading and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, clean each row (prepare) → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset  │  Vec<Record>, column index (read-only)
///   └───────────────┘
///        │                         │
///        ▼                         ▼
///   ┌───────────┐             ┌─────────┐
///   │ aggregate  │  crosstab   │  stats   │  means, boxes, OLS, bins
///   └───────────┘  → CountRow  └─────────┘
/// ```

pub mod aggregate;
pub mod columns;
pub mod loader;
pub mod model;
pub mod prepare;
pub mod stats;
