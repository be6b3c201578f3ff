use thiserror::Error;

use crate::data::columns::Selection;

/// Recoverable failures of the aggregation / re-render pipeline.
///
/// Neither variant is fatal: the controller keeps the last good chart for
/// `InvalidSelection` and shows an empty chart plus a notice for
/// `EmptyAggregation`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("unrecognized column '{column}'")]
    InvalidSelection { column: String },

    #[error("no responses to {selection}")]
    EmptyAggregation { selection: Selection },
}
