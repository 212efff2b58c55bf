use thiserror::Error;

/// Why a render pass could not produce its artifacts.
///
/// These surface as a per-pass error in the UI; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("dataset has no numeric columns")]
    NoNumericColumns,

    #[error("no column named '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("dataset has no categorical column to group by")]
    NoLabelColumn,

    #[error("column '{column}' has {count} missing values")]
    MissingValues { column: String, count: usize },

    #[error("column '{column}' has {count} infinite values")]
    NonFinite { column: String, count: usize },

    #[error("need at least {needed} {what}, got {got}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("density estimate failed: {0}")]
    Density(String),
}
