use thiserror::Error;

/// Failures while building or fetching a [`Dataset`](super::Dataset).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unknown sample dataset '{name}' (available: {})", available.join(", "))]
    UnknownDataset {
        name: String,
        available: Vec<String>,
    },

    #[error("column '{column}' has {got} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV row {row}: expected {expected} fields, got {got}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
}
