use std::collections::{BTreeMap, BTreeSet};

use super::error::DatasetError;

// ---------------------------------------------------------------------------
// ColumnData – the typed cells of one column
// ---------------------------------------------------------------------------

/// Cells of a single column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnData::Numeric(_))
    }
}

/// A named column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::Categorical(values),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with a pre-computed category index.
///
/// Treated as immutable once built; views only ever borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Name the dataset was fetched under (e.g. `iris`).
    pub name: String,
    /// Columns in source order.
    pub columns: Vec<Column>,
    /// For each categorical column the sorted set of distinct values.
    pub categories: BTreeMap<String, BTreeSet<String>>,
    n_rows: usize,
}

impl Dataset {
    /// Assemble a dataset, checking that every column has the same length.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, DatasetError> {
        let n_rows = columns.first().map(|c| c.data.len()).unwrap_or(0);
        let mut seen = BTreeSet::new();
        let mut categories = BTreeMap::new();

        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(DatasetError::DuplicateColumn(col.name.clone()));
            }
            if col.data.len() != n_rows {
                return Err(DatasetError::RaggedColumn {
                    column: col.name.clone(),
                    expected: n_rows,
                    got: col.data.len(),
                });
            }
            if let ColumnData::Categorical(values) = &col.data {
                let distinct: BTreeSet<String> = values.iter().flatten().cloned().collect();
                categories.insert(col.name.clone(), distinct);
            }
        }

        Ok(Dataset {
            name: name.into(),
            columns,
            categories,
            n_rows,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the numeric columns, in source order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Cells of a numeric column, or `None` if absent or categorical.
    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match &self.column(name)?.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Cells of a categorical column, or `None` if absent or numeric.
    pub fn categorical(&self, name: &str) -> Option<&[Option<String>]> {
        match &self.column(name)?.data {
            ColumnData::Categorical(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }

    /// The grouping column used to colour plots: the first categorical one.
    pub fn label_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| !c.data.is_numeric())
            .map(|c| c.name.as_str())
    }
}
