//! Derived artifacts for one render pass.
//!
//! Every function here is pure: it borrows a [`Dataset`](crate::data::Dataset)
//! and returns a fresh value. Nothing is cached between passes.

pub mod boxplot;
pub mod correlation;
pub mod describe;
pub mod density;
pub mod error;
pub mod pairplot;
pub mod pca;
pub mod report;

pub use boxplot::BoxStats;
pub use correlation::CorrelationMatrix;
pub use describe::Summary;
pub use density::{Histogram, Kde};
pub use error::AnalysisError;
pub use pairplot::PairGrid;
pub use pca::PcaProjection;
pub use report::{render, MultivariateReport, Report, UnivariateReport, ViewMode};

use crate::data::Dataset;

/// Non-missing values of a numeric column.
pub fn present_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>, AnalysisError> {
    let cells = numeric_cells(dataset, column)?;
    Ok(cells.iter().flatten().copied().collect())
}

/// Cells of a numeric column, distinguishing absent from non-numeric columns.
pub(crate) fn numeric_cells<'a>(
    dataset: &'a Dataset,
    column: &str,
) -> Result<&'a [Option<f64>], AnalysisError> {
    if dataset.column(column).is_none() {
        return Err(AnalysisError::UnknownColumn(column.to_string()));
    }
    dataset
        .numeric(column)
        .ok_or_else(|| AnalysisError::NotNumeric(column.to_string()))
}
