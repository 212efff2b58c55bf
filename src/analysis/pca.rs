use nalgebra::{DMatrix, SymmetricEigen};
use serde::Serialize;

use super::{numeric_cells, AnalysisError};
use crate::data::Dataset;

/// Components the dashboard projects onto.
pub const N_COMPONENTS: usize = 2;

/// Result of fitting PCA and projecting every record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PcaProjection {
    /// Input columns, in the order of the loading vectors.
    pub columns: Vec<String>,
    /// One row per record, one entry per component.
    pub scores: Vec<Vec<f64>>,
    /// Loading vectors (unit length), one per component.
    pub components: Vec<Vec<f64>>,
    /// Variance captured by each component.
    pub explained_variance: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
    /// Group label of each record, when the dataset has one.
    pub labels: Option<Vec<Option<String>>>,
}

impl PcaProjection {
    /// Project all numeric columns of `dataset` onto `n_components` axes.
    ///
    /// Data is mean-centred but not scaled. Missing cells are an error.
    pub fn of_dataset(dataset: &Dataset, n_components: usize) -> Result<Self, AnalysisError> {
        let names = dataset.numeric_column_names();
        if names.is_empty() {
            return Err(AnalysisError::NoNumericColumns);
        }

        let mut columns = Vec::with_capacity(names.len());
        for name in &names {
            let cells = numeric_cells(dataset, name)?;
            let missing = cells.iter().filter(|c| c.is_none()).count();
            if missing > 0 {
                return Err(AnalysisError::MissingValues {
                    column: name.to_string(),
                    count: missing,
                });
            }
            columns.push(cells.iter().flatten().copied().collect::<Vec<f64>>());
        }

        let n = dataset.len();
        let x = DMatrix::from_fn(n, columns.len(), |i, j| columns[j][i]);
        let fit = fit_transform(&x, n_components)?;

        let labels = dataset
            .label_column()
            .and_then(|col| dataset.categorical(col))
            .map(<[Option<String>]>::to_vec);

        Ok(PcaProjection {
            columns: names.into_iter().map(String::from).collect(),
            labels,
            ..fit
        })
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores as `(x, y)` pairs on the first two components.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.scores.iter().map(|row| [row[0], row[1]])
    }
}

/// Fit on an `n × p` matrix and return its projection.
///
/// Eigen-decomposes the sample covariance, keeps the `k` largest axes and
/// flips each so its largest-magnitude loading is positive.
pub fn fit_transform(x: &DMatrix<f64>, k: usize) -> Result<PcaProjection, AnalysisError> {
    let (n, p) = x.shape();
    if p < k {
        return Err(AnalysisError::InsufficientData {
            what: "numeric columns",
            needed: k,
            got: p,
        });
    }
    if n < k.max(2) {
        return Err(AnalysisError::InsufficientData {
            what: "rows",
            needed: k.max(2),
            got: n,
        });
    }

    let mut centred = x.clone();
    for mut col in centred.column_iter_mut() {
        let mean = col.mean();
        col.add_scalar_mut(-mean);
    }

    let covariance = (centred.transpose() * &centred) / (n as f64 - 1.0);
    let eigen = SymmetricEigen::new(covariance);

    let mut order: Vec<usize> = (0..p).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let total: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();
    let mut loadings = DMatrix::<f64>::zeros(p, k);
    let mut explained_variance = Vec::with_capacity(k);
    for (slot, &idx) in order.iter().take(k).enumerate() {
        let mut v = eigen.eigenvectors.column(idx).into_owned();
        let pivot = v.iter().copied().fold(0.0_f64, |acc, e| {
            if e.abs() > acc.abs() {
                e
            } else {
                acc
            }
        });
        if pivot < 0.0 {
            v.neg_mut();
        }
        loadings.set_column(slot, &v);
        explained_variance.push(eigen.eigenvalues[idx].max(0.0));
    }

    let projected = centred * &loadings;
    let explained_variance_ratio = explained_variance
        .iter()
        .map(|v| if total > 0.0 { v / total } else { f64::NAN })
        .collect();

    Ok(PcaProjection {
        columns: (0..p).map(|j| format!("x{j}")).collect(),
        scores: projected
            .row_iter()
            .map(|r| r.iter().copied().collect())
            .collect(),
        components: loadings
            .column_iter()
            .map(|c| c.iter().copied().collect())
            .collect(),
        explained_variance,
        explained_variance_ratio,
        labels: None,
    })
}
