use serde::Serialize;
use statrs::statistics::Statistics;

use super::{numeric_cells, AnalysisError};
use crate::data::Dataset;

/// Pearson correlation between every pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` × `columns.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate all numeric columns of `dataset`.
    ///
    /// Each pair uses only rows where both cells are present. A pair with
    /// fewer than two such rows, or a zero-variance side, is NaN.
    pub fn of_dataset(dataset: &Dataset) -> Result<Self, AnalysisError> {
        let names = dataset.numeric_column_names();
        if names.is_empty() {
            return Err(AnalysisError::NoNumericColumns);
        }
        let cells = names
            .iter()
            .map(|n| numeric_cells(dataset, n))
            .collect::<Result<Vec<_>, _>>()?;

        let k = names.len();
        let mut values = vec![vec![f64::NAN; k]; k];
        for i in 0..k {
            for j in i..k {
                let r = pearson(cells[i], cells[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: names.into_iter().map(String::from).collect(),
            values,
        })
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Cell text at the fixed display precision.
    pub fn label(&self, i: usize, j: usize) -> String {
        let r = self.get(i, j);
        if r.is_nan() {
            "nan".to_string()
        } else {
            format!("{r:.2}")
        }
    }
}

/// Pearson r over pairwise-complete observations, clamped to [-1, 1].
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    if xs.len() < 2 {
        return f64::NAN;
    }

    let cov = xs.iter().covariance(ys.iter());
    let denom = xs.iter().std_dev() * ys.iter().std_dev();
    if denom == 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perfectly_linear_columns() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let up = [Some(2.0), Some(4.0), Some(6.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0)];
        assert_abs_diff_eq!(pearson(&x, &up), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pearson(&x, &down), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_cells_are_dropped_pairwise() {
        let x = [Some(1.0), Some(2.0), None, Some(4.0)];
        let y = [Some(1.0), Some(2.0), Some(100.0), Some(4.0)];
        assert_abs_diff_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_variance_is_nan() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let flat = [Some(5.0), Some(5.0), Some(5.0)];
        assert!(pearson(&x, &flat).is_nan());
    }

    #[test]
    fn matrix_skips_categorical_columns() {
        let ds = Dataset::new(
            "t",
            vec![
                Column::numeric("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
                Column::categorical("c", vec![Some("x".to_string()); 3]),
                Column::numeric("b", vec![Some(1.0), Some(3.0), Some(2.0)]),
            ],
        )
        .unwrap();
        let m = CorrelationMatrix::of_dataset(&ds).unwrap();
        assert_eq!(m.columns, vec!["a", "b"]);
        assert_abs_diff_eq!(m.get(0, 1), 0.5, epsilon = 1e-12);
        assert_eq!(m.label(0, 1), "0.50");
    }

    #[test]
    fn no_numeric_columns_is_an_error() {
        let ds = Dataset::new("t", vec![Column::categorical("c", vec![Some("x".into())])])
            .unwrap();
        assert_eq!(
            CorrelationMatrix::of_dataset(&ds).unwrap_err(),
            AnalysisError::NoNumericColumns
        );
    }

    #[test]
    fn iris_matrix_is_symmetric_with_unit_diagonal() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let m = CorrelationMatrix::of_dataset(&ds).unwrap();
        assert_eq!(m.size(), 4);
        for i in 0..4 {
            assert_abs_diff_eq!(m.get(i, i), 1.0, epsilon = 1e-12);
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert_abs_diff_eq!(m.get(0, 1), -0.117570, epsilon = 1e-5);
        assert_abs_diff_eq!(m.get(0, 2), 0.871754, epsilon = 1e-5);
        assert_abs_diff_eq!(m.get(2, 3), 0.962865, epsilon = 1e-5);
        assert_eq!(m.label(2, 3), "0.96");
    }
}
