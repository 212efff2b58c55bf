use serde::Serialize;
use statrs::statistics::Statistics;

use super::{present_values, AnalysisError};
use crate::data::Dataset;

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub column: String,
    /// Non-missing values only.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise a column of `dataset`, skipping missing cells.
    pub fn of_column(dataset: &Dataset, column: &str) -> Result<Self, AnalysisError> {
        let values = present_values(dataset, column)?;
        Ok(Self::of_values(column, &values))
    }

    /// Summarise raw values. An empty slice yields NaN for every statistic.
    pub fn of_values(column: &str, values: &[f64]) -> Self {
        let sorted = sorted(values);
        Summary {
            column: column.to_string(),
            count: values.len(),
            mean: values.iter().mean(),
            std: values.iter().std_dev(),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.50),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// `(label, value)` rows in display order.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Copy and sort ascending.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Quantile by linear interpolation between closest ranks.
///
/// `sorted` must be ascending. Returns NaN for an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, Dataset};
    use approx::assert_abs_diff_eq;

    #[test]
    fn quantile_interpolates_between_ranks() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(quantile_sorted(&v, 0.0), 1.0);
        assert_abs_diff_eq!(quantile_sorted(&v, 0.5), 2.5);
        assert_abs_diff_eq!(quantile_sorted(&v, 0.25), 1.75);
        assert_abs_diff_eq!(quantile_sorted(&v, 1.0), 4.0);
    }

    #[test]
    fn quantile_of_empty_is_nan() {
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn count_excludes_missing_cells() {
        let ds = Dataset::new(
            "t",
            vec![Column::numeric(
                "v",
                vec![Some(2.0), None, Some(4.0), None, Some(9.0)],
            )],
        )
        .unwrap();
        let s = Summary::of_column(&ds, "v").unwrap();
        assert_eq!(s.count, 3);
        assert_abs_diff_eq!(s.mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.min, 2.0);
        assert_abs_diff_eq!(s.max, 9.0);
        assert_abs_diff_eq!(s.q50, 4.0);
    }

    #[test]
    fn single_value_has_undefined_std() {
        let s = Summary::of_values("v", &[3.0]);
        assert_eq!(s.count, 1);
        assert_abs_diff_eq!(s.mean, 3.0);
        assert!(s.std.is_nan());
    }

    #[test]
    fn empty_column_is_all_nan() {
        let s = Summary::of_values("v", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert!(s.max.is_nan());
    }

    #[test]
    fn categorical_column_is_rejected() {
        let ds = Dataset::new("t", vec![Column::categorical("c", vec![Some("a".into())])])
            .unwrap();
        assert_eq!(
            Summary::of_column(&ds, "c").unwrap_err(),
            AnalysisError::NotNumeric("c".into())
        );
        assert_eq!(
            Summary::of_column(&ds, "nope").unwrap_err(),
            AnalysisError::UnknownColumn("nope".into())
        );
    }

    #[test]
    fn iris_sepal_length_matches_reference() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let s = Summary::of_column(&ds, "sepal_length").unwrap();
        assert_eq!(s.count, 150);
        assert_abs_diff_eq!(s.mean, 5.843333, epsilon = 1e-5);
        assert_abs_diff_eq!(s.std, 0.828066, epsilon = 1e-5);
        assert_abs_diff_eq!(s.min, 4.3);
        assert_abs_diff_eq!(s.q25, 5.1, epsilon = 1e-9);
        assert_abs_diff_eq!(s.q50, 5.8, epsilon = 1e-9);
        assert_abs_diff_eq!(s.q75, 6.4, epsilon = 1e-9);
        assert_abs_diff_eq!(s.max, 7.9);
    }

    #[test]
    fn every_numeric_iris_column_counts_all_rows() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        for col in ds.numeric_column_names() {
            let present = ds.numeric(col).unwrap().iter().flatten().count();
            assert_eq!(Summary::of_column(&ds, col).unwrap().count, present);
        }
    }
}
