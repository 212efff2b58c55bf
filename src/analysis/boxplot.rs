use serde::Serialize;

use super::describe::{quantile_sorted, sorted};
use super::AnalysisError;

/// Whisker reach in multiples of the IQR.
pub const TUKEY_FENCE: f64 = 1.5;

/// Tukey box-and-whisker summary of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value at or above `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value at or below `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Values beyond the fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Result<Self, AnalysisError> {
        if values.is_empty() {
            return Err(AnalysisError::InsufficientData {
                what: "values for a boxplot",
                needed: 1,
                got: 0,
            });
        }

        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - TUKEY_FENCE * iqr;
        let high_fence = q3 + TUKEY_FENCE * iqr;

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|&&v| v >= low_fence && v <= high_fence);

        // The box itself always lies inside the fences, so `inside` is non-empty.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Ok(BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}
