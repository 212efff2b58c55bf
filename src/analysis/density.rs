use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

use super::describe::{quantile_sorted, sorted};
use super::AnalysisError;

/// Points the density curve is evaluated on.
pub const KDE_GRID_SIZE: usize = 200;

/// Freedman–Diaconis bin counts above this fall back to Sturges.
pub const MAX_BINS: usize = 1_000;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram. `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub bin_width: f64,
}

impl Histogram {
    /// Bin `values` with an automatically chosen width.
    ///
    /// Width is the smaller of the Sturges and Freedman–Diaconis estimates,
    /// falling back to Sturges when the IQR is zero or the Freedman–Diaconis
    /// count exceeds [`MAX_BINS`]. A constant sample gets a single bin of
    /// width 1 centred on the value. Non-finite values are skipped.
    pub fn auto(values: &[f64]) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() < values.len() {
            log::debug!("Histogram skipped {} non-finite values", values.len() - finite.len());
        }
        let values = finite.as_slice();
        if values.is_empty() {
            return Histogram {
                edges: vec![0.0, 1.0],
                counts: vec![0],
                bin_width: 1.0,
            };
        }

        let sorted = sorted(values);
        let lo = sorted[0];
        let hi = sorted[sorted.len() - 1];
        let range = hi - lo;

        if range <= 0.0 {
            return Histogram {
                edges: vec![lo - 0.5, lo + 0.5],
                counts: vec![values.len()],
                bin_width: 1.0,
            };
        }

        let n = values.len() as f64;
        let sturges = range / (n.log2() + 1.0);
        let iqr = quantile_sorted(&sorted, 0.75) - quantile_sorted(&sorted, 0.25);
        let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
        let mut bins = (range / width).ceil();
        if bins > MAX_BINS as f64 {
            bins = (range / sturges).ceil();
        }
        let bins = (bins as usize).clamp(1, MAX_BINS);

        Self::with_bins(&sorted, lo, hi, bins)
    }

    fn with_bins(values: &[f64], lo: f64, hi: f64, bins: usize) -> Self {
        let bin_width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * bin_width).collect();
        let mut counts = vec![0usize; bins];
        for &v in values {
            // Last bin is closed on the right.
            let idx = (((v - lo) / bin_width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Histogram {
            edges,
            counts,
            bin_width,
        }
    }

    /// Number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Centre of each bin, paired with its count.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Gaussian KDE sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kde {
    pub bandwidth: f64,
    pub xs: Vec<f64>,
    pub densities: Vec<f64>,
}

impl Kde {
    /// Estimate the density of `values`.
    ///
    /// Bandwidth follows Scott's rule (`std * n^(-1/5)`). The grid spans the
    /// data range widened by `cut` bandwidths on each side.
    pub fn estimate(values: &[f64], cut: f64) -> Result<Self, AnalysisError> {
        if values.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                what: "values for a density estimate",
                needed: 2,
                got: values.len(),
            });
        }

        let std = values.iter().std_dev();
        let bandwidth = std * (values.len() as f64).powf(-0.2);
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(AnalysisError::Density(format!(
                "degenerate bandwidth {bandwidth} (zero variance?)"
            )));
        }

        let kernel = Normal::new(0.0, 1.0).map_err(|e| AnalysisError::Density(e.to_string()))?;
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min) - cut * bandwidth;
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + cut * bandwidth;
        let step = (hi - lo) / (KDE_GRID_SIZE - 1) as f64;
        let norm = values.len() as f64 * bandwidth;

        let xs: Vec<f64> = (0..KDE_GRID_SIZE).map(|i| lo + i as f64 * step).collect();
        let densities = xs
            .iter()
            .map(|&x| {
                values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum::<f64>()
                    / norm
            })
            .collect();

        Ok(Kde {
            bandwidth,
            xs,
            densities,
        })
    }

    /// Multiply every density by `factor` (e.g. to overlay on counts).
    pub fn scaled(mut self, factor: f64) -> Self {
        for d in &mut self.densities {
            *d *= factor;
        }
        self
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.xs
            .iter()
            .zip(&self.densities)
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}
