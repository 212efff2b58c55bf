use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use super::pca::N_COMPONENTS;
use super::{
    present_values, AnalysisError, BoxStats, CorrelationMatrix, Histogram, Kde, PairGrid,
    PcaProjection, Summary,
};
use crate::data::Dataset;

// ---------------------------------------------------------------------------
// ViewMode – the two presentation modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum ViewMode {
    #[default]
    Univariate,
    Multivariate,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Univariate, ViewMode::Multivariate];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Univariate => "Univariate",
            ViewMode::Multivariate => "Multivariate",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Output bundles
// ---------------------------------------------------------------------------

/// Everything the univariate view shows for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnivariateReport {
    pub column: String,
    pub summary: Summary,
    pub histogram: Histogram,
    /// Density overlay scaled to histogram counts; absent for degenerate data.
    pub density: Option<Kde>,
    pub boxplot: BoxStats,
}

impl UnivariateReport {
    pub fn build(dataset: &Dataset, column: &str) -> Result<Self, AnalysisError> {
        let values = present_values(dataset, column)?;
        let infinite = values.iter().filter(|v| !v.is_finite()).count();
        if infinite > 0 {
            return Err(AnalysisError::NonFinite {
                column: column.to_string(),
                count: infinite,
            });
        }
        let summary = Summary::of_values(column, &values);
        let histogram = Histogram::auto(&values);
        let density = match Kde::estimate(&values, 0.0) {
            Ok(kde) => Some(kde.scaled(values.len() as f64 * histogram.bin_width)),
            Err(e) => {
                log::warn!("No density overlay for '{column}': {e}");
                None
            }
        };
        let boxplot = BoxStats::from_values(&values)?;

        Ok(UnivariateReport {
            column: column.to_string(),
            summary,
            histogram,
            density,
            boxplot,
        })
    }
}

/// Everything the multivariate view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultivariateReport {
    pub correlation: CorrelationMatrix,
    pub pair_grid: PairGrid,
    pub pca: PcaProjection,
}

impl MultivariateReport {
    pub fn build(dataset: &Dataset) -> Result<Self, AnalysisError> {
        Ok(MultivariateReport {
            correlation: CorrelationMatrix::of_dataset(dataset)?,
            pair_grid: PairGrid::of_dataset(dataset)?,
            pca: PcaProjection::of_dataset(dataset, N_COMPONENTS)?,
        })
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Report {
    Univariate(UnivariateReport),
    Multivariate(MultivariateReport),
}

impl Report {
    pub fn mode(&self) -> ViewMode {
        match self {
            Report::Univariate(_) => ViewMode::Univariate,
            Report::Multivariate(_) => ViewMode::Multivariate,
        }
    }
}

/// Column the univariate view starts on: the first numeric one.
pub fn default_column(dataset: &Dataset) -> Option<&str> {
    dataset.numeric_column_names().first().copied()
}

/// Run one full render pass for `mode`.
///
/// `column` is only read in univariate mode; `None` means the default column.
pub fn render(
    dataset: &Dataset,
    mode: ViewMode,
    column: Option<&str>,
) -> Result<Report, AnalysisError> {
    match mode {
        ViewMode::Univariate => {
            let column = column
                .or_else(|| default_column(dataset))
                .ok_or(AnalysisError::NoNumericColumns)?;
            UnivariateReport::build(dataset, column).map(Report::Univariate)
        }
        ViewMode::Multivariate => MultivariateReport::build(dataset).map(Report::Multivariate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(
            ViewMode::from_str("multivariate", true),
            Ok(ViewMode::Multivariate)
        );
        assert_eq!(ViewMode::from_str("Univariate", true), Ok(ViewMode::Univariate));
        assert!(ViewMode::from_str("bivariate", true).is_err());
    }

    #[test]
    fn univariate_outputs_share_one_column() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let Report::Univariate(r) = render(&ds, ViewMode::Univariate, Some("petal_length")).unwrap()
        else {
            panic!("expected univariate report");
        };
        assert_eq!(r.column, "petal_length");
        assert_eq!(r.summary.column, "petal_length");
        assert_eq!(r.histogram.total(), r.summary.count);
        assert_abs_diff_eq!(r.boxplot.median, r.summary.q50);
        assert!(r.density.is_some());
    }

    #[test]
    fn univariate_defaults_to_first_numeric_column() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let report = render(&ds, ViewMode::Univariate, None).unwrap();
        match report {
            Report::Univariate(r) => assert_eq!(r.column, "sepal_length"),
            other => panic!("unexpected {:?}", other.mode()),
        }
    }

    #[test]
    fn univariate_rejects_categorical_selection() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        assert_eq!(
            render(&ds, ViewMode::Univariate, Some("species")).unwrap_err(),
            AnalysisError::NotNumeric("species".into())
        );
    }

    #[test]
    fn constant_column_still_renders_without_density() {
        let ds = Dataset::new(
            "t",
            vec![Column::numeric("k", vec![Some(3.0), Some(3.0), Some(3.0)])],
        )
        .unwrap();
        let Report::Univariate(r) = render(&ds, ViewMode::Univariate, None).unwrap() else {
            panic!("expected univariate report");
        };
        assert!(r.density.is_none());
        assert_eq!(r.histogram.counts, vec![3]);
    }

    #[test]
    fn infinite_values_fail_only_the_univariate_pass() {
        let ds = Dataset::new(
            "t",
            vec![Column::numeric(
                "x",
                vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(f64::INFINITY)],
            )],
        )
        .unwrap();
        assert_eq!(
            render(&ds, ViewMode::Univariate, Some("x")).unwrap_err(),
            AnalysisError::NonFinite {
                column: "x".into(),
                count: 1
            }
        );
    }

    #[test]
    fn outlier_beside_tiny_spread_still_renders() {
        let mut cells: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64 * 1e-12)).collect();
        cells.push(Some(1e12));
        let ds = Dataset::new("t", vec![Column::numeric("x", cells)]).unwrap();
        let Report::Univariate(r) = render(&ds, ViewMode::Univariate, None).unwrap() else {
            panic!("expected univariate report");
        };
        assert!(r.histogram.counts.len() <= crate::analysis::density::MAX_BINS);
        assert_eq!(r.histogram.total(), 101);
        assert_eq!(r.boxplot.outliers, vec![1e12]);
    }

    #[test]
    fn no_numeric_columns_fails_both_modes() {
        let ds = Dataset::new("t", vec![Column::categorical("c", vec![Some("a".into())])])
            .unwrap();
        for mode in ViewMode::ALL {
            assert_eq!(
                render(&ds, mode, None).unwrap_err(),
                AnalysisError::NoNumericColumns
            );
        }
    }

    #[test]
    fn iris_multivariate_end_to_end() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let Report::Multivariate(r) = render(&ds, ViewMode::Multivariate, None).unwrap() else {
            panic!("expected multivariate report");
        };

        assert_eq!(r.correlation.size(), 4);
        for i in 0..4 {
            assert_abs_diff_eq!(r.correlation.get(i, i), 1.0, epsilon = 1e-12);
        }

        assert_eq!(r.pca.len(), 150);
        let labels = r.pca.labels.as_ref().unwrap();
        let groups: std::collections::BTreeSet<&str> =
            labels.iter().flatten().map(String::as_str).collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(r.pca.points().count(), 150);
    }

    #[test]
    fn report_serializes_with_mode_tag() {
        let ds = crate::data::loader::load_dataset("iris").unwrap();
        let report = render(&ds, ViewMode::Univariate, Some("sepal_width")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "univariate");
        assert_eq!(json["summary"]["count"], 150);
    }
}
