use serde::Serialize;

use super::density::Kde;
use super::{numeric_cells, AnalysisError};
use crate::data::Dataset;

/// Diagonal curves extend this many bandwidths past the data.
const DIAGONAL_CUT: f64 = 3.0;

/// One panel of the scatter matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairCell {
    /// `column` against itself: one density curve per group.
    Distribution { curves: Vec<Option<Kde>> },
    /// `x` against `y`: one point series per group.
    Scatter { series: Vec<Vec<[f64; 2]>> },
}

/// Grid of pairwise panels over all numeric columns, coloured by `hue`.
///
/// `cells[row][col]` plots column `col` on x against column `row` on y.
/// Per-group vectors are indexed like `groups`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairGrid {
    pub columns: Vec<String>,
    pub hue: String,
    pub groups: Vec<String>,
    pub cells: Vec<Vec<PairCell>>,
}

impl PairGrid {
    pub fn of_dataset(dataset: &Dataset) -> Result<Self, AnalysisError> {
        let names = dataset.numeric_column_names();
        if names.is_empty() {
            return Err(AnalysisError::NoNumericColumns);
        }
        let hue = dataset.label_column().ok_or(AnalysisError::NoLabelColumn)?;
        let labels = dataset
            .categorical(hue)
            .ok_or_else(|| AnalysisError::UnknownColumn(hue.to_string()))?;
        let groups: Vec<String> = dataset
            .categories
            .get(hue)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();

        // Group index of every record; unlabelled records are left out.
        let membership: Vec<Option<usize>> = labels
            .iter()
            .map(|l| l.as_ref().and_then(|l| groups.iter().position(|g| g == l)))
            .collect();
        let labelled = membership.iter().flatten().count();

        let cells_by_col = names
            .iter()
            .map(|n| numeric_cells(dataset, n))
            .collect::<Result<Vec<_>, _>>()?;

        let mut cells = Vec::with_capacity(names.len());
        for (i, y_col) in cells_by_col.iter().enumerate() {
            let mut row = Vec::with_capacity(names.len());
            for (j, x_col) in cells_by_col.iter().enumerate() {
                if i == j {
                    row.push(distribution(x_col, &membership, groups.len(), labelled));
                } else {
                    row.push(scatter(x_col, y_col, &membership, groups.len()));
                }
            }
            cells.push(row);
        }

        log::debug!(
            "Pair grid: {0}x{0} panels, {1} groups",
            names.len(),
            groups.len()
        );

        Ok(PairGrid {
            columns: names.into_iter().map(String::from).collect(),
            hue: hue.to_string(),
            groups,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

fn scatter(
    x: &[Option<f64>],
    y: &[Option<f64>],
    membership: &[Option<usize>],
    n_groups: usize,
) -> PairCell {
    let mut series = vec![Vec::new(); n_groups];
    for ((xv, yv), group) in x.iter().zip(y).zip(membership) {
        if let (Some(xv), Some(yv), Some(g)) = (xv, yv, group) {
            series[*g].push([*xv, *yv]);
        }
    }
    PairCell::Scatter { series }
}

/// Per-group densities, each weighted by its share of labelled records so the
/// curves sum to one overall density.
fn distribution(
    values: &[Option<f64>],
    membership: &[Option<usize>],
    n_groups: usize,
    labelled: usize,
) -> PairCell {
    let mut by_group = vec![Vec::new(); n_groups];
    for (v, group) in values.iter().zip(membership) {
        if let (Some(v), Some(g)) = (v, group) {
            by_group[*g].push(*v);
        }
    }
    let curves = by_group
        .iter()
        .map(|vals| {
            let share = vals.len() as f64 / labelled.max(1) as f64;
            Kde::estimate(vals, DIAGONAL_CUT)
                .map(|k| k.scaled(share))
                .map_err(|e| log::debug!("Skipping diagonal density: {e}"))
                .ok()
        })
        .collect();
    PairCell::Distribution { curves }
}
