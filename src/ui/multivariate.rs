use std::collections::BTreeMap;

use eframe::egui::{self, Align2, FontId, RichText, Sense, Ui, Vec2};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use rusty_eda::analysis::pairplot::PairCell;
use rusty_eda::analysis::{CorrelationMatrix, MultivariateReport, PairGrid, PcaProjection};

use crate::color::{contrast_text, coolwarm, ColorMap};

const HEATMAP_CELL: f32 = 72.0;
const PAIR_CELL: f32 = 170.0;

// ---------------------------------------------------------------------------
// Multivariate view (central panel)
// ---------------------------------------------------------------------------

/// Correlation heatmap, scatter matrix, then the PCA projection.
pub fn show(ui: &mut Ui, report: &MultivariateReport) {
    let colors = ColorMap::new(&report.pair_grid.groups);

    ui.heading("Multivariate Analysis");
    ui.add_space(4.0);

    ui.strong("Correlation Matrix");
    heatmap(ui, &report.correlation);
    ui.separator();

    ui.strong("Scatter Matrix (Pairplot)");
    ui.label("This may take a few seconds...");
    pair_grid(ui, &report.pair_grid, &colors);
    ui.separator();

    ui.strong("Principal Component Analysis (PCA)");
    pca_scatter(ui, &report.pca, &report.pair_grid.groups, &colors);
}

// -- Heatmap --

fn heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    let cell = Vec2::splat(HEATMAP_CELL);
    egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for name in &corr.columns {
                ui.label(RichText::new(name).small());
            }
            ui.end_row();

            for i in 0..corr.size() {
                ui.label(RichText::new(&corr.columns[i]).small());
                for j in 0..corr.size() {
                    let r = corr.get(i, j);
                    let (rect, response) = ui.allocate_exact_size(cell, Sense::hover());
                    let painter = ui.painter();
                    painter.rect_filled(rect, 0.0, coolwarm(r));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        corr.label(i, j),
                        FontId::monospace(14.0),
                        contrast_text(r),
                    );
                    response.on_hover_text(format!(
                        "{} × {}: {r:.4}",
                        corr.columns[i], corr.columns[j]
                    ));
                }
                ui.end_row();
            }
        });

    // Colour bar
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("-1.0").small());
        for step in 0..=20 {
            let r = -1.0 + step as f64 * 0.1;
            let (rect, _) = ui.allocate_exact_size(Vec2::new(8.0, 12.0), Sense::hover());
            ui.painter().rect_filled(rect, 0.0, coolwarm(r));
        }
        ui.label(RichText::new("1.0").small());
    });
}

// -- Scatter matrix --

fn pair_grid(ui: &mut Ui, grid: &PairGrid, colors: &ColorMap) {
    egui::ScrollArea::horizontal()
        .id_salt("pair_grid_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("pair_grid")
                .spacing([4.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    for (i, row) in grid.cells.iter().enumerate() {
                        ui.label(RichText::new(&grid.columns[i]).small());
                        for (j, cell) in row.iter().enumerate() {
                            pair_panel(ui, (i, j), cell, &grid.groups, colors);
                        }
                        ui.end_row();
                    }

                    ui.label("");
                    for name in &grid.columns {
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.label(RichText::new(name).small());
                        });
                    }
                    ui.end_row();
                });
        });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("{}:", grid.hue)).small());
        for g in &grid.groups {
            ui.label(RichText::new(format!("● {g}")).color(colors.color_for(Some(g))));
        }
    });
}

fn pair_panel(
    ui: &mut Ui,
    (i, j): (usize, usize),
    cell: &PairCell,
    groups: &[String],
    colors: &ColorMap,
) {
    Plot::new(("pair", i, j))
        .width(PAIR_CELL)
        .height(PAIR_CELL)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| match cell {
            PairCell::Distribution { curves } => {
                for (group, curve) in groups.iter().zip(curves) {
                    if let Some(kde) = curve {
                        let points: PlotPoints = kde.points().into();
                        plot_ui.line(
                            Line::new(points)
                                .color(colors.color_for(Some(group)))
                                .width(1.5)
                                .name(group),
                        );
                    }
                }
            }
            PairCell::Scatter { series } => {
                for (group, pts) in groups.iter().zip(series) {
                    plot_ui.points(
                        Points::new(pts.clone())
                            .radius(1.5)
                            .color(colors.color_for(Some(group)))
                            .name(group),
                    );
                }
            }
        });
}

// -- PCA --

fn pca_scatter(ui: &mut Ui, pca: &PcaProjection, groups: &[String], colors: &ColorMap) {
    let mut by_group: BTreeMap<Option<&str>, Vec<[f64; 2]>> = BTreeMap::new();
    for (idx, point) in pca.points().enumerate() {
        let label = pca
            .labels
            .as_ref()
            .and_then(|l| l[idx].as_deref());
        by_group.entry(label).or_default().push(point);
    }

    let axis = |k: usize| {
        let ratio = pca.explained_variance_ratio.get(k).copied().unwrap_or(f64::NAN);
        format!("PC{} ({:.1}%)", k + 1, ratio * 100.0)
    };

    Plot::new("pca_scatter")
        .height(360.0)
        .legend(Legend::default())
        .x_axis_label(axis(0))
        .y_axis_label(axis(1))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Legend order follows the group order used everywhere else.
            let ordered = groups
                .iter()
                .map(|g| Some(g.as_str()))
                .chain(std::iter::once(None));
            for key in ordered {
                if let Some(pts) = by_group.get(&key) {
                    plot_ui.points(
                        Points::new(pts.clone())
                            .radius(3.0)
                            .color(colors.color_for(key))
                            .name(key.unwrap_or("unlabelled")),
                    );
                }
            }
        });

    ui.label(
        RichText::new(format!(
            "{} points projected from {} columns",
            pca.len(),
            pca.columns.len()
        ))
        .small(),
    );
}
