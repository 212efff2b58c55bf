use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use rusty_eda::analysis::boxplot::TUKEY_FENCE;
use rusty_eda::analysis::{BoxStats, Histogram, Kde, Summary, UnivariateReport};

const PLOT_HEIGHT: f32 = 280.0;
const BAR_COLOR: Color32 = Color32::from_rgb(76, 114, 176);
const KDE_COLOR: Color32 = Color32::from_rgb(221, 132, 82);

// ---------------------------------------------------------------------------
// Univariate view (central panel)
// ---------------------------------------------------------------------------

/// Statistics block, histogram with density, then boxplot.
pub fn show(ui: &mut Ui, report: &UnivariateReport) {
    ui.heading("Univariate Analysis");
    ui.add_space(4.0);

    ui.label(RichText::new(format!("Descriptive Statistics for {}", report.column)).strong());
    summary_table(ui, &report.summary);
    ui.separator();

    ui.strong("Histogram");
    histogram(ui, &report.column, &report.histogram, report.density.as_ref());
    ui.separator();

    ui.strong("Boxplot");
    boxplot(ui, &report.column, &report.boxplot);
}

fn summary_table(ui: &mut Ui, summary: &Summary) {
    TableBuilder::new(ui)
        .id_salt("describe")
        .striped(true)
        .vscroll(false)
        .column(TableColumn::exact(80.0))
        .column(TableColumn::exact(120.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("statistic");
            });
            header.col(|ui| {
                ui.strong(&summary.column);
            });
        })
        .body(|mut body| {
            for (label, value) in summary.rows() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(label);
                    });
                    row.col(|ui| {
                        ui.monospace(format_stat(label, value));
                    });
                });
            }
        });
}

fn format_stat(label: &str, value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if label == "count" {
        format!("{value:.0}")
    } else {
        format!("{value:.6}")
    }
}

fn histogram(ui: &mut Ui, column: &str, hist: &Histogram, density: Option<&Kde>) {
    let bars: Vec<Bar> = hist
        .bars()
        .map(|(center, count)| Bar::new(center, count as f64).width(hist.bin_width))
        .collect();

    Plot::new(("histogram", column))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(column)
        .y_axis_label("Count")
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("count"));
            if let Some(kde) = density {
                let points: PlotPoints = kde.points().into();
                plot_ui.line(Line::new(points).color(KDE_COLOR).width(2.0).name("density"));
            }
        });

    ui.label(
        RichText::new(format!(
            "{} values in {} bins of width {:.4}",
            hist.total(),
            hist.counts.len(),
            hist.bin_width
        ))
        .small(),
    );
}

fn boxplot(ui: &mut Ui, column: &str, stats: &BoxStats) {
    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(
            stats.lower_whisker,
            stats.q1,
            stats.median,
            stats.q3,
            stats.upper_whisker,
        ),
    )
    .name(format!("{column} (IQR {:.4})", stats.iqr()))
    .box_width(0.5)
    .whisker_width(0.25)
    .fill(BAR_COLOR.gamma_multiply(0.5))
    .stroke(Stroke::new(1.5, BAR_COLOR));

    let outliers: PlotPoints = stats.outliers.iter().map(|&v| [v, 0.0]).collect();

    Plot::new(("boxplot", column))
        .height(PLOT_HEIGHT * 0.6)
        .x_axis_label(column)
        .show_axes([true, false])
        .show_y(false)
        .allow_scroll(false)
        .include_y(-0.6)
        .include_y(0.6)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal());
            plot_ui.points(
                Points::new(outliers)
                    .radius(3.0)
                    .color(Color32::DARK_GRAY)
                    .name("outliers"),
            );
        });

    ui.label(
        RichText::new(format!(
            "IQR {:.4}, {} outliers beyond {TUKEY_FENCE} × IQR",
            stats.iqr(),
            stats.outliers.len()
        ))
        .small(),
    );
}
