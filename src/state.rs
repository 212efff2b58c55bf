use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use rusty_eda::analysis::report::default_column;
use rusty_eda::analysis::{render, Report, ViewMode};
use rusty_eda::data::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The cached dataset, shared read-only with every pass.
    pub dataset: Arc<Dataset>,

    /// Which view the sidebar selected.
    pub mode: ViewMode,

    /// Column the univariate view shows. Survives mode switches.
    pub selected_column: Option<String>,

    /// Output of the latest render pass (None when it failed).
    pub output: Option<Report>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start in univariate mode on the first numeric column and render once.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selected_column = default_column(&dataset).map(str::to_string);
        let mut state = Self {
            dataset,
            mode: ViewMode::default(),
            selected_column,
            output: None,
            status_message: None,
        };
        state.rerender();
        state
    }

    /// Options for the column selector.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.dataset
            .numeric_column_names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Switch view; a changed selection triggers a fresh pass.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode == mode {
            return;
        }
        log::debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.rerender();
    }

    /// Choose the univariate column. Non-numeric names are ignored.
    pub fn select_column(&mut self, column: &str) {
        if self.selected_column.as_deref() == Some(column) {
            return;
        }
        if self.dataset.numeric(column).is_none() {
            log::warn!("Ignoring selection of non-numeric column '{column}'");
            return;
        }
        log::debug!("Column -> {column}");
        self.selected_column = Some(column.to_string());
        self.rerender();
    }

    /// Recompute every derived artifact for the current selection.
    ///
    /// The previous output is replaced in one assignment, so a frame never
    /// shows a mix of old and new artifacts.
    pub fn rerender(&mut self) {
        match render(&self.dataset, self.mode, self.selected_column.as_deref()) {
            Ok(report) => {
                log::info!("Rendered {} view", report.mode());
                self.output = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Render pass failed: {e}");
                self.output = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the current output bundle as pretty JSON.
    pub fn export_report(&self, path: &Path) -> Result<()> {
        let report = self
            .output
            .as_ref()
            .context("nothing rendered to export")?;
        let json = serde_json::to_string_pretty(report).context("serializing report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} report to {}", report.mode(), path.display());
        Ok(())
    }
}
