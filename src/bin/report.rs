//! Headless render pass: prints the report bundle as JSON.
//!
//! ```text
//! eda-report                          # multivariate
//! eda-report univariate [column]      # default column when omitted
//! eda-report multivariate
//! ```

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use rusty_eda::analysis::{render, ViewMode};
use rusty_eda::data::load_data;

/// Render one view of the bundled sample without opening a window.
#[derive(Parser, Debug)]
#[command(name = "eda-report", version, about)]
struct Args {
    /// View to render
    #[arg(value_enum, ignore_case = true, default_value_t = ViewMode::Multivariate)]
    mode: ViewMode,

    /// Numeric column for the univariate view (first numeric column when omitted)
    column: Option<String>,
}

impl Args {
    fn parse_checked<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let args = Self::try_parse_from(args)?;
        if args.mode == ViewMode::Multivariate && args.column.is_some() {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "a column can only be given with the univariate view",
            ));
        }
        Ok(args)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse_checked(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let dataset = load_data().context("loading sample dataset")?;
    let report = render(&dataset, args.mode, args.column.as_deref())
        .with_context(|| format!("rendering {} view", args.mode))?;

    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}
