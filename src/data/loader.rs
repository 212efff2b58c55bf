use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::DatasetError;
use super::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// Sample registry
// ---------------------------------------------------------------------------

/// Named sample datasets shipped inside the binary.
pub const SAMPLE_DATASETS: &[(&str, &str)] = &[("iris", include_str!("../../data/iris.csv"))];

/// Tokens read as a missing cell (pandas' default set).
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NAN", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Fetch a named sample dataset from the bundled registry.
pub fn load_dataset(name: &str) -> Result<Dataset> {
    let (_, text) = SAMPLE_DATASETS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| DatasetError::UnknownDataset {
            name: name.to_string(),
            available: SAMPLE_DATASETS.iter().map(|(n, _)| n.to_string()).collect(),
        })?;

    parse_csv(name, text.as_bytes()).with_context(|| format!("parsing sample dataset '{name}'"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk, named after the file stem.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    parse_csv(&name, file)
}

/// CSV layout: header row with column names, one record per line.
///
/// A column is numeric when every non-missing cell parses as a float and at
/// least one cell is present. Everything else is categorical. A cell that
/// parses as NaN is missing.
pub fn parse_csv<R: Read>(name: &str, reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(DatasetError::MissingHeader.into());
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            return Err(DatasetError::RaggedRow {
                row: row_no,
                expected: headers.len(),
                got: record.len(),
            }
            .into());
        }
        for (col_idx, value) in record.iter().enumerate() {
            let value = value.trim();
            let cell = if NA_TOKENS.contains(&value) {
                None
            } else {
                Some(value.to_string())
            };
            cells[col_idx].push(cell);
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(header, values)| infer_column(header, values))
        .collect();

    let dataset = Dataset::new(name, columns)?;
    log::debug!(
        "Parsed '{}': {} rows, numeric columns {:?}",
        dataset.name,
        dataset.len(),
        dataset.numeric_column_names()
    );
    Ok(dataset)
}

fn infer_column(name: String, values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|cell| match cell {
            Some(s) => s.parse::<f64>().ok().map(|v| (!v.is_nan()).then_some(v)),
            None => Some(None),
        })
        .collect();

    match parsed {
        Some(numbers) if numbers.iter().any(Option::is_some) => Column::numeric(name, numbers),
        _ => Column::categorical(name, values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnData;

    #[test]
    fn infers_numeric_and_categorical_columns() {
        let text = "x,y,label\n1,2.5,a\n2,NA,b\n3,4,a\n";
        let ds = parse_csv("t", text.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.numeric_column_names(), vec!["x", "y"]);
        assert_eq!(ds.numeric("y").unwrap(), &[Some(2.5), None, Some(4.0)]);
        assert_eq!(ds.label_column(), Some("label"));
    }

    #[test]
    fn mixed_column_falls_back_to_categorical() {
        let text = "code\n1\nA7\n";
        let ds = parse_csv("t", text.as_bytes()).unwrap();
        assert!(matches!(
            ds.column("code").unwrap().data,
            ColumnData::Categorical(_)
        ));
    }

    #[test]
    fn all_missing_column_is_not_numeric() {
        let text = "a,b\n1,\n2,NaN\n";
        let ds = parse_csv("t", text.as_bytes()).unwrap();
        assert_eq!(ds.numeric_column_names(), vec!["a"]);
    }

    #[test]
    fn nan_spellings_are_missing_not_values() {
        let ds = parse_csv("t", "x\n1\n-nan\n3\nNAN\n".as_bytes()).unwrap();
        assert_eq!(ds.numeric("x").unwrap(), &[Some(1.0), None, Some(3.0), None]);

        // Spellings outside the token list still parse as NaN.
        let ds = parse_csv("t", "x\n1\n+nan\n3\nnAn\n".as_bytes()).unwrap();
        let summary = crate::analysis::Summary::of_column(&ds, "x").unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.max, 3.0);
    }

    #[test]
    fn pandas_na_tokens_keep_columns_numeric() {
        let text = "a,b,c,d,e\n1,2,3,4,5\nn/a,#N/A,<NA>,-NaN,-1.#IND\n";
        let ds = parse_csv("t", text.as_bytes()).unwrap();
        assert_eq!(ds.numeric_column_names(), vec!["a", "b", "c", "d", "e"]);
        for name in ["a", "b", "c", "d", "e"] {
            assert_eq!(ds.numeric(name).unwrap()[1], None);
        }
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let text = "a,b\n1,2\n3\n";
        assert!(parse_csv("t", text.as_bytes()).is_err());
    }

    #[test]
    fn file_loader_names_dataset_after_stem() {
        let path = std::env::temp_dir().join(format!("eda-load-{}.csv", std::process::id()));
        std::fs::write(&path, "v,g\n1.5,a\n2.5,b\n").unwrap();
        let ds = load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(ds.name, format!("eda-load-{}", std::process::id()));
        assert_eq!(ds.numeric("v").unwrap(), &[Some(1.5), Some(2.5)]);
    }

    #[test]
    fn bundled_iris_has_expected_shape() {
        let ds = load_dataset("iris").unwrap();
        assert_eq!(ds.len(), 150);
        assert_eq!(
            ds.numeric_column_names(),
            vec!["sepal_length", "sepal_width", "petal_length", "petal_width"]
        );
        assert_eq!(ds.label_column(), Some("species"));
        let species: Vec<&str> = ds.categories["species"].iter().map(String::as_str).collect();
        assert_eq!(species, vec!["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn unknown_sample_lists_available_names() {
        let err = load_dataset("titanic").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("titanic"));
        assert!(msg.contains("iris"));
    }
}
