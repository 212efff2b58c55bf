/// Data layer: core types, parsing, and the memoized sample loader.
///
/// Architecture:
/// ```text
///   bundled iris.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Dataset (dtype inference per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  fetch once per process → Arc<Dataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  numeric + categorical columns, read-only
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod model;

pub use cache::{load_data, DatasetCache};
pub use error::DatasetError;
pub use model::{Column, ColumnData, Dataset};
