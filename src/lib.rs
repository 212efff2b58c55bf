//! Exploratory data analysis over a bundled sample table.
//!
//! The library half is UI-free: [`data`] owns loading and caching of the
//! dataset, [`analysis`] turns a dataset plus a view selection into a
//! serializable report bundle. The `rusty-eda` binary draws those bundles with
//! egui, `eda-report` prints them as JSON.

pub mod analysis;
pub mod data;
