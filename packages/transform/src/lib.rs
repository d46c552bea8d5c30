#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV venue row normalization, coercion, and per-city grouping.
//!
//! Reads club/venue rows from CSV, normalizes each row's city into a file
//! safe key, coerces the numeric columns, optionally builds hosted image
//! URLs, and groups the resulting [`Venue`](club_map_venue_models::Venue)
//! records by city with last-write-wins deduplication on venue name.

pub mod config;
pub mod media;
pub mod normalize;
pub mod parsing;
pub mod row;
pub mod transformer;

pub use config::{MediaConfig, RunConfig, TransformOptions};
pub use normalize::normalize_key;
pub use row::{Row, RowReader};
pub use transformer::{
    CityGroup, CityGroups, Diagnostic, TransformOutput, TransformReport, Transformer,
    transform_file, transform_reader, transform_rows,
};

/// Errors that end a transformation run.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// CSV could not be read or parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File could not be opened or read.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration values are inconsistent or invalid.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },

    /// Config file is not valid TOML or has unknown keys.
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
