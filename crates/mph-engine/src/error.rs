//! Catalogue construction errors.

use thiserror::Error;

/// Errors that can occur while building the rule-group catalogue.
///
/// These are startup failures only. A determination itself never fails;
/// every input condition surfaces as a verdict in the output.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A range specification could not be parsed.
    #[error("Invalid range specification: {spec} ({detail})")]
    InvalidRangeSpec {
        /// The offending specification string.
        spec: String,
        /// What was wrong with it.
        detail: String,
    },

    /// A bundled lookup table failed to parse.
    #[error("Invalid lookup table {table}: {source}")]
    InvalidTable {
        /// Name of the table file.
        table: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A lookup-table row carried an unusable value.
    #[error("Invalid value in lookup table {table}: {value}")]
    InvalidTableValue {
        /// Name of the table file.
        table: String,
        /// The offending value.
        value: String,
    },
}
