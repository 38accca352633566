//! Error types for dnaclass

use thiserror::Error;

/// Result type alias for dnaclass operations
pub type Result<T> = std::result::Result<T, DnaclassError>;

/// Error types that can occur in dnaclass
///
/// Per-row problems during dataset preparation are *not* errors: they are
/// reported as [`SkipReason`](crate::dataset::SkipReason) and counted in
/// [`SkipSummary`](crate::dataset::SkipSummary). Everything here aborts the
/// operation that raised it.
#[derive(Debug, Error)]
pub enum DnaclassError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input (unparsable row, mismatched column count)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Sequence failed strict validation
    #[error("Invalid sequence ({valid_bases} valid of {raw_length} characters): {reason}")]
    InvalidSequence {
        /// Number of A/T/C/G bases left after cleaning
        valid_bases: usize,
        /// Character count of the raw input
        raw_length: usize,
        /// Which check failed
        reason: String,
    },

    /// Required columns are missing from the whole dataset
    #[error("Format validation failed: {0}")]
    FormatValidation(String),

    /// Feature vectors of different lengths in one set
    #[error("Feature vector {row} has {actual} values, expected {expected}")]
    FeatureDimension {
        /// Index of the offending vector
        row: usize,
        /// Length fixed by the first vector (or the fitted scaler)
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Probability vector does not match the label scheme
    #[error("Prediction has {actual} probabilities, label scheme has {expected} classes")]
    PredictionShape {
        /// Number of classes in the scheme (or number of samples)
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
