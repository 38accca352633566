//! Dataset preparation
//!
//! Converts typed input rows into training-ready parallel arrays:
//!
//! - [`row`]: ingestion schema ([`SampleRow`]) and [`validate_format`]
//! - [`preparer`]: [`DatasetPreparer`] (row parsing, feature filling, assembly)
//! - [`scaling`]: [`FeatureScaler`] (z-score / min-max, reusable on test data)
//! - [`sampling`]: [`balance_classes`] and [`split_holdout`]
//!
//! Structural problems (missing columns, malformed input) abort a pass.
//! Per-row problems drop the row and are counted in [`SkipSummary`].

pub mod preparer;
pub mod row;
pub mod sampling;
pub mod scaling;

pub use preparer::{
    fill_missing_features, DatasetPreparer, HoldoutDataset, ModelInfo, PreparedDataset,
    SkipReason, SkipSummary,
};
pub use row::{validate_format, FormatReport, SampleRow};
pub use sampling::{balance_by, balance_classes, split_holdout, HoldoutSplit};
pub use scaling::{normalize, FeatureScaler};
