//! dnaclass: DNA sequence preprocessing for sequence classifiers
//!
//! # Overview
//!
//! dnaclass turns tables of labelled DNA sequences into training-ready
//! arrays: cleaned and integer-encoded sequences, scaled numeric feature
//! vectors and class indices. After a model has run, its per-class
//! probabilities are attached back to the originating samples.
//!
//! ## Key Features
//!
//! - **Cleaning**: strict validation with [`operations::clean`], lenient
//!   filtering with [`operations::strip_invalid`]
//! - **Features**: 8 composition features plus 19 enhanced features
//!   (entropy, repeat score, dinucleotide frequencies)
//! - **Labels**: two fixed schemes with synonym matching and keyword inference
//! - **Preparation**: missing-feature filling, class balancing, z-score or
//!   min-max scaling, holdout splits with train-fitted scaling
//!
//! ## Quick Start
//!
//! ```
//! use dnaclass::io::SampleTableReader;
//! use dnaclass::{DatasetPreparer, LabelScheme, PreparerConfig};
//!
//! # fn main() -> dnaclass::Result<()> {
//! let table = "Sample_ID,Sequence,Disease_Risk\n\
//!              s1,ATCGATCGTAGCTAGCTAGC,high\n\
//!              s2,GGGCCCATATATGCGCATAT,low\n";
//! let rows = SampleTableReader::new(table.as_bytes()).read_all()?;
//!
//! let config = PreparerConfig::new(LabelScheme::DiseaseRisk)
//!     .with_max_length(32)
//!     .with_clean_policy(dnaclass::config::CleanPolicy {
//!         min_valid_bases: 10,
//!         min_valid_ratio: 0.8,
//!     });
//! let dataset = DatasetPreparer::new(config).prepare(&rows)?;
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.encoded[0].len(), 32);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`operations`]: cleaning, encoding and feature extraction
//! - [`labels`]: label schemes and label normalization
//! - [`dataset`]: row schema, preparation, scaling and sampling
//! - [`io`]: CSV/TSV ingestion and prediction reports
//! - [`config`]: preparation settings (builder or TOML)
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (skipped rows, balancing, scaling)
//! and never installs a subscriber; that is left to the application.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod labels;
pub mod operations;
pub mod types;

// Re-export commonly used types
pub use config::PreparerConfig;
pub use dataset::{DatasetPreparer, PreparedDataset, SampleRow};
pub use error::{DnaclassError, Result};
pub use labels::{Label, LabelScheme};
pub use types::{DerivedFeatures, FeatureColumns, Prediction, Sample};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
