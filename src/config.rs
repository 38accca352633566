//! Pipeline configuration
//!
//! [`PreparerConfig`] gathers every knob of a preparation pass. It can be
//! built in code (`Default` plus `with_*` methods) or loaded from TOML:
//!
//! ```
//! use dnaclass::config::{Normalization, PreparerConfig};
//! use dnaclass::labels::LabelScheme;
//!
//! let config = PreparerConfig::from_toml_str(r#"
//!     scheme = "biological_source"
//!     max_length = 500
//!     normalization = "min_max"
//!     balance = true
//!     seed = 42
//!
//!     [clean]
//!     min_valid_bases = 20
//! "#)?;
//!
//! assert_eq!(config.scheme, LabelScheme::BiologicalSource);
//! assert_eq!(config.normalization, Normalization::MinMax);
//! assert_eq!(config.clean.min_valid_bases, 20);
//! assert_eq!(config.clean.min_valid_ratio, 0.8); // default kept
//! # Ok::<(), dnaclass::DnaclassError>(())
//! ```

use crate::error::{DnaclassError, Result};
use crate::labels::LabelScheme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default encoded sequence length
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Thresholds for strict sequence cleaning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanPolicy {
    /// Minimum number of A/T/C/G bases left after cleaning
    pub min_valid_bases: usize,
    /// Minimum ratio of valid bases to raw characters
    pub min_valid_ratio: f64,
}

impl Default for CleanPolicy {
    fn default() -> Self {
        Self {
            min_valid_bases: 50,
            min_valid_ratio: 0.8,
        }
    }
}

/// Column-wise feature scaling method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// `(x - mean) / std`, population std, zero std replaced by 1
    #[default]
    ZScore,
    /// `(x - min) / (max - min)`, zero range replaced by 1
    MinMax,
}

/// Configuration of a dataset preparation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreparerConfig {
    /// Label set the dataset is classified with
    pub scheme: LabelScheme,
    /// Length of integer / one-hot sequence encodings
    pub max_length: usize,
    /// Strict cleaning thresholds used during ingestion
    pub clean: CleanPolicy,
    /// Feature scaling method
    pub normalization: Normalization,
    /// Downsample every class to the smallest class count
    pub balance: bool,
    /// Append entropy, repeat score and dinucleotide frequencies to vectors
    pub include_enhanced: bool,
    /// Train fraction for holdout splits
    pub train_ratio: f64,
    /// RNG seed for balancing and splitting (entropy-seeded when unset)
    pub seed: Option<u64>,
}

impl Default for PreparerConfig {
    fn default() -> Self {
        Self {
            scheme: LabelScheme::default(),
            max_length: DEFAULT_MAX_LENGTH,
            clean: CleanPolicy::default(),
            normalization: Normalization::default(),
            balance: false,
            include_enhanced: false,
            train_ratio: 0.8,
            seed: None,
        }
    }
}

impl PreparerConfig {
    /// Default configuration for a label scheme
    pub fn new(scheme: LabelScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PreparerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the encoded sequence length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set the strict cleaning thresholds
    pub fn with_clean_policy(mut self, clean: CleanPolicy) -> Self {
        self.clean = clean;
        self
    }

    /// Set the feature scaling method
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enable or disable class balancing
    pub fn with_balance(mut self, balance: bool) -> Self {
        self.balance = balance;
        self
    }

    /// Enable or disable the enhanced feature block
    pub fn with_enhanced_features(mut self, include: bool) -> Self {
        self.include_enhanced = include;
        self
    }

    /// Set the holdout train fraction
    pub fn with_train_ratio(mut self, train_ratio: f64) -> Self {
        self.train_ratio = train_ratio;
        self
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::InvalidConfig`] when `max_length` is zero or
    /// a ratio lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(DnaclassError::InvalidConfig(
                "max_length must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.clean.min_valid_ratio) {
            return Err(DnaclassError::InvalidConfig(format!(
                "clean.min_valid_ratio must be within [0, 1], got {}",
                self.clean.min_valid_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(DnaclassError::InvalidConfig(format!(
                "train_ratio must be within [0, 1], got {}",
                self.train_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PreparerConfig::default();
        assert_eq!(config.scheme, LabelScheme::DiseaseRisk);
        assert_eq!(config.max_length, 1000);
        assert_eq!(config.clean.min_valid_bases, 50);
        assert_eq!(config.clean.min_valid_ratio, 0.8);
        assert_eq!(config.normalization, Normalization::ZScore);
        assert!(!config.balance);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PreparerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PreparerConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = PreparerConfig::new(LabelScheme::BiologicalSource)
            .with_max_length(200)
            .with_balance(true)
            .with_seed(7);
        assert_eq!(config.scheme, LabelScheme::BiologicalSource);
        assert_eq!(config.max_length, 200);
        assert!(config.balance);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_zero_length() {
        let result = PreparerConfig::from_toml_str("max_length = 0");
        assert!(matches!(result, Err(DnaclassError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let result = PreparerConfig::from_toml_str("train_ratio = 1.5");
        assert!(matches!(result, Err(DnaclassError::InvalidConfig(_))));

        let result = PreparerConfig::from_toml_str("[clean]\nmin_valid_ratio = -0.1");
        assert!(matches!(result, Err(DnaclassError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let result = PreparerConfig::from_toml_str("scheme = \"fungal\"");
        assert!(matches!(result, Err(DnaclassError::Toml(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.toml");
        std::fs::write(&path, "include_enhanced = true\nseed = 3\n").unwrap();

        let config = PreparerConfig::from_path(&path).unwrap();
        assert!(config.include_enhanced);
        assert_eq!(config.seed, Some(3));
    }
}
