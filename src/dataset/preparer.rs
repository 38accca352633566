//! End-to-end dataset preparation
//!
//! [`DatasetPreparer`] turns typed rows into a [`PreparedDataset`]:
//!
//! 1. Pre-flight [`validate_format`] (structural failure aborts)
//! 2. [`DatasetPreparer::parse_row`] per row (failures are skipped and counted)
//! 3. [`fill_missing_features`] per sample
//! 4. Optional [`balance_classes`]
//! 5. Encoding, feature vectors and a [`FeatureScaler`] fitted on the pass
//!
//! Samples keep their interpretable values; only the parallel `features`
//! array is normalized.
//!
//! # Examples
//!
//! ```
//! use dnaclass::config::{CleanPolicy, PreparerConfig};
//! use dnaclass::dataset::{DatasetPreparer, SampleRow};
//! use dnaclass::labels::LabelScheme;
//!
//! let scheme = LabelScheme::DiseaseRisk;
//! let config = PreparerConfig::new(scheme)
//!     .with_max_length(16)
//!     .with_clean_policy(CleanPolicy { min_valid_bases: 8, min_valid_ratio: 0.8 })
//!     .with_seed(1);
//!
//! let rows = vec![
//!     SampleRow::labeled("ATCGATCGATCG", "high", scheme),
//!     SampleRow::labeled("GGGGCCCCAAAA", "moderate risk", scheme),
//!     SampleRow::labeled("AT", "low", scheme), // too short: skipped
//! ];
//!
//! let dataset = DatasetPreparer::new(config).prepare(&rows)?;
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.labels, vec![0, 1]);
//! assert_eq!(dataset.encoded[0].len(), 16);
//! assert_eq!(dataset.skipped.invalid_sequence, 1);
//! # Ok::<(), dnaclass::DnaclassError>(())
//! ```

use crate::config::PreparerConfig;
use crate::dataset::row::{validate_format, SampleRow};
use crate::dataset::sampling::{balance_classes, split_holdout, HoldoutSplit};
use crate::dataset::scaling::FeatureScaler;
use crate::error::{DnaclassError, Result};
use crate::labels::{Label, LabelScheme};
use crate::operations::features::{
    enhanced_feature_names, enhanced_from_cleaned, extract_numeric_features,
    NUMERIC_FEATURE_NAMES,
};
use crate::operations::sequence::{clean, encode, one_hot_encode};
use crate::types::{DerivedFeatures, Prediction, Sample};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Why a row was left out of the prepared dataset
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No sequence value
    MissingSequence,
    /// Sequence failed strict cleaning
    InvalidSequence {
        /// Bases left after cleaning
        valid_bases: usize,
        /// Raw character count
        raw_length: usize,
    },
    /// Neither the direct nor the fallback column resolved to a label
    UnresolvedLabel,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSequence => write!(f, "missing sequence"),
            SkipReason::InvalidSequence {
                valid_bases,
                raw_length,
            } => write!(
                f,
                "invalid sequence ({valid_bases} valid of {raw_length} characters)"
            ),
            SkipReason::UnresolvedLabel => write!(f, "unresolved label"),
        }
    }
}

/// Counts of skipped rows by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipSummary {
    /// Rows without a sequence
    pub missing_sequence: usize,
    /// Rows whose sequence failed strict cleaning
    pub invalid_sequence: usize,
    /// Rows without a resolvable label
    pub unresolved_label: usize,
}

impl SkipSummary {
    /// Count one skipped row
    pub fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::MissingSequence => self.missing_sequence += 1,
            SkipReason::InvalidSequence { .. } => self.invalid_sequence += 1,
            SkipReason::UnresolvedLabel => self.unresolved_label += 1,
        }
    }

    /// Total skipped rows
    pub fn total(&self) -> usize {
        self.missing_sequence + self.invalid_sequence + self.unresolved_label
    }
}

/// Compute every absent numeric column and the enhanced feature set
///
/// Supplied columns are never overwritten: `raw_features` is left as is and
/// the computed values go to `derived_features`, together with the names of
/// the columns that were missing.
pub fn fill_missing_features(sample: &mut Sample) {
    let numeric = extract_numeric_features(&sample.sequence);
    let mut columns = sample.raw_features;
    let filled_columns = columns.fill_from(&numeric);

    sample.derived_features = Some(DerivedFeatures {
        numeric,
        filled_columns,
        enhanced: enhanced_from_cleaned(sample.sequence.as_bytes()),
    });
}

/// Training-ready parallel arrays
///
/// `samples[i]`, `encoded[i]`, `features[i]`, `labels[i]` and `index[i]`
/// all describe the same record.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Label scheme of the pass
    pub scheme: LabelScheme,
    /// Length of every encoded sequence
    pub max_length: usize,
    /// Prepared samples with their original, unnormalized values
    pub samples: Vec<Sample>,
    /// Integer-encoded sequences (`max_length` codes each)
    pub encoded: Vec<Vec<u8>>,
    /// Normalized feature vectors
    pub features: Vec<Vec<f64>>,
    /// Names of the feature vector columns
    pub feature_names: Vec<String>,
    /// Integer label per sample
    pub labels: Vec<usize>,
    /// Input row index of each output position
    pub index: Vec<usize>,
    /// Statistics used to normalize `features`
    pub scaler: FeatureScaler,
    /// Rows left out, by reason
    pub skipped: SkipSummary,
}

impl PreparedDataset {
    /// Number of prepared samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` if no sample survived preparation
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One-hot encodings (`max_length` rows of 4 each)
    pub fn one_hot(&self) -> Vec<Vec<[u8; 4]>> {
        self.samples
            .iter()
            .map(|s| one_hot_encode(&s.sequence, self.max_length))
            .collect()
    }

    /// Sample prepared from input row `row_index`, if it survived
    pub fn sample_for_row(&self, row_index: usize) -> Option<&Sample> {
        self.index
            .iter()
            .position(|&row| row == row_index)
            .map(|i| &self.samples[i])
    }

    /// Write model output back onto the samples
    ///
    /// `probabilities[i]` belongs to output position `i`.
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::PredictionShape`] if the number of vectors
    /// differs from the number of samples, or a vector does not match the
    /// label scheme. No sample is modified on error.
    pub fn apply_predictions(&mut self, probabilities: &[Vec<f64>]) -> Result<()> {
        if probabilities.len() != self.samples.len() {
            return Err(DnaclassError::PredictionShape {
                expected: self.samples.len(),
                actual: probabilities.len(),
            });
        }

        let predictions = probabilities
            .iter()
            .map(|p| Prediction::from_probabilities(self.scheme, p.clone()))
            .collect::<Result<Vec<_>>>()?;

        for (sample, prediction) in self.samples.iter_mut().zip(predictions) {
            sample.prediction = Some(prediction);
        }
        Ok(())
    }

    /// Fraction of predicted samples whose prediction matches the label
    pub fn accuracy(&self) -> Option<f64> {
        let outcomes: Vec<bool> = self
            .samples
            .iter()
            .filter_map(Sample::is_correctly_predicted)
            .collect();
        if outcomes.is_empty() {
            return None;
        }
        let correct = outcomes.iter().filter(|&&ok| ok).count();
        Some(correct as f64 / outcomes.len() as f64)
    }

    /// Metadata an external model needs to interpret its inputs
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            scheme: self.scheme,
            class_names: self
                .scheme
                .class_names()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            sequence_length: self.max_length,
            feature_names: self.feature_names.clone(),
            scaler: self.scaler.clone(),
        }
    }
}

/// Train and test datasets sharing one scaler fitted on train
#[derive(Debug, Clone)]
pub struct HoldoutDataset {
    /// Training part; its scaler was fitted here
    pub train: PreparedDataset,
    /// Test part, normalized with the training scaler
    pub test: PreparedDataset,
}

/// Model-facing metadata, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Label scheme
    pub scheme: LabelScheme,
    /// Class names in label-index order
    pub class_names: Vec<String>,
    /// Encoded sequence length
    pub sequence_length: usize,
    /// Feature vector column names
    pub feature_names: Vec<String>,
    /// Fitted normalization statistics
    pub scaler: FeatureScaler,
}

impl ModelInfo {
    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write JSON to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read JSON from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Prepares datasets according to a [`PreparerConfig`]
#[derive(Debug, Clone, Default)]
pub struct DatasetPreparer {
    config: PreparerConfig,
}

impl DatasetPreparer {
    /// Create a preparer
    pub fn new(config: PreparerConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &PreparerConfig {
        &self.config
    }

    /// Resolve one row into a [`Sample`]
    ///
    /// The id comes from `Sample_ID`, else `sample_<index + 1>`. The label
    /// comes from the scheme's direct column (fuzzy match); only when that
    /// column is empty is the fallback column used (keyword inference). The sequence is strictly
    /// cleaned.
    pub fn parse_row(&self, row: &SampleRow, index: usize) -> std::result::Result<Sample, SkipReason> {
        let scheme = self.config.scheme;

        let raw_sequence = row.sequence().ok_or(SkipReason::MissingSequence)?;
        let label = resolve_label(row, scheme).ok_or(SkipReason::UnresolvedLabel)?;
        let sequence = clean(raw_sequence, &self.config.clean).map_err(|err| match err {
            DnaclassError::InvalidSequence {
                valid_bases,
                raw_length,
                ..
            } => SkipReason::InvalidSequence {
                valid_bases,
                raw_length,
            },
            _ => SkipReason::InvalidSequence {
                valid_bases: 0,
                raw_length: raw_sequence.chars().count(),
            },
        })?;

        let id = row
            .sample_id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("sample_{}", index + 1));

        let mut sample = Sample::new(id, index, sequence, label);
        sample.raw_features = row.feature_columns();
        Ok(sample)
    }

    /// Validate, parse and featurize rows, without balancing or scaling
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::FormatValidation`] if required columns are
    /// absent from the whole row set.
    pub fn ingest(&self, rows: &[SampleRow]) -> Result<(Vec<Sample>, SkipSummary)> {
        self.config.validate()?;

        let report = validate_format(rows, self.config.scheme);
        if !report.valid {
            return Err(DnaclassError::FormatValidation(report.message));
        }

        let mut samples = Vec::with_capacity(report.valid_count);
        let mut skipped = SkipSummary::default();

        for (index, row) in rows.iter().enumerate() {
            match self.parse_row(row, index) {
                Ok(mut sample) => {
                    fill_missing_features(&mut sample);
                    samples.push(sample);
                }
                Err(reason) => {
                    tracing::debug!(row = index, %reason, "skipping row");
                    skipped.record(&reason);
                }
            }
        }

        if samples.is_empty() {
            tracing::warn!(rows = rows.len(), "no rows survived ingestion");
        }

        Ok((samples, skipped))
    }

    /// Full preparation pass
    ///
    /// # Errors
    ///
    /// Structural problems abort ([`DnaclassError::FormatValidation`],
    /// [`DnaclassError::InvalidConfig`]); per-row problems only show up in
    /// [`PreparedDataset::skipped`].
    pub fn prepare(&self, rows: &[SampleRow]) -> Result<PreparedDataset> {
        let (mut samples, skipped) = self.ingest(rows)?;
        let mut rng = self.rng();

        if self.config.balance {
            samples = balance_classes(samples, &mut rng);
        }

        let dataset = self.assemble(samples, skipped, None)?;
        tracing::info!(
            rows = rows.len(),
            prepared = dataset.len(),
            skipped = skipped.total(),
            "prepared dataset"
        );
        Ok(dataset)
    }

    /// Preparation pass with a holdout split
    ///
    /// Samples are balanced (if enabled) and split before any statistics
    /// are computed; the scaler is fitted on the training part only and
    /// reused for the test part. The skip summary is reported on both.
    ///
    /// An empty training part yields an identity scaler, so test features
    /// keep their raw values.
    pub fn prepare_holdout(&self, rows: &[SampleRow]) -> Result<HoldoutDataset> {
        let (mut samples, skipped) = self.ingest(rows)?;
        let mut rng = self.rng();

        if self.config.balance {
            samples = balance_classes(samples, &mut rng);
        }

        let HoldoutSplit { train, test } =
            split_holdout(samples.len(), self.config.train_ratio, &mut rng);

        let mut slots: Vec<Option<Sample>> = samples.into_iter().map(Some).collect();
        let mut take = |indices: &[usize]| -> Vec<Sample> {
            indices.iter().filter_map(|&i| slots[i].take()).collect()
        };
        let train_samples = take(train.as_slice());
        let test_samples = take(test.as_slice());

        if train_samples.is_empty() && !test_samples.is_empty() {
            tracing::warn!(
                train_ratio = self.config.train_ratio,
                test = test_samples.len(),
                "empty training split, test features left unscaled"
            );
        }

        let train = self.assemble(train_samples, skipped, None)?;
        let test = self.assemble(test_samples, skipped, Some(train.scaler.clone()))?;

        tracing::info!(
            rows = rows.len(),
            train = train.len(),
            test = test.len(),
            skipped = skipped.total(),
            "prepared holdout dataset"
        );

        Ok(HoldoutDataset { train, test })
    }

    /// Names of the columns of produced feature vectors
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NUMERIC_FEATURE_NAMES.iter().map(|n| n.to_string()).collect();
        if self.config.include_enhanced {
            names.extend(enhanced_feature_names());
        }
        names
    }

    /// Raw (unnormalized) feature vector of a featurized sample
    pub fn feature_vector(&self, sample: &Sample) -> Vec<f64> {
        let derived = sample.derived_features.as_ref();
        let mut vector = sample
            .numeric_features()
            .map(|values| values.to_vec())
            .unwrap_or_else(|| extract_numeric_features(&sample.sequence).to_vec());

        if self.config.include_enhanced {
            let enhanced = derived
                .map(|d| d.enhanced)
                .unwrap_or_else(|| enhanced_from_cleaned(sample.sequence.as_bytes()));
            vector.extend(enhanced.to_vec());
        }
        vector
    }

    fn assemble(
        &self,
        samples: Vec<Sample>,
        skipped: SkipSummary,
        scaler: Option<FeatureScaler>,
    ) -> Result<PreparedDataset> {
        let raw: Vec<Vec<f64>> = samples.iter().map(|s| self.feature_vector(s)).collect();
        let feature_names = self.feature_names();
        let scaler = match scaler {
            Some(scaler) => scaler,
            None if raw.is_empty() => {
                FeatureScaler::identity(feature_names.len(), self.config.normalization)
            }
            None => FeatureScaler::fit(&raw, self.config.normalization)?,
        };
        let features = if raw.is_empty() {
            Vec::new()
        } else {
            scaler.transform(&raw)?
        };

        let max_length = self.config.max_length;
        let encoded = samples.iter().map(|s| encode(&s.sequence, max_length)).collect();
        let labels = samples.iter().map(|s| s.label.index()).collect();
        let index = samples.iter().map(|s| s.row_index).collect();

        Ok(PreparedDataset {
            scheme: self.config.scheme,
            max_length,
            samples,
            encoded,
            features,
            feature_names,
            labels,
            index,
            scaler,
            skipped,
        })
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Direct column if it has a value, keyword inference from the fallback
/// column otherwise
fn resolve_label(row: &SampleRow, scheme: LabelScheme) -> Option<Label> {
    match row.direct_label(scheme) {
        Some(value) => scheme.normalize(value),
        None => row.fallback_label(scheme).and_then(|value| scheme.infer(value)),
    }
}
