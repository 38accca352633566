//! Common types used throughout dnaclass

use crate::error::{DnaclassError, Result};
use crate::labels::{Label, LabelScheme};
use crate::operations::features::{
    EnhancedFeatures, NumericFeatures, NUMERIC_FEATURE_NAMES, NUM_NUMERIC_FEATURES,
};

/// The eight numeric feature columns, as supplied by the input
///
/// A `None` field means the column was absent or unparsable for this row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureColumns {
    /// `GC_Content` (%)
    pub gc_content: Option<f64>,
    /// `AT_Content` (%)
    pub at_content: Option<f64>,
    /// `Sequence_Length`
    pub sequence_length: Option<f64>,
    /// `Num_A`
    pub num_a: Option<f64>,
    /// `Num_T`
    pub num_t: Option<f64>,
    /// `Num_C`
    pub num_c: Option<f64>,
    /// `Num_G`
    pub num_g: Option<f64>,
    /// `kmer_3_freq`
    pub kmer_3_freq: Option<f64>,
}

impl FeatureColumns {
    /// Columns in feature-vector order
    pub fn to_array(&self) -> [Option<f64>; NUM_NUMERIC_FEATURES] {
        [
            self.gc_content,
            self.at_content,
            self.sequence_length,
            self.num_a,
            self.num_t,
            self.num_c,
            self.num_g,
            self.kmer_3_freq,
        ]
    }

    fn slots_mut(&mut self) -> [&mut Option<f64>; NUM_NUMERIC_FEATURES] {
        [
            &mut self.gc_content,
            &mut self.at_content,
            &mut self.sequence_length,
            &mut self.num_a,
            &mut self.num_t,
            &mut self.num_c,
            &mut self.num_g,
            &mut self.kmer_3_freq,
        ]
    }

    /// `true` if every column has a value
    pub fn is_complete(&self) -> bool {
        self.to_array().iter().all(Option::is_some)
    }

    /// Fill every `None` column from `computed`, never touching present ones
    ///
    /// Returns the names of the columns that were filled.
    pub fn fill_from(&mut self, computed: &NumericFeatures) -> Vec<&'static str> {
        let values = computed.to_array();
        let mut filled = Vec::new();

        for ((slot, value), name) in self
            .slots_mut()
            .into_iter()
            .zip(values)
            .zip(NUMERIC_FEATURE_NAMES)
        {
            if slot.is_none() {
                *slot = Some(value);
                filled.push(name);
            }
        }

        filled
    }

    /// All eight values, or `None` if any column is still missing
    pub fn values(&self) -> Option<[f64; NUM_NUMERIC_FEATURES]> {
        let columns = self.to_array();
        let mut values = [0.0; NUM_NUMERIC_FEATURES];
        for (value, column) in values.iter_mut().zip(columns) {
            *value = column?;
        }
        Some(values)
    }
}

/// Features computed by the extractor for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    /// Full numeric feature set of the cleaned sequence
    pub numeric: NumericFeatures,
    /// Column names that were missing from the input and filled in
    pub filled_columns: Vec<&'static str>,
    /// Entropy, repeat score and dinucleotide frequencies
    pub enhanced: EnhancedFeatures,
}

/// Model output for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Most probable class
    pub label: Label,
    /// Probability of `label`
    pub confidence: f64,
    /// Per-class probabilities in scheme order
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Build a prediction from a probability vector (argmax)
    ///
    /// Ties resolve to the lowest class index.
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::PredictionShape`] if the vector length does
    /// not equal the number of classes in `scheme`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnaclass::labels::LabelScheme;
    /// use dnaclass::Prediction;
    ///
    /// let p = Prediction::from_probabilities(LabelScheme::DiseaseRisk, vec![0.1, 0.7, 0.2])?;
    /// assert_eq!(p.label.name(), "Medium");
    /// assert_eq!(p.confidence, 0.7);
    /// # Ok::<(), dnaclass::DnaclassError>(())
    /// ```
    pub fn from_probabilities(scheme: LabelScheme, probabilities: Vec<f64>) -> Result<Self> {
        let expected = scheme.num_classes();
        if probabilities.len() != expected {
            return Err(DnaclassError::PredictionShape {
                expected,
                actual: probabilities.len(),
            });
        }

        let (index, confidence) = probabilities.iter().copied().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |best, (i, p)| if p > best.1 { (i, p) } else { best },
        );
        let label = scheme.label(index).ok_or(DnaclassError::PredictionShape {
            expected,
            actual: probabilities.len(),
        })?;

        Ok(Self {
            label,
            confidence,
            probabilities,
        })
    }
}

/// One biological record
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Identifier, unique within a dataset
    pub id: String,
    /// Position of the originating row in the input
    pub row_index: usize,
    /// Cleaned sequence (A/T/C/G only)
    pub sequence: String,
    /// Numeric columns as supplied by the input
    pub raw_features: FeatureColumns,
    /// Extractor output, set by `fill_missing_features`
    pub derived_features: Option<DerivedFeatures>,
    /// Ground-truth class
    pub label: Label,
    /// Model output, set after prediction
    pub prediction: Option<Prediction>,
}

impl Sample {
    /// Create a sample with no features or prediction yet
    pub fn new(id: String, row_index: usize, sequence: String, label: Label) -> Self {
        Self {
            id,
            row_index,
            sequence,
            raw_features: FeatureColumns::default(),
            derived_features: None,
            label,
            prediction: None,
        }
    }

    /// Numeric feature vector: supplied values first, derived ones for gaps
    ///
    /// Returns `None` while columns are missing and no derived features
    /// have been computed.
    pub fn numeric_features(&self) -> Option<[f64; NUM_NUMERIC_FEATURES]> {
        if let Some(values) = self.raw_features.values() {
            return Some(values);
        }
        let derived = self.derived_features.as_ref()?;
        let mut columns = self.raw_features;
        columns.fill_from(&derived.numeric);
        columns.values()
    }

    /// `true` if a prediction exists and matches the label
    pub fn is_correctly_predicted(&self) -> Option<bool> {
        self.prediction.as_ref().map(|p| p.label == self.label)
    }
}
