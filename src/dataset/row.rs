//! Typed ingestion schema and pre-flight format validation
//!
//! Tabular input is deserialized straight into [`SampleRow`], a struct of
//! named optional fields. Columns the schema does not know are ignored;
//! known columns that are absent, empty or (for numeric columns)
//! unparsable become `None`.

use crate::labels::LabelScheme;
use crate::types::FeatureColumns;
use serde::{Deserialize, Serialize};

/// One input row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    /// `Sample_ID`
    #[serde(rename = "Sample_ID", default)]
    pub sample_id: Option<String>,
    /// `Sequence`
    #[serde(rename = "Sequence", default)]
    pub sequence: Option<String>,
    /// `Class_Label` (biological source)
    #[serde(rename = "Class_Label", default)]
    pub class_label: Option<String>,
    /// `Disease_Risk` (risk tier)
    #[serde(rename = "Disease_Risk", default)]
    pub disease_risk: Option<String>,
    /// `Organism` (free text, used to infer a source label)
    #[serde(rename = "Organism", default)]
    pub organism: Option<String>,
    /// `GC_Content`
    #[serde(rename = "GC_Content", default, deserialize_with = "csv::invalid_option")]
    pub gc_content: Option<f64>,
    /// `AT_Content`
    #[serde(rename = "AT_Content", default, deserialize_with = "csv::invalid_option")]
    pub at_content: Option<f64>,
    /// `Sequence_Length`
    #[serde(rename = "Sequence_Length", default, deserialize_with = "csv::invalid_option")]
    pub sequence_length: Option<f64>,
    /// `Num_A`
    #[serde(rename = "Num_A", default, deserialize_with = "csv::invalid_option")]
    pub num_a: Option<f64>,
    /// `Num_T`
    #[serde(rename = "Num_T", default, deserialize_with = "csv::invalid_option")]
    pub num_t: Option<f64>,
    /// `Num_C`
    #[serde(rename = "Num_C", default, deserialize_with = "csv::invalid_option")]
    pub num_c: Option<f64>,
    /// `Num_G`
    #[serde(rename = "Num_G", default, deserialize_with = "csv::invalid_option")]
    pub num_g: Option<f64>,
    /// `kmer_3_freq`
    #[serde(rename = "kmer_3_freq", default, deserialize_with = "csv::invalid_option")]
    pub kmer_3_freq: Option<f64>,
}

impl SampleRow {
    /// Row with only a sequence and a class/risk value set
    ///
    /// Convenience for building rows in code; the value lands in the direct
    /// label column of `scheme`.
    pub fn labeled(sequence: impl Into<String>, label: impl Into<String>, scheme: LabelScheme) -> Self {
        let mut row = SampleRow {
            sequence: Some(sequence.into()),
            ..Default::default()
        };
        match scheme {
            LabelScheme::BiologicalSource => row.class_label = Some(label.into()),
            LabelScheme::DiseaseRisk => row.disease_risk = Some(label.into()),
        }
        row
    }

    /// Non-empty trimmed value of the scheme's direct label column
    pub fn direct_label(&self, scheme: LabelScheme) -> Option<&str> {
        let value = match scheme {
            LabelScheme::BiologicalSource => self.class_label.as_deref(),
            LabelScheme::DiseaseRisk => self.disease_risk.as_deref(),
        };
        non_empty(value)
    }

    /// Non-empty trimmed value of the scheme's fallback column
    pub fn fallback_label(&self, scheme: LabelScheme) -> Option<&str> {
        let value = match scheme {
            LabelScheme::BiologicalSource => self.organism.as_deref(),
            LabelScheme::DiseaseRisk => self.class_label.as_deref(),
        };
        non_empty(value)
    }

    /// Non-empty trimmed sequence
    pub fn sequence(&self) -> Option<&str> {
        non_empty(self.sequence.as_deref())
    }

    /// Non-empty trimmed sample identifier
    pub fn sample_id(&self) -> Option<&str> {
        non_empty(self.sample_id.as_deref())
    }

    /// Numeric columns as supplied
    ///
    /// `NaN` and infinite cells count as missing.
    pub fn feature_columns(&self) -> FeatureColumns {
        FeatureColumns {
            gc_content: finite(self.gc_content),
            at_content: finite(self.at_content),
            sequence_length: finite(self.sequence_length),
            num_a: finite(self.num_a),
            num_t: finite(self.num_t),
            num_c: finite(self.num_c),
            num_g: finite(self.num_g),
            kmer_3_freq: finite(self.kmer_3_freq),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Outcome of [`validate_format`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    /// Required columns are present
    pub valid: bool,
    /// Human-readable summary
    pub message: String,
    /// Rows with both a sequence and a label value
    pub valid_count: usize,
}

/// Pre-flight check of a row set
///
/// A column counts as present if at least one row has a value for it. The
/// set is valid when `Sequence` is present together with either the
/// scheme's direct label column or its fallback column. This does not
/// filter rows; `valid_count` only reports how many rows carry both a
/// sequence and a label value.
///
/// # Examples
///
/// ```
/// use dnaclass::dataset::{validate_format, SampleRow};
/// use dnaclass::labels::LabelScheme;
///
/// let scheme = LabelScheme::DiseaseRisk;
/// let rows = vec![
///     SampleRow::labeled("ATCGATCGAT", "high", scheme),
///     SampleRow { sequence: Some("ATCG".into()), ..Default::default() },
/// ];
///
/// let report = validate_format(&rows, scheme);
/// assert!(report.valid);
/// assert_eq!(report.valid_count, 1);
/// ```
pub fn validate_format(rows: &[SampleRow], scheme: LabelScheme) -> FormatReport {
    if rows.is_empty() {
        return FormatReport {
            valid: false,
            message: "Dataset contains no rows".to_string(),
            valid_count: 0,
        };
    }

    let has_sequence = rows.iter().any(|r| r.sequence().is_some());
    let has_direct = rows.iter().any(|r| r.direct_label(scheme).is_some());
    let has_fallback = rows.iter().any(|r| r.fallback_label(scheme).is_some());

    let mut missing = Vec::new();
    if !has_sequence {
        missing.push("Sequence".to_string());
    }
    if !has_direct && !has_fallback {
        missing.push(format!(
            "{} (or {})",
            scheme.label_column(),
            scheme.fallback_column()
        ));
    }

    let valid_count = rows
        .iter()
        .filter(|r| {
            r.sequence().is_some()
                && (r.direct_label(scheme).is_some() || r.fallback_label(scheme).is_some())
        })
        .count();

    if missing.is_empty() {
        FormatReport {
            valid: true,
            message: format!("{} of {} rows have a sequence and a label", valid_count, rows.len()),
            valid_count,
        }
    } else {
        FormatReport {
            valid: false,
            message: format!("Missing required columns: {}", missing.join(", ")),
            valid_count,
        }
    }
}
