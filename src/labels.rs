//! Closed label sets and label normalization
//!
//! A deployment classifies either by biological source or by disease-risk
//! tier. Each [`LabelScheme`] fixes:
//!
//! - the ordered class names (the order defines integer label indices),
//! - the column holding the label directly,
//! - a fallback column from which a label can be inferred by keyword.
//!
//! # Resolution
//!
//! Direct values go through [`LabelScheme::normalize`]: a trimmed,
//! case-insensitive match where the input either *contains* a class name or
//! synonym (`"moderate risk"` → `Medium`), or is a substring of exactly one
//! class name (`"h"` → `High`).
//!
//! Fallback values go through [`LabelScheme::infer`], which only applies the
//! scheme's keyword rules.
//!
//! # Examples
//!
//! ```
//! use dnaclass::labels::LabelScheme;
//!
//! let scheme = LabelScheme::DiseaseRisk;
//! assert_eq!(scheme.normalize("moderate risk").unwrap().name(), "Medium");
//! assert_eq!(scheme.normalize("H").unwrap().name(), "High");
//! assert!(scheme.normalize("unknown").is_none());
//!
//! // Risk inferred from the biological source column
//! assert_eq!(scheme.infer("Virus").unwrap().name(), "High");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

const SOURCE_CLASSES: &[&str] = &["Human", "Bacteria", "Virus", "Plant"];
const RISK_CLASSES: &[&str] = &["High", "Medium", "Low"];

/// Synonyms per class, index-aligned with the class list
const SOURCE_SYNONYMS: &[&[&str]] = &[
    &["human", "homo sapiens"],
    &["bacteria", "bacterium", "bacterial"],
    &["virus", "viral"],
    &["plant"],
];
const RISK_SYNONYMS: &[&[&str]] = &[
    &["high", "severe", "critical"],
    &["medium", "moderate", "intermediate", "mid"],
    &["low", "minimal", "benign"],
];

/// Keyword rules for the fallback column: (keyword, class index)
const SOURCE_INFERENCE: &[(&str, usize)] = &[
    ("homo", 0),
    ("sapiens", 0),
    ("human", 0),
    ("phage", 2),
    ("virus", 2),
    ("viral", 2),
    ("coli", 1),
    ("bacill", 1),
    ("strepto", 1),
    ("staphylo", 1),
    ("bacteri", 1),
    ("arabidopsis", 3),
    ("oryza", 3),
    ("zea", 3),
    ("plant", 3),
];
const RISK_INFERENCE: &[(&str, usize)] = &[
    ("virus", 0),
    ("viral", 0),
    ("pathogen", 0),
    ("bacteri", 1),
    ("human", 2),
    ("plant", 2),
];

/// The closed set of classes a dataset is labeled with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelScheme {
    /// `Human`, `Bacteria`, `Virus`, `Plant`
    BiologicalSource,
    /// `High`, `Medium`, `Low`
    #[default]
    DiseaseRisk,
}

impl LabelScheme {
    /// Class names in label-index order
    pub fn class_names(&self) -> &'static [&'static str] {
        match self {
            LabelScheme::BiologicalSource => SOURCE_CLASSES,
            LabelScheme::DiseaseRisk => RISK_CLASSES,
        }
    }

    /// Number of classes
    pub fn num_classes(&self) -> usize {
        self.class_names().len()
    }

    /// Column holding the label directly
    pub fn label_column(&self) -> &'static str {
        match self {
            LabelScheme::BiologicalSource => "Class_Label",
            LabelScheme::DiseaseRisk => "Disease_Risk",
        }
    }

    /// Column a label can be inferred from when the direct one is empty
    pub fn fallback_column(&self) -> &'static str {
        match self {
            LabelScheme::BiologicalSource => "Organism",
            LabelScheme::DiseaseRisk => "Class_Label",
        }
    }

    /// Label for a class index, if in range
    pub fn label(&self, index: usize) -> Option<Label> {
        (index < self.num_classes()).then_some(Label { scheme: *self, index })
    }

    /// Label whose class name equals `name` (case-insensitive)
    pub fn label_by_name(&self, name: &str) -> Option<Label> {
        self.class_names()
            .iter()
            .position(|class| class.eq_ignore_ascii_case(name.trim()))
            .and_then(|index| self.label(index))
    }

    /// Fuzzy-normalize a value from the direct label column
    ///
    /// Returns `None` for empty input or when no class matches unambiguously.
    pub fn normalize(&self, value: &str) -> Option<Label> {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return None;
        }

        let synonyms = match self {
            LabelScheme::BiologicalSource => SOURCE_SYNONYMS,
            LabelScheme::DiseaseRisk => RISK_SYNONYMS,
        };
        for (index, words) in synonyms.iter().enumerate() {
            if words.iter().any(|word| value.contains(word)) {
                return self.label(index);
            }
        }

        // Abbreviations: the input must point at exactly one class
        let mut candidates = self
            .class_names()
            .iter()
            .enumerate()
            .filter(|(_, class)| class.to_lowercase().contains(&value));
        match (candidates.next(), candidates.next()) {
            (Some((index, _)), None) => self.label(index),
            _ => None,
        }
    }

    /// Infer a label from the fallback column by keyword
    pub fn infer(&self, value: &str) -> Option<Label> {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            return None;
        }

        let rules = match self {
            LabelScheme::BiologicalSource => SOURCE_INFERENCE,
            LabelScheme::DiseaseRisk => RISK_INFERENCE,
        };
        rules
            .iter()
            .find(|(keyword, _)| value.contains(keyword))
            .and_then(|&(_, index)| self.label(index))
    }
}

/// One class of a [`LabelScheme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    scheme: LabelScheme,
    index: usize,
}

impl Label {
    /// Integer index used as the training target
    pub fn index(&self) -> usize {
        self.index
    }

    /// Canonical class name
    pub fn name(&self) -> &'static str {
        self.scheme.class_names()[self.index]
    }

    /// Scheme the label belongs to
    pub fn scheme(&self) -> LabelScheme {
        self.scheme
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
