//! Numeric feature vectors for one sequence
//!
//! # Numeric features
//!
//! [`extract_numeric_features`] produces the eight model inputs in a fixed
//! order (see [`NUMERIC_FEATURE_NAMES`]):
//!
//! 1. GC content (%)
//! 2. AT content (%)
//! 3. Length
//! 4. Count of A, T, C, G (four fields)
//! 8. 3-mer repetition ratio, `(length - 2) / distinct_trimers`
//!
//! # Enhanced features
//!
//! [`extract_enhanced_features`] adds entropy, tandem-repeat score and the
//! sixteen overlapping dinucleotide frequencies. It takes *raw* input and
//! strips invalid characters itself; an empty result yields all zeros. This
//! is the graceful path for single-sequence analysis; batch ingestion goes
//! through [`clean`](crate::operations::clean) first and rejects bad rows.
//!
//! Every k-window statistic divides by the number of overlapping windows,
//! `length - k + 1`: `length - 2` for trimers, `length - 1` for
//! dinucleotides.
//!
//! # Examples
//!
//! ```
//! use dnaclass::operations::{extract_enhanced_features, extract_numeric_features};
//!
//! let features = extract_numeric_features("AAAATTTTCCCCGGGG");
//! assert_eq!(features.gc_content, 50.0);
//! assert_eq!(features.at_content, 50.0);
//! assert_eq!(features.length, 16.0);
//! assert_eq!(features.to_vec().len(), 8);
//!
//! let enhanced = extract_enhanced_features("acgt acgt");
//! assert!((enhanced.entropy - 2.0).abs() < 1e-9);
//!
//! let empty = extract_enhanced_features("!!!");
//! assert_eq!(empty.entropy, 0.0);
//! assert!(empty.dinucleotides.iter().all(|&f| f == 0.0));
//! ```

use crate::operations::base_counting::count_bases;
use crate::operations::complexity::{repeat_score, shannon_entropy};
use crate::operations::gc_content::{at_percent, gc_percent};
use crate::operations::kmer::repetition_ratio;
use crate::operations::sequence::strip_invalid;
use serde::{Deserialize, Serialize};

/// Number of numeric features
pub const NUM_NUMERIC_FEATURES: usize = 8;

/// Number of enhanced features (entropy, repeat score, 16 dinucleotides, GC total)
pub const NUM_ENHANCED_FEATURES: usize = 19;

/// Names of the numeric features, in vector order
///
/// These match the column names of the tabular input.
pub const NUMERIC_FEATURE_NAMES: [&str; NUM_NUMERIC_FEATURES] = [
    "GC_Content",
    "AT_Content",
    "Sequence_Length",
    "Num_A",
    "Num_T",
    "Num_C",
    "Num_G",
    "kmer_3_freq",
];

/// Dinucleotides in frequency-vector order (A, T, C, G major)
pub const DINUCLEOTIDES: [&str; 16] = [
    "AA", "AT", "AC", "AG", "TA", "TT", "TC", "TG", "CA", "CT", "CC", "CG", "GA", "GT", "GC",
    "GG",
];

/// Names of the enhanced features, in vector order
pub fn enhanced_feature_names() -> Vec<String> {
    let mut names = vec!["entropy".to_string(), "repeat_score".to_string()];
    names.extend(DINUCLEOTIDES.iter().map(|d| format!("dinuc_{d}")));
    names.push("gc_dinucleotides".to_string());
    names
}

/// The eight model-facing numeric features
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericFeatures {
    /// GC content (%)
    pub gc_content: f64,
    /// AT content (%)
    pub at_content: f64,
    /// Sequence length
    pub length: f64,
    /// Count of A
    pub count_a: f64,
    /// Count of T
    pub count_t: f64,
    /// Count of C
    pub count_c: f64,
    /// Count of G
    pub count_g: f64,
    /// Trimer windows per distinct trimer
    pub kmer_3_ratio: f64,
}

impl NumericFeatures {
    /// Features in [`NUMERIC_FEATURE_NAMES`] order
    pub fn to_array(&self) -> [f64; NUM_NUMERIC_FEATURES] {
        [
            self.gc_content,
            self.at_content,
            self.length,
            self.count_a,
            self.count_t,
            self.count_c,
            self.count_g,
            self.kmer_3_ratio,
        ]
    }

    /// Features as an owned vector
    pub fn to_vec(&self) -> Vec<f64> {
        self.to_array().to_vec()
    }
}

/// Entropy, repeat and dinucleotide statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedFeatures {
    /// Shannon entropy in bits (0.0 to 2.0)
    pub entropy: f64,
    /// Tandem-repeat score (0.0 to 10.0)
    pub repeat_score: f64,
    /// Overlapping dinucleotide frequencies in [`DINUCLEOTIDES`] order
    pub dinucleotides: [f64; 16],
    /// Sum of GC, CG, GG and CC frequencies
    pub gc_dinucleotides: f64,
}

impl EnhancedFeatures {
    /// Frequency of one dinucleotide (e.g. `"CG"`)
    pub fn dinucleotide(&self, pair: &str) -> Option<f64> {
        DINUCLEOTIDES
            .iter()
            .position(|d| d.eq_ignore_ascii_case(pair))
            .map(|i| self.dinucleotides[i])
    }

    /// Features as a vector, in [`enhanced_feature_names`] order
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(NUM_ENHANCED_FEATURES);
        values.push(self.entropy);
        values.push(self.repeat_score);
        values.extend_from_slice(&self.dinucleotides);
        values.push(self.gc_dinucleotides);
        values
    }
}

/// Lenient analysis of one raw sequence, for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceAnalysis {
    /// Input after [`strip_invalid`]
    pub cleaned: String,
    /// Numeric features of the cleaned sequence
    pub numeric: NumericFeatures,
    /// Enhanced features of the cleaned sequence
    pub enhanced: EnhancedFeatures,
}

/// Numeric features of a cleaned sequence
///
/// A zero-length sequence yields all zeros; fewer than three bases give a
/// 3-mer ratio of zero.
pub fn extract_numeric_features(cleaned: &str) -> NumericFeatures {
    let seq = cleaned.as_bytes();
    let counts = count_bases(seq);

    NumericFeatures {
        gc_content: gc_percent(seq),
        at_content: at_percent(seq),
        length: seq.len() as f64,
        count_a: counts.a as f64,
        count_t: counts.t as f64,
        count_c: counts.c as f64,
        count_g: counts.g as f64,
        kmer_3_ratio: repetition_ratio(seq, 3),
    }
}

/// Enhanced features of a raw sequence (never fails)
pub fn extract_enhanced_features(sequence: &str) -> EnhancedFeatures {
    let cleaned = strip_invalid(sequence);
    enhanced_from_cleaned(cleaned.as_bytes())
}

pub(crate) fn enhanced_from_cleaned(seq: &[u8]) -> EnhancedFeatures {
    if seq.is_empty() {
        return EnhancedFeatures::default();
    }

    let dinucleotides = dinucleotide_frequencies(seq);
    let gc_dinucleotides = ["GC", "CG", "GG", "CC"]
        .iter()
        .filter_map(|pair| DINUCLEOTIDES.iter().position(|d| d == pair))
        .map(|i| dinucleotides[i])
        .sum();

    EnhancedFeatures {
        entropy: shannon_entropy(seq),
        repeat_score: repeat_score(seq),
        dinucleotides,
        gc_dinucleotides,
    }
}

/// Overlapping dinucleotide counts divided by `length - 1`
fn dinucleotide_frequencies(seq: &[u8]) -> [f64; 16] {
    let mut frequencies = [0.0; 16];
    if seq.len() < 2 {
        return frequencies;
    }

    let mut counts = [0usize; 16];
    for pair in seq.windows(2) {
        if let (Some(first), Some(second)) = (base_index(pair[0]), base_index(pair[1])) {
            counts[first * 4 + second] += 1;
        }
    }

    let windows = (seq.len() - 1) as f64;
    for (frequency, count) in frequencies.iter_mut().zip(counts) {
        *frequency = count as f64 / windows;
    }
    frequencies
}

#[inline]
fn base_index(base: u8) -> Option<usize> {
    match base {
        b'A' => Some(0),
        b'T' => Some(1),
        b'C' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Lenient single-sequence analysis: strip, then compute every feature
pub fn analyze_sequence(sequence: &str) -> SequenceAnalysis {
    let cleaned = strip_invalid(sequence);
    let numeric = extract_numeric_features(&cleaned);
    let enhanced = enhanced_from_cleaned(cleaned.as_bytes());

    SequenceAnalysis {
        cleaned,
        numeric,
        enhanced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_balanced() {
        let f = extract_numeric_features("AAAATTTTCCCCGGGG");
        assert_eq!(f.gc_content, 50.0);
        assert_eq!(f.at_content, 50.0);
        assert_eq!(f.length, 16.0);
        assert_eq!([f.count_a, f.count_t, f.count_c, f.count_g], [4.0; 4]);
        // 14 windows: AAA TTT CCC GGG plus 6 junction trimers → 10 distinct
        assert!((f.kmer_3_ratio - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_order() {
        let f = extract_numeric_features("GGGCA");
        let v = f.to_vec();
        assert_eq!(v.len(), NUM_NUMERIC_FEATURES);
        assert_eq!(v[0], 80.0);
        assert_eq!(v[2], 5.0);
        assert_eq!(&v[3..7], &[1.0, 0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_numeric_empty() {
        assert_eq!(extract_numeric_features(""), NumericFeatures::default());
    }

    #[test]
    fn test_dinucleotides_sum_to_one() {
        let e = extract_enhanced_features("ACGTTGCAAC");
        let total: f64 = e.dinucleotides.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gc_dinucleotides() {
        // GC, CG, GC over 3 windows
        let e = extract_enhanced_features("GCGC");
        assert!((e.gc_dinucleotides - 1.0).abs() < 1e-9);
        assert!((e.dinucleotide("gc").unwrap() - 2.0 / 3.0).abs() < 1e-9);
        assert!((e.dinucleotide("CG").unwrap() - 1.0 / 3.0).abs() < 1e-9);
        assert!(e.dinucleotide("XX").is_none());
    }

    #[test]
    fn test_enhanced_single_base() {
        let e = extract_enhanced_features("a");
        assert_eq!(e.entropy, 0.0);
        assert!(e.dinucleotides.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_enhanced_vector_shape() {
        let e = extract_enhanced_features("ACGTACGTAC");
        assert_eq!(e.to_vec().len(), NUM_ENHANCED_FEATURES);
        assert_eq!(enhanced_feature_names().len(), NUM_ENHANCED_FEATURES);
    }

    #[test]
    fn test_analyze_sequence_lenient() {
        let analysis = analyze_sequence("xx at 12");
        assert_eq!(analysis.cleaned, "AT");
        assert_eq!(analysis.numeric.length, 2.0);
        assert!((analysis.enhanced.entropy - 1.0).abs() < 1e-9);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: base counts sum to length
            #[test]
            fn prop_counts_sum(seq in "[ACGT]{0,400}") {
                let f = extract_numeric_features(&seq);
                prop_assert_eq!(f.count_a + f.count_t + f.count_c + f.count_g, f.length);
            }

            /// Property: GC% + AT% = 100 for non-empty sequences
            #[test]
            fn prop_gc_at_sum(seq in "[ACGT]{1,400}") {
                let f = extract_numeric_features(&seq);
                prop_assert!((f.gc_content + f.at_content - 100.0).abs() < 1e-9);
            }
        }
    }
}
