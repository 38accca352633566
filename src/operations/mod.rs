//! Sequence operations and feature primitives
//!
//! This module provides:
//! - Sequence cleaning and fixed-length encoding (integer and one-hot)
//! - Base statistics: counts, GC/AT content, k-mer repetition
//! - Complexity measures: Shannon entropy and tandem-repeat score
//! - Per-sequence feature extraction built on the above
//!
//! # Organization
//!
//! - `sequence`: cleaning (`clean`, `strip_invalid`) and encoding
//! - `base_counting`, `gc_content`, `kmer`: composition statistics
//! - `complexity`: entropy and repeat scoring
//! - `features`: numeric (8) and enhanced (19) feature vectors
//!
//! All functions here are pure and single-pass over their input.

pub mod base_counting;
pub mod complexity;
pub mod features;
pub mod gc_content;
pub mod kmer;
pub mod sequence;

pub use base_counting::{count_bases, BaseCounts};
pub use complexity::{complexity_score, repeat_score, shannon_entropy, MAX_REPEAT_SCORE};
pub use gc_content::{at_percent, gc_content, gc_percent, GCContent};
pub use kmer::{distinct_kmers, kmer_counts, kmer_iter, repetition_ratio};

// Cleaning and encoding
pub use sequence::{clean, encode, one_hot_encode, strip_invalid, PAD_CODE};

// Feature extraction
pub use features::{
    analyze_sequence, enhanced_feature_names, extract_enhanced_features,
    extract_numeric_features, EnhancedFeatures, NumericFeatures, SequenceAnalysis,
    DINUCLEOTIDES, NUMERIC_FEATURE_NAMES, NUM_ENHANCED_FEATURES, NUM_NUMERIC_FEATURES,
};
