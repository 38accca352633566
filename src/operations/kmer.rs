//! K-mer iteration and counting
//!
//! All statistics here work over overlapping windows: a sequence of length
//! `n` has `n - k + 1` k-mers (none when `k > n`). Windows containing
//! characters outside A/T/C/G are skipped.
//!
//! # Examples
//!
//! ```
//! use dnaclass::operations::kmer::{distinct_kmers, kmer_iter, repetition_ratio};
//!
//! let kmers: Vec<_> = kmer_iter(b"ATGCATGC", 3).collect();
//! assert_eq!(kmers.len(), 6);
//! assert_eq!(kmers[0], b"ATG");
//!
//! // ATG, TGC, GCA, CAT, ATG, TGC → 4 distinct
//! assert_eq!(distinct_kmers(b"ATGCATGC", 3), 4);
//! assert!((repetition_ratio(b"ATGCATGC", 3) - 1.5).abs() < 1e-9);
//! ```

use std::collections::{HashMap, HashSet};

/// Streaming k-mer iterator (zero-copy)
///
/// Returns an iterator over k-mers as borrowed slices.
pub fn kmer_iter(sequence: &[u8], k: usize) -> impl Iterator<Item = &[u8]> {
    if k == 0 || k > sequence.len() {
        return KmerIterator { sequence, k, position: sequence.len() };
    }

    KmerIterator { sequence, k, position: 0 }
}

/// Internal iterator implementation for k-mers
struct KmerIterator<'a> {
    sequence: &'a [u8],
    k: usize,
    position: usize,
}

impl<'a> Iterator for KmerIterator<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.k == 0 {
            return None;
        }

        while self.position + self.k <= self.sequence.len() {
            let kmer = &self.sequence[self.position..self.position + self.k];
            self.position += 1;

            if is_valid_kmer(kmer) {
                return Some(kmer);
            }
        }

        None
    }
}

/// Count occurrences of every k-mer in a sequence
pub fn kmer_counts(sequence: &[u8], k: usize) -> HashMap<&[u8], usize> {
    let mut counts = HashMap::new();
    for kmer in kmer_iter(sequence, k) {
        *counts.entry(kmer).or_insert(0) += 1;
    }
    counts
}

/// Number of distinct k-mers in a sequence
pub fn distinct_kmers(sequence: &[u8], k: usize) -> usize {
    kmer_iter(sequence, k).collect::<HashSet<_>>().len()
}

/// Windows per distinct k-mer: `(n - k + 1) / distinct`
///
/// Grows as the sequence gets more repetitive (fewer distinct k-mers for the
/// same number of windows). A sequence with no k-mers yields 0.0.
///
/// This is an inverse-diversity statistic, not a frequency; trained models
/// expect this direction.
pub fn repetition_ratio(sequence: &[u8], k: usize) -> f64 {
    let windows = kmer_iter(sequence, k).count();
    let distinct = distinct_kmers(sequence, k);

    if distinct == 0 {
        0.0
    } else {
        windows as f64 / distinct as f64
    }
}

/// Check if k-mer contains only A/T/C/G (case-insensitive)
#[inline]
fn is_valid_kmer(kmer: &[u8]) -> bool {
    kmer.iter()
        .all(|&b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmer_iter_basic() {
        let kmers: Vec<&[u8]> = kmer_iter(b"ATGCATGC", 3).collect();
        let expected: Vec<&[u8]> = [b"ATG", b"TGC", b"GCA", b"CAT", b"ATG", b"TGC"]
            .iter()
            .map(|kmer| kmer.as_slice())
            .collect();
        assert_eq!(kmers, expected);
    }

    #[test]
    fn test_kmer_iter_skips_invalid() {
        // Skips: "GCN", "CNN", "NNA", "NAT"
        let kmers: Vec<_> = kmer_iter(b"ATGCNNATGC", 3).collect();
        assert_eq!(kmers.len(), 4);
    }

    #[test]
    fn test_kmer_iter_edge_cases() {
        assert_eq!(kmer_iter(b"AT", 3).count(), 0);
        assert_eq!(kmer_iter(b"ATG", 0).count(), 0);
        assert_eq!(kmer_iter(b"", 3).count(), 0);
        assert_eq!(kmer_iter(b"ATG", 3).count(), 1);
    }

    #[test]
    fn test_kmer_counts() {
        let counts = kmer_counts(b"AAAA", 2);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&b"AA"[..]), Some(&3));
    }

    #[test]
    fn test_repetition_ratio_homopolymer() {
        // 8 windows, 1 distinct trimer
        assert!((repetition_ratio(b"AAAAAAAAAA", 3) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_repetition_ratio_all_distinct() {
        assert!((repetition_ratio(b"ATGC", 3) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_repetition_ratio_short() {
        assert_eq!(repetition_ratio(b"AT", 3), 0.0);
        assert_eq!(repetition_ratio(b"", 3), 0.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: window count matches n - k + 1 for clean sequences
            #[test]
            fn prop_kmer_count(seq in "[ACGT]{1,100}", k in 1usize..10) {
                let expected = if k > seq.len() { 0 } else { seq.len() - k + 1 };
                prop_assert_eq!(kmer_iter(seq.as_bytes(), k).count(), expected);
            }

            /// Property: the ratio is never below 1 once a k-mer exists
            #[test]
            fn prop_ratio_at_least_one(seq in "[ACGT]{3,200}") {
                prop_assert!(repetition_ratio(seq.as_bytes(), 3) >= 1.0);
            }
        }
    }
}
