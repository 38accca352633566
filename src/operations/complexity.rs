//! Sequence complexity: Shannon entropy and tandem-repeat score
//!
//! # Algorithm
//!
//! Shannon entropy measures how evenly the four bases are used:
//! H = -Σ(p_i × log₂(p_i)), with p_i the fractional base frequency.
//!
//! - **0.0 bits**: Homopolymer (AAAA...)
//! - **1.0 bit**: Dinucleotide repeat (ATATATAT...)
//! - **2.0 bits**: All four bases equally frequent
//!
//! The repeat score counts short tandem repeats: for each period
//! k ∈ {2, 3, 4} the sequence is scanned for runs of at least three adjacent
//! copies of a k-length pattern, each run contributing `copies - 2`. The
//! scan resumes after a run, so a run is counted once per period. The total
//! is clipped at [`MAX_REPEAT_SCORE`].
//!
//! # Examples
//!
//! ```
//! use dnaclass::operations::{complexity_score, repeat_score, shannon_entropy};
//!
//! assert_eq!(shannon_entropy(b"AAAAAAAA"), 0.0);
//! assert!((shannon_entropy(b"ACGTACGT") - 2.0).abs() < 1e-9);
//! assert!((complexity_score(b"ATATATAT") - 0.5).abs() < 1e-9);
//!
//! // "AT" × 5 → one run of 5 copies → 3
//! assert_eq!(repeat_score(b"ATATATATAT"), 3.0);
//! ```

use crate::operations::base_counting::{count_bases, BaseCounts};

/// Upper bound of [`repeat_score`]
pub const MAX_REPEAT_SCORE: f64 = 10.0;

/// Tandem-repeat periods scanned by [`repeat_score`]
const REPEAT_PERIODS: std::ops::RangeInclusive<usize> = 2..=4;

/// Minimum adjacent copies for a run to count
const MIN_COPIES: usize = 3;

/// Shannon entropy of the base distribution, in bits (0.0 to 2.0)
///
/// Non-ACGT characters are ignored. A sequence with no valid bases has
/// entropy 0.0.
pub fn shannon_entropy(seq: &[u8]) -> f64 {
    let counts = count_bases(seq);
    entropy_from_counts(&counts)
}

/// Shannon entropy normalized to 0.0-1.0 (divided by log₂(4))
pub fn complexity_score(seq: &[u8]) -> f64 {
    shannon_entropy(seq) / 2.0
}

/// Calculate Shannon entropy from base counts
fn entropy_from_counts(counts: &BaseCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let mut entropy = 0.0;

    for count in counts.as_array() {
        if count > 0 {
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
    }

    entropy
}

/// Tandem-repeat score (0.0 to 10.0)
///
/// Expects a cleaned, uppercase sequence; characters are compared verbatim.
pub fn repeat_score(seq: &[u8]) -> f64 {
    let mut score = 0usize;

    for k in REPEAT_PERIODS {
        let mut i = 0;
        while i + k <= seq.len() {
            let pattern = &seq[i..i + k];
            let mut copies = 1;
            let mut j = i + k;

            while j + k <= seq.len() && &seq[j..j + k] == pattern {
                copies += 1;
                j += k;
            }

            if copies >= MIN_COPIES {
                score += copies - 2;
                i = j;
            } else {
                i += 1;
            }
        }
    }

    (score as f64).min(MAX_REPEAT_SCORE)
}
