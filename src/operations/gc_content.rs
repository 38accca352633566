//! GC and AT content
//!
//! Both statistics are computed over A/T/C/G bases only; ambiguous or noise
//! characters are ignored rather than counted against the total.
//!
//! - [`gc_content`] returns a fraction (0.0 to 1.0)
//! - [`gc_percent`] / [`at_percent`] return percentages, as used in the
//!   numeric feature vector
//!
//! For any sequence containing at least one valid base,
//! `gc_percent + at_percent == 100`.

use crate::operations::base_counting::count_bases;

/// GC content result as a fraction (0.0 to 1.0)
pub type GCContent = f64;

/// Calculate GC content of a DNA sequence
///
/// Returns the fraction of bases that are G or C (ignoring non-ACGT characters).
///
/// # Example
///
/// ```
/// use dnaclass::operations::gc_content;
///
/// let sequence = b"GATTACAGATTACA";
/// let gc = gc_content(sequence);
/// assert!((gc - 0.286).abs() < 0.001); // ~28.6% GC (4 out of 14: 2G + 2C)
/// ```
pub fn gc_content(seq: &[u8]) -> GCContent {
    let counts = count_bases(seq);
    let total = counts.total();

    if total == 0 {
        0.0 // Empty sequence or all non-ACGT
    } else {
        counts.gc() as f64 / total as f64
    }
}

/// GC content as a percentage (0.0 to 100.0)
pub fn gc_percent(seq: &[u8]) -> f64 {
    gc_content(seq) * 100.0
}

/// AT content as a percentage (0.0 to 100.0)
///
/// Returns 0.0 when the sequence holds no valid bases.
pub fn at_percent(seq: &[u8]) -> f64 {
    let counts = count_bases(seq);
    let total = counts.total();

    if total == 0 {
        0.0
    } else {
        counts.at() as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gc_content_basic() {
        let seq = b"GATTACA"; // 2 GC out of 7 total
        let gc = gc_content(seq);
        assert!((gc - 0.285714).abs() < 0.001);
    }

    #[test]
    fn test_gc_content_all_gc() {
        assert!((gc_content(b"GCGCGCGC") - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_gc_content_with_n() {
        let seq = b"GATNNCACN"; // 3 GC out of 6 ACGT bases (ignore N)
        assert!((gc_content(seq) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_gc_content_empty() {
        assert_eq!(gc_content(b""), 0.0);
        assert_eq!(gc_content(b"NNNNN"), 0.0);
        assert_eq!(at_percent(b""), 0.0);
    }

    #[test]
    fn test_percentages_balanced() {
        let seq = b"AAAATTTTCCCCGGGG";
        assert!((gc_percent(seq) - 50.0).abs() < 1e-9);
        assert!((at_percent(seq) - 50.0).abs() < 1e-9);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: GC% + AT% = 100 for non-empty clean sequences
            #[test]
            fn prop_gc_at_complement(seq in "[ACGT]{1,500}") {
                let sum = gc_percent(seq.as_bytes()) + at_percent(seq.as_bytes());
                prop_assert!((sum - 100.0).abs() < 1e-9);
            }
        }
    }
}
