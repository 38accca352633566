//! Per-base composition counts
//!
//! Counting is the building block of GC/AT content, entropy and the numeric
//! feature vector. Characters outside A/T/C/G (either case) are ignored, so
//! for a cleaned sequence the four counts always sum to its length.
//!
//! # Examples
//!
//! ```
//! use dnaclass::operations::count_bases;
//!
//! let counts = count_bases(b"GATTACA");
//! assert_eq!(counts.a, 3);
//! assert_eq!(counts.t, 2);
//! assert_eq!(counts.total(), 7);
//! ```

/// Base counts for one sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    /// Adenine
    pub a: usize,
    /// Thymine
    pub t: usize,
    /// Cytosine
    pub c: usize,
    /// Guanine
    pub g: usize,
}

impl BaseCounts {
    /// Sum of all four counts
    pub fn total(&self) -> usize {
        self.a + self.t + self.c + self.g
    }

    /// G + C
    pub fn gc(&self) -> usize {
        self.g + self.c
    }

    /// A + T
    pub fn at(&self) -> usize {
        self.a + self.t
    }

    /// Counts in encoding order: A, T, C, G
    pub fn as_array(&self) -> [usize; 4] {
        [self.a, self.t, self.c, self.g]
    }
}

/// Count A, T, C and G (case-insensitive) in a sequence
pub fn count_bases(seq: &[u8]) -> BaseCounts {
    let mut counts = BaseCounts::default();

    for &base in seq {
        match base {
            b'A' | b'a' => counts.a += 1,
            b'T' | b't' => counts.t += 1,
            b'C' | b'c' => counts.c += 1,
            b'G' | b'g' => counts.g += 1,
            _ => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_balanced() {
        let counts = count_bases(b"AAAATTTTCCCCGGGG");
        assert_eq!(counts.as_array(), [4, 4, 4, 4]);
        assert_eq!(counts.gc(), 8);
        assert_eq!(counts.at(), 8);
    }

    #[test]
    fn test_count_ignores_noise() {
        let counts = count_bases(b"acgtNNN-xx");
        assert_eq!(counts.as_array(), [1, 1, 1, 1]);
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_bases(b""), BaseCounts::default());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: counts of a clean sequence sum to its length
            #[test]
            fn prop_counts_sum_to_length(seq in "[ACGT]{0,500}") {
                prop_assert_eq!(count_bases(seq.as_bytes()).total(), seq.len());
            }
        }
    }
}
