//! Sequence cleaning and fixed-length encoding
//!
//! Two cleaning entry points with different contracts:
//!
//! - [`clean`]: strict. Used for dataset ingestion. Rejects input that is
//!   too short or not predominantly nucleotide data.
//! - [`strip_invalid`]: lenient. Used for ad hoc analysis. Never fails.
//!
//! Both uppercase the input and keep only A, T, C and G.
//!
//! Encodings map bases in the fixed order A, T, C, G:
//!
//! | Base | Integer | One-hot      |
//! |------|---------|--------------|
//! | A    | 0       | `[1,0,0,0]`  |
//! | T    | 1       | `[0,1,0,0]`  |
//! | C    | 2       | `[0,0,1,0]`  |
//! | G    | 3       | `[0,0,0,1]`  |
//! | pad  | 0       | `[0,0,0,0]`  |
//!
//! # Examples
//!
//! ```
//! use dnaclass::config::CleanPolicy;
//! use dnaclass::operations::{clean, encode, strip_invalid};
//!
//! let policy = CleanPolicy { min_valid_bases: 4, min_valid_ratio: 0.8 };
//! assert_eq!(clean("acgt-acgt", &policy)?, "ACGTACGT");
//! assert!(clean("AT", &policy).is_err());
//! assert_eq!(strip_invalid("AT"), "AT");
//!
//! assert_eq!(encode("GATC", 6), vec![3, 0, 1, 2, 0, 0]);
//! # Ok::<(), dnaclass::DnaclassError>(())
//! ```

use crate::config::CleanPolicy;
use crate::error::{DnaclassError, Result};

/// Padding code for [`encode`]
pub const PAD_CODE: u8 = 0;

/// Uppercase and drop every character outside A/T/C/G
pub fn strip_invalid(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| matches!(c, 'A' | 'T' | 'C' | 'G'))
        .collect()
}

/// Strictly clean a raw sequence
///
/// Uppercases and strips non-ACGT characters, then checks the result.
/// Applying `clean` to its own output returns the same string.
///
/// # Errors
///
/// Returns [`DnaclassError::InvalidSequence`] if fewer than
/// `policy.min_valid_bases` bases remain, or if the ratio of valid bases to
/// raw characters is below `policy.min_valid_ratio`. Empty input has ratio
/// 0.0.
pub fn clean(sequence: &str, policy: &CleanPolicy) -> Result<String> {
    let raw_length = sequence.chars().count();
    let cleaned = strip_invalid(sequence);
    let valid_bases = cleaned.len();

    if valid_bases < policy.min_valid_bases {
        return Err(DnaclassError::InvalidSequence {
            valid_bases,
            raw_length,
            reason: format!("fewer than {} valid bases", policy.min_valid_bases),
        });
    }

    let ratio = valid_ratio(valid_bases, raw_length);
    if ratio < policy.min_valid_ratio {
        return Err(DnaclassError::InvalidSequence {
            valid_bases,
            raw_length,
            reason: format!(
                "valid base ratio {:.3} below {}",
                ratio, policy.min_valid_ratio
            ),
        });
    }

    Ok(cleaned)
}

fn valid_ratio(valid_bases: usize, raw_length: usize) -> f64 {
    if raw_length == 0 {
        0.0
    } else {
        valid_bases as f64 / raw_length as f64
    }
}

/// Integer code of a cleaned base
#[inline]
fn base_code(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(0),
        b'T' => Some(1),
        b'C' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Encode a cleaned sequence as exactly `max_length` integer codes
///
/// Longer sequences are truncated; shorter ones are right-padded with
/// [`PAD_CODE`]. Characters without a code (none, for cleaned input) also
/// map to the pad code.
pub fn encode(cleaned: &str, max_length: usize) -> Vec<u8> {
    let mut codes: Vec<u8> = cleaned
        .bytes()
        .take(max_length)
        .map(|b| base_code(b).unwrap_or(PAD_CODE))
        .collect();
    codes.resize(max_length, PAD_CODE);
    codes
}

/// One-hot encode a cleaned sequence as exactly `max_length` rows
///
/// Padding positions (and unmapped characters) are all-zero rows.
pub fn one_hot_encode(cleaned: &str, max_length: usize) -> Vec<[u8; 4]> {
    let mut rows: Vec<[u8; 4]> = cleaned
        .bytes()
        .take(max_length)
        .map(|b| {
            let mut row = [0u8; 4];
            if let Some(code) = base_code(b) {
                row[code as usize] = 1;
            }
            row
        })
        .collect();
    rows.resize(max_length, [0; 4]);
    rows
}
