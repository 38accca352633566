//! Column-wise feature scaling
//!
//! A [`FeatureScaler`] is fitted once per preparation pass and then applied
//! unchanged to every vector of that pass, and to held-out data later. It is
//! serializable so evaluation code can reload the exact statistics instead
//! of recomputing them on test data.
//!
//! # Examples
//!
//! ```
//! use dnaclass::config::Normalization;
//! use dnaclass::dataset::normalize;
//!
//! let vectors = vec![vec![1.0, 5.0], vec![3.0, 5.0]];
//! let (scaled, scaler) = normalize(&vectors, Normalization::ZScore)?;
//!
//! assert_eq!(scaler.offsets(), &[2.0, 5.0]);
//! assert_eq!(scaled[0], vec![-1.0, 0.0]); // constant column → 0
//! assert_eq!(scaled[1], vec![1.0, 0.0]);
//! # Ok::<(), dnaclass::DnaclassError>(())
//! ```

use crate::config::Normalization;
use crate::error::{DnaclassError, Result};
use serde::{Deserialize, Serialize};

/// Fitted per-column statistics
///
/// For z-score, `offsets` are means and `scales` population standard
/// deviations. For min-max, `offsets` are minimums and `scales` ranges.
/// Zero scales are stored as 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    method: Normalization,
    offsets: Vec<f64>,
    scales: Vec<f64>,
}

impl FeatureScaler {
    /// Fit statistics over a set of equal-length vectors
    ///
    /// An empty set yields a zero-width scaler.
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::FeatureDimension`] if vector lengths differ.
    pub fn fit(vectors: &[Vec<f64>], method: Normalization) -> Result<Self> {
        let width = vectors.first().map_or(0, Vec::len);
        check_width(vectors, width)?;

        let (offsets, scales) = if vectors.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            match method {
                Normalization::ZScore => z_score_stats(vectors, width),
                Normalization::MinMax => min_max_stats(vectors, width),
            }
        };

        tracing::debug!(?method, width, samples = vectors.len(), "fitted feature scaler");

        Ok(Self {
            method,
            offsets,
            scales,
        })
    }

    /// Pass-through scaler of a given width (offset 0, scale 1)
    ///
    /// Stands in for fitted statistics when there is nothing to fit on.
    pub fn identity(width: usize, method: Normalization) -> Self {
        Self {
            method,
            offsets: vec![0.0; width],
            scales: vec![1.0; width],
        }
    }

    /// Scaling method
    pub fn method(&self) -> Normalization {
        self.method
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.offsets.len()
    }

    /// Means (z-score) or minimums (min-max)
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Standard deviations (z-score) or ranges (min-max)
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Scale one vector
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::FeatureDimension`] if the vector width does
    /// not match the fitted width.
    pub fn transform_one(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if vector.len() != self.width() {
            return Err(DnaclassError::FeatureDimension {
                row: 0,
                expected: self.width(),
                actual: vector.len(),
            });
        }
        Ok(self.scale(vector))
    }

    /// Scale a set of vectors with the fitted statistics
    ///
    /// # Errors
    ///
    /// Returns [`DnaclassError::FeatureDimension`] for the first vector whose
    /// width does not match.
    pub fn transform(&self, vectors: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        check_width(vectors, self.width())?;
        Ok(vectors.iter().map(|v| self.scale(v)).collect())
    }

    fn scale(&self, vector: &[f64]) -> Vec<f64> {
        vector
            .iter()
            .zip(&self.offsets)
            .zip(&self.scales)
            .map(|((x, offset), scale)| (x - offset) / scale)
            .collect()
    }
}

/// Fit a scaler and apply it to the same vectors
pub fn normalize(
    vectors: &[Vec<f64>],
    method: Normalization,
) -> Result<(Vec<Vec<f64>>, FeatureScaler)> {
    let scaler = FeatureScaler::fit(vectors, method)?;
    let scaled = scaler.transform(vectors)?;
    Ok((scaled, scaler))
}

fn check_width(vectors: &[Vec<f64>], expected: usize) -> Result<()> {
    match vectors.iter().position(|v| v.len() != expected) {
        Some(row) => Err(DnaclassError::FeatureDimension {
            row,
            expected,
            actual: vectors[row].len(),
        }),
        None => Ok(()),
    }
}

fn non_zero(scale: f64) -> f64 {
    if scale == 0.0 || !scale.is_finite() {
        1.0
    } else {
        scale
    }
}

fn z_score_stats(vectors: &[Vec<f64>], width: usize) -> (Vec<f64>, Vec<f64>) {
    let n = vectors.len() as f64;
    let mut means = vec![0.0; width];
    for v in vectors {
        for (mean, x) in means.iter_mut().zip(v) {
            *mean += x;
        }
    }
    for mean in &mut means {
        *mean /= n;
    }

    // Population variance (divide by N)
    let mut variances = vec![0.0; width];
    for v in vectors {
        for ((var, x), mean) in variances.iter_mut().zip(v).zip(&means) {
            *var += (x - mean).powi(2);
        }
    }
    let mut stds: Vec<f64> = variances.into_iter().map(|var| non_zero((var / n).sqrt())).collect();

    // Constant columns: exact offset, so rounding in the mean cannot leak through
    for col in 0..width {
        let first = vectors[0][col];
        if vectors.iter().all(|v| v[col] == first) {
            means[col] = first;
            stds[col] = 1.0;
        }
    }

    (means, stds)
}

fn min_max_stats(vectors: &[Vec<f64>], width: usize) -> (Vec<f64>, Vec<f64>) {
    let mut mins = vec![f64::INFINITY; width];
    let mut maxs = vec![f64::NEG_INFINITY; width];
    for v in vectors {
        for ((min, max), &x) in mins.iter_mut().zip(maxs.iter_mut()).zip(v) {
            *min = min.min(x);
            *max = max.max(x);
        }
    }
    let ranges = mins.iter().zip(&maxs).map(|(min, max)| non_zero(max - min)).collect();

    (mins, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_population_std() {
        // mean 5, population std 2
        let vectors: Vec<Vec<f64>> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .map(|&x| vec![x])
            .collect();
        let scaler = FeatureScaler::fit(&vectors, Normalization::ZScore).unwrap();
        assert_eq!(scaler.offsets(), &[5.0]);
        assert_eq!(scaler.scales(), &[2.0]);
    }

    #[test]
    fn test_constant_column_is_zero() {
        let vectors = vec![vec![3.0, 1.0], vec![3.0, 2.0], vec![3.0, 3.0]];
        let (scaled, scaler) = normalize(&vectors, Normalization::ZScore).unwrap();
        assert_eq!(scaler.scales()[0], 1.0);
        assert!(scaled.iter().all(|v| v[0] == 0.0));
    }

    #[test]
    fn test_min_max() {
        let vectors = vec![vec![0.0, 7.0], vec![10.0, 7.0], vec![5.0, 7.0]];
        let (scaled, _) = normalize(&vectors, Normalization::MinMax).unwrap();
        assert_eq!(scaled[0], vec![0.0, 0.0]);
        assert_eq!(scaled[1], vec![1.0, 0.0]);
        assert_eq!(scaled[2], vec![0.5, 0.0]);
    }

    #[test]
    fn test_ragged_input() {
        let vectors = vec![vec![1.0, 2.0], vec![1.0]];
        let result = FeatureScaler::fit(&vectors, Normalization::ZScore);
        assert!(matches!(
            result,
            Err(DnaclassError::FeatureDimension { row: 1, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_empty_input() {
        let (scaled, scaler) = normalize(&[], Normalization::ZScore).unwrap();
        assert!(scaled.is_empty());
        assert_eq!(scaler.width(), 0);
    }

    #[test]
    fn test_identity_passes_values_through() {
        let scaler = FeatureScaler::identity(2, Normalization::ZScore);
        assert_eq!(scaler.width(), 2);
        assert_eq!(scaler.transform_one(&[3.5, -1.0]).unwrap(), vec![3.5, -1.0]);
    }

    #[test]
    fn test_reuse_on_held_out_data() {
        let train = vec![vec![0.0], vec![2.0]];
        let scaler = FeatureScaler::fit(&train, Normalization::ZScore).unwrap();
        // mean 1, std 1
        assert_eq!(scaler.transform_one(&[3.0]).unwrap(), vec![2.0]);
        assert!(scaler.transform_one(&[3.0, 1.0]).is_err());
    }

    #[test]
    fn test_scaler_json_roundtrip() {
        let scaler = FeatureScaler::fit(&[vec![1.0], vec![3.0]], Normalization::MinMax).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        let back: FeatureScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scaler);
    }

    #[test]
    fn test_scaler_json_is_bit_exact() {
        let vectors: Vec<Vec<f64>> = [1.9232196723355075, 1.8112781244591327, 0.1, 1.0 / 3.0]
            .iter()
            .map(|&x| vec![x, x * 7.3])
            .collect();
        let scaler = FeatureScaler::fit(&vectors, Normalization::ZScore).unwrap();
        let back: FeatureScaler =
            serde_json::from_str(&serde_json::to_string_pretty(&scaler).unwrap()).unwrap();

        for (a, b) in back.offsets().iter().zip(scaler.offsets()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        for (a, b) in back.scales().iter().zip(scaler.scales()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a constant column always normalizes to 0
            #[test]
            fn prop_constant_column(c in -1e6f64..1e6, rows in 1usize..50) {
                let vectors = vec![vec![c]; rows];
                let (scaled, _) = normalize(&vectors, Normalization::ZScore).unwrap();
                prop_assert!(scaled.iter().all(|v| v[0] == 0.0));
            }
        }
    }
}
