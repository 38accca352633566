//! Class balancing and holdout splitting
//!
//! Both operations shuffle with a caller-supplied RNG (Fisher-Yates via
//! [`SliceRandom`]), so a seeded `StdRng` makes them reproducible.
//!
//! # Examples
//!
//! ```
//! use dnaclass::dataset::split_holdout;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let split = split_holdout(10, 0.8, &mut rng);
//! assert_eq!(split.train.len(), 8);
//! assert_eq!(split.test.len(), 2);
//! ```

use crate::types::Sample;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Shuffled partition of `0..n` into train and test indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldoutSplit {
    /// Indices of training items, in shuffled order
    pub train: Vec<usize>,
    /// Indices of test items, in shuffled order
    pub test: Vec<usize>,
}

/// Downsample every class to the smallest class count
///
/// Counts items per class (over classes that occur at all), shuffles, then
/// keeps items in shuffled order until each class holds the minimum count.
/// The result has exactly `min_count × classes_present` items; which items
/// of the larger classes survive depends only on the shuffle.
pub fn balance_by<T, R, F>(mut items: Vec<T>, class_of: F, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> usize,
{
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for item in &items {
        *counts.entry(class_of(item)).or_insert(0) += 1;
    }
    let Some(&min_count) = counts.values().min() else {
        return items;
    };

    items.shuffle(rng);

    let mut kept: BTreeMap<usize, usize> = BTreeMap::new();
    let balanced: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let taken = kept.entry(class_of(item)).or_insert(0);
            if *taken < min_count {
                *taken += 1;
                true
            } else {
                false
            }
        })
        .collect();

    tracing::debug!(
        classes = counts.len(),
        per_class = min_count,
        kept = balanced.len(),
        "balanced classes"
    );

    balanced
}

/// Downsample samples so every label occurs equally often
///
/// # Examples
///
/// ```
/// use dnaclass::dataset::balance_classes;
/// use dnaclass::labels::LabelScheme;
/// use dnaclass::Sample;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let scheme = LabelScheme::DiseaseRisk;
/// let samples: Vec<Sample> = [(0, 10), (1, 3), (2, 7)]
///     .iter()
///     .flat_map(|&(class, n)| std::iter::repeat(class).take(n))
///     .enumerate()
///     .map(|(i, class)| {
///         Sample::new(format!("s{i}"), i, "ACGT".into(), scheme.label(class).unwrap())
///     })
///     .collect();
///
/// let balanced = balance_classes(samples, &mut StdRng::seed_from_u64(1));
/// assert_eq!(balanced.len(), 9);
/// ```
pub fn balance_classes<R: Rng + ?Sized>(samples: Vec<Sample>, rng: &mut R) -> Vec<Sample> {
    balance_by(samples, |s| s.label.index(), rng)
}

/// Shuffle `0..n` and split off the first `round(train_ratio × n)` as train
///
/// The ratio is clamped to `[0, 1]`.
pub fn split_holdout<R: Rng + ?Sized>(n: usize, train_ratio: f64, rng: &mut R) -> HoldoutSplit {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let split_at = ((n as f64) * train_ratio.clamp(0.0, 1.0)).round() as usize;
    let split_at = split_at.min(n);
    let test = indices.split_off(split_at);

    tracing::debug!(train = indices.len(), test = test.len(), "holdout split");

    HoldoutSplit {
        train: indices,
        test,
    }
}
