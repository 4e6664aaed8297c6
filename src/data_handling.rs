//! Dataset partitioning helpers.
//!
//! The splitter shuffles row indices with the thread-local RNG on every
//! call. The configured random seed is a classifier concern and is never
//! handed to the splitter, so the test-set composition changes between
//! runs even when a seed is set.

use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::error::SplitError;

/// Fraction of rows carved off for testing when the caller leaves the
/// test size unset.
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// A randomized train/test partition of a dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<usize>,
    pub y_test: Array1<usize>,
}

impl TrainTestSplit {
    pub fn n_train(&self) -> usize {
        self.x_train.nrows()
    }

    pub fn n_test(&self) -> usize {
        self.x_test.nrows()
    }
}

/// Partition `(x, y)` into random train and test sets.
///
/// The test partition receives `ceil(n_samples * test_fraction)` rows; the
/// training partition receives the rest. Row order within each partition
/// follows the shuffle.
///
/// # Arguments
///
/// * `x` - Feature matrix, one row per sample.
/// * `y` - Label vector, one entry per sample.
/// * `test_fraction` - Fraction of rows assigned to the test partition,
///   inside (0, 1).
///
/// # Returns
///
/// A `TrainTestSplit`, or an error when the inputs disagree in length, the
/// fraction is out of range, or either partition would be empty.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<usize>,
    test_fraction: f64,
) -> Result<TrainTestSplit, SplitError> {
    let n_samples = x.nrows();
    if n_samples != y.len() {
        return Err(SplitError::RowMismatch {
            rows: n_samples,
            labels: y.len(),
        });
    }
    if !test_fraction.is_finite() || test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(SplitError::BadFraction(test_fraction.to_string()));
    }

    let n_test = ((n_samples as f64) * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(SplitError::EmptyPartition);
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut thread_rng());

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}
