use ndarray::Array1;

use crate::error::MetricsError;

/// Fraction of entries where prediction and truth agree exactly.
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels.
/// * `y_true` - Reference class labels of the same length.
///
/// # Returns
///
/// The accuracy in [0, 1], or an error for empty or mismatched inputs.
pub fn accuracy_score(
    y_pred: &Array1<usize>,
    y_true: &Array1<usize>,
) -> Result<f64, MetricsError> {
    if y_pred.len() != y_true.len() {
        return Err(MetricsError::LengthMismatch);
    }
    if y_pred.is_empty() {
        return Err(MetricsError::Empty);
    }

    let matches = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    Ok(matches as f64 / y_pred.len() as f64)
}

/// Area under the ROC curve via the rank-based (Mann-Whitney) estimator.
///
/// The larger of the two distinct truth values is treated as the positive
/// class. Tied scores receive their average rank, so constant scores give
/// an AUC of 0.5.
///
/// # Arguments
///
/// * `y_true` - Binary reference labels; exactly two distinct values must
///   be present.
/// * `y_score` - Scores to rank by, higher meaning more positive.
///
/// # Returns
///
/// The AUC in [0, 1], or an error for mismatched lengths, non-binary
/// truth, or NaN scores.
pub fn roc_auc_score(
    y_true: &Array1<usize>,
    y_score: &Array1<f64>,
) -> Result<f64, MetricsError> {
    if y_true.len() != y_score.len() {
        return Err(MetricsError::LengthMismatch);
    }
    if y_true.is_empty() {
        return Err(MetricsError::Empty);
    }

    let nan_count = y_score.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        return Err(MetricsError::NaNFound(nan_count));
    }

    let mut classes: Vec<usize> = y_true.to_vec();
    classes.sort_unstable();
    classes.dedup();
    if classes.len() != 2 {
        return Err(MetricsError::NotBinary(classes.len()));
    }
    let positive = classes[1];

    // Rank scores ascending, averaging ranks across ties.
    let mut sorted_indices: Vec<usize> = (0..y_score.len()).collect();
    sorted_indices.sort_unstable_by(|&a, &b| {
        y_score[a]
            .partial_cmp(&y_score[b])
            .expect("NaN scores were rejected above")
    });

    let mut ranks = vec![0.0f64; y_score.len()];
    let mut i = 0;
    while i < sorted_indices.len() {
        let mut j = i;
        while j + 1 < sorted_indices.len()
            && y_score[sorted_indices[j + 1]] == y_score[sorted_indices[i]]
        {
            j += 1;
        }
        // 1-based ranks i+1 ..= j+1 share the same score
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &idx in &sorted_indices[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let n_pos = y_true.iter().filter(|&&v| v == positive).count();
    let n_neg = y_true.len() - n_pos;

    let rank_sum_pos: f64 = y_true
        .iter()
        .zip(ranks.iter())
        .filter(|(&t, _)| t == positive)
        .map(|(_, &r)| r)
        .sum();

    let auc = (rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0)
        / (n_pos as f64 * n_neg as f64);

    Ok(auc)
}
