use ndarray::{Array1, Array2};

use crate::error::ModelError;

/// Capability interface for the classifiers driven by the learner.
///
/// The learner never looks past this trait: construction happens in the
/// factory, everything else goes through fit/predict/read-back, so a
/// different backend can be substituted without touching the wrapper.
pub trait Classifier: Send {
    /// Fit the model on a feature matrix and its label vector.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<(), ModelError>;

    /// Predict class labels for each row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError>;

    /// Predict per-class probabilities, one column per class in sorted
    /// class order. Rows sum to 1.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError>;

    /// Sorted list of classes observed during the last successful fit.
    fn classes(&self) -> Option<&Array1<usize>>;

    /// Learned coefficients: one row for a binary fit, one row per class
    /// for one-vs-rest.
    fn coefficients(&self) -> Option<&Array2<f64>>;

    /// Learned intercept(s), aligned with the coefficient rows.
    fn intercepts(&self) -> Option<&Array1<f64>>;

    /// Per-class solver iteration counts, when the backend reports them.
    fn n_iter(&self) -> Option<&Array1<u64>>;

    /// Human readable name for the model.
    fn name(&self) -> &str {
        "classifier"
    }
}
