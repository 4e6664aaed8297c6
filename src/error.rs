use std::error::Error;
use std::fmt;

/// Failures raised by a classifier backend.
#[derive(Debug)]
pub enum ModelError {
    /// The configuration asks for something this backend cannot honor.
    Unsupported(String),
    /// Predict/read-back called before a successful fit.
    NotFitted,
    /// Labels do not form a trainable set (e.g. a single observed class).
    DegenerateLabels(String),
    /// Feature/label dimensions disagree.
    ShapeMismatch { rows: usize, labels: usize },
    /// Prediction input has a different feature count than the fit.
    FeatureMismatch { expected: usize, found: usize },
    /// The underlying solver failed.
    Backend(linfa_logistic::error::Error),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::Unsupported(what) => write!(f, "Unsupported configuration: {}", what),
            ModelError::NotFitted => write!(f, "Model has not been fitted yet"),
            ModelError::DegenerateLabels(what) => write!(f, "Unusable label vector: {}", what),
            ModelError::ShapeMismatch { rows, labels } => write!(
                f,
                "Feature matrix has {} rows but the label vector has {} entries",
                rows, labels
            ),
            ModelError::FeatureMismatch { expected, found } => write!(
                f,
                "Model was fitted on {} features but the input has {}",
                expected, found
            ),
            ModelError::Backend(e) => write!(f, "Solver failure: {}", e),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

impl From<linfa_logistic::error::Error> for ModelError {
    fn from(e: linfa_logistic::error::Error) -> Self {
        ModelError::Backend(e)
    }
}

/// Failures raised by the train/test splitter.
#[derive(Debug, PartialEq, Eq)]
pub enum SplitError {
    RowMismatch { rows: usize, labels: usize },
    /// Fraction outside the open interval (0, 1).
    BadFraction(String),
    /// One of the partitions would receive zero rows.
    EmptyPartition,
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SplitError::RowMismatch { rows, labels } => write!(
                f,
                "Feature matrix has {} rows but the label vector has {} entries",
                rows, labels
            ),
            SplitError::BadFraction(v) => {
                write!(f, "Test fraction {} is not inside (0, 1)", v)
            }
            SplitError::EmptyPartition => {
                write!(f, "Split would leave an empty train or test partition")
            }
        }
    }
}

impl Error for SplitError {}

/// Failures raised by the metric functions.
#[derive(Debug, PartialEq, Eq)]
pub enum MetricsError {
    LengthMismatch,
    Empty,
    /// ROC-AUC needs exactly two distinct truth values, both present.
    NotBinary(usize),
    /// Number of NaN values found among the scores.
    NaNFound(usize),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricsError::LengthMismatch => {
                write!(f, "Prediction and truth arrays must have equal length")
            }
            MetricsError::Empty => write!(f, "Metric called on empty arrays"),
            MetricsError::NotBinary(n) => write!(
                f,
                "ROC-AUC requires exactly 2 distinct truth values, found {}",
                n
            ),
            MetricsError::NaNFound(count) => {
                write!(f, "Found {} NaN values in scores array", count)
            }
        }
    }
}

impl Error for MetricsError {}
