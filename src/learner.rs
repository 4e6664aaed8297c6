//! The logistic regression learner: configuration and data plumbing
//! around the classifier backend, plus held-out evaluation.

use ndarray::{Array1, Array2};

use crate::config::LogisticConfig;
use crate::data_handling::{train_test_split, DEFAULT_TEST_FRACTION};
use crate::models::classifier_trait::Classifier;
use crate::models::factory;
use crate::stats::{accuracy_score, roc_auc_score};

/// Wrapper around a configurable logistic regression classifier.
///
/// Holds the hyperparameters and data references, drives the external
/// split/fit/predict/score pipeline, and caches the resulting artifacts.
/// Every output accessor returns `None` until [`LogisticLearner::run`]
/// succeeds; no failure of any kind escapes `run` itself.
///
/// ```no_run
/// use ndarray::{Array1, Array2};
/// use shopfloor_classifiers::config::LogisticConfig;
/// use shopfloor_classifiers::learner::LogisticLearner;
///
/// let x: Array2<f64> = Array2::zeros((60, 4));
/// let y: Array1<usize> = Array1::zeros(60);
/// let mut learner = LogisticLearner::new(LogisticConfig::default());
/// learner.set_attributes(Some(x));
/// learner.set_labels(Some(y));
/// learner.run();
/// if let Some(acc) = learner.accuracy() {
///     println!("held-out accuracy: {:.3}", acc);
/// }
/// ```
pub struct LogisticLearner {
    config: LogisticConfig,
    attributes: Option<Array2<f64>>,
    labels: Option<Array1<usize>>,
    /// `None` means the splitter picks its own default fraction.
    test_size: Option<f64>,

    model: Option<Box<dyn Classifier>>,
    classes: Option<Array1<usize>>,
    coefficients: Option<Array2<f64>>,
    intercepts: Option<Array1<f64>>,
    n_iter: Option<Array1<u64>>,
    accuracy: Option<f64>,
    roc_auc: Option<f64>,
}

impl LogisticLearner {
    /// Create a learner with no data attached. Attach a feature matrix and
    /// label vector with [`set_attributes`](Self::set_attributes) and
    /// [`set_labels`](Self::set_labels) before calling `run`.
    pub fn new(config: LogisticConfig) -> Self {
        LogisticLearner {
            config,
            attributes: None,
            labels: None,
            test_size: None,
            model: None,
            classes: None,
            coefficients: None,
            intercepts: None,
            n_iter: None,
            accuracy: None,
            roc_auc: None,
        }
    }

    /// Create a learner with data already attached.
    pub fn with_data(config: LogisticConfig, x: Array2<f64>, y: Array1<usize>) -> Self {
        let mut learner = Self::new(config);
        learner.attributes = Some(x);
        learner.labels = Some(y);
        learner
    }

    // Modifier methods. All of them replace the reference without looking
    // at it; validation happens inside `run`.

    /// Replace the feature matrix reference.
    pub fn set_attributes(&mut self, new_attributes: Option<Array2<f64>>) {
        self.attributes = new_attributes;
    }

    /// Replace the label vector reference.
    pub fn set_labels(&mut self, new_labels: Option<Array1<usize>>) {
        self.labels = new_labels;
    }

    /// Replace the test fraction. `None` lets the splitter pick its
    /// default.
    pub fn set_test_size(&mut self, new_test_size: Option<f64>) {
        self.test_size = new_test_size;
    }

    // Accessor methods.

    pub fn config(&self) -> &LogisticConfig {
        &self.config
    }

    pub fn attributes(&self) -> Option<&Array2<f64>> {
        self.attributes.as_ref()
    }

    pub fn labels(&self) -> Option<&Array1<usize>> {
        self.labels.as_ref()
    }

    pub fn test_size(&self) -> Option<f64> {
        self.test_size
    }

    /// The fitted classifier. `None` until `run` succeeds, and reset to
    /// `None` when a fit fails.
    pub fn model(&self) -> Option<&dyn Classifier> {
        self.model.as_deref()
    }

    /// Sorted list of classes observed during the last successful run.
    pub fn classes(&self) -> Option<&Array1<usize>> {
        self.classes.as_ref()
    }

    /// Learned coefficients: one row for a binary problem, one row per
    /// class otherwise.
    pub fn coefficients(&self) -> Option<&Array2<f64>> {
        self.coefficients.as_ref()
    }

    /// Learned intercept(s), aligned with the coefficient rows.
    pub fn intercepts(&self) -> Option<&Array1<f64>> {
        self.intercepts.as_ref()
    }

    /// Per-class solver iteration counts, when the backend reports them.
    pub fn n_iter(&self) -> Option<&Array1<u64>> {
        self.n_iter.as_ref()
    }

    /// Held-out classification accuracy of the last successful run.
    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Held-out ROC-AUC of the last successful run. Stays `None` when the
    /// metric is undefined for the predictions at hand.
    pub fn roc_auc(&self) -> Option<f64> {
        self.roc_auc
    }

    /// Fit the classifier on a random training partition and score it on
    /// the held-out rows.
    ///
    /// Preconditions are checked first; any failure logs a diagnostic and
    /// returns with the outputs untouched. A failure during fitting logs
    /// the underlying error, resets the model handle and every output to
    /// `None`, and returns normally; nothing is raised to the caller.
    pub fn run(&mut self) {
        if !self.check_inputs() {
            return;
        }
        // check_inputs verified both references are populated
        let Some(x) = self.attributes.as_ref() else {
            return;
        };
        let Some(y) = self.labels.as_ref() else {
            return;
        };

        let mut model = factory::build_classifier(self.config.clone());

        let fraction = self.test_size.unwrap_or(DEFAULT_TEST_FRACTION);
        let split = match train_test_split(x, y, fraction) {
            Ok(split) => split,
            Err(e) => {
                log::error!("Could not partition the dataset: {}", e);
                return;
            }
        };

        if let Err(e) = model.fit(&split.x_train, &split.y_train) {
            log::error!(
                "An error occurred while training the logistic regression model. \
                 Check your inputs and try again."
            );
            log::error!("Here is the error message: {}", e);
            self.reset_outputs();
            return;
        }

        let (predictions, probabilities) = match (
            model.predict(&split.x_test),
            model.predict_proba(&split.x_test),
        ) {
            (Ok(labels), Ok(proba)) => (labels, proba),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Prediction on the test partition failed: {}", e);
                self.reset_outputs();
                return;
            }
        };

        self.classes = model.classes().cloned();
        self.coefficients = model.coefficients().cloned();
        self.intercepts = model.intercepts().cloned();
        self.n_iter = model.n_iter().cloned();

        // Probability of the second sorted class, the positive one for a
        // binary problem.
        let positive_scores = probabilities.column(1).to_owned();

        self.accuracy = match accuracy_score(&predictions, &split.y_test) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Accuracy is undefined for this split: {}", e);
                None
            }
        };

        // The predicted labels take the truth position here, with the
        // positive-class probabilities as scores, matching the wrapper
        // family's historical behavior.
        self.roc_auc = match roc_auc_score(&predictions, &positive_scores) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("ROC-AUC is undefined for these predictions: {}", e);
                None
            }
        };

        self.model = Some(model);
    }

    /// Verify the instance data is ready for the pipeline. Each failure
    /// logs one specific diagnostic and short-circuits.
    fn check_inputs(&self) -> bool {
        let Some(attributes) = self.attributes.as_ref() else {
            log::error!(
                "attributes is missing; call set_attributes(new_attributes) to fix this! \
                 new_attributes should be a populated feature matrix."
            );
            return false;
        };

        let Some(labels) = self.labels.as_ref() else {
            log::error!(
                "labels is missing; call set_labels(new_labels) to fix this! \
                 new_labels should be a populated label vector."
            );
            return false;
        };

        if attributes.nrows() != labels.len() {
            log::error!(
                "attributes and labels don't have the same number of rows ({} vs {}). \
                 Make sure the number of samples in each dataset matches!",
                attributes.nrows(),
                labels.len()
            );
            return false;
        }

        if let Some(fraction) = self.test_size {
            if !fraction.is_finite() {
                log::error!(
                    "test_size must be unset or a finite number; \
                     call set_test_size(new_test_size) to fix this!"
                );
                return false;
            }
        }

        true
    }

    fn reset_outputs(&mut self) {
        self.model = None;
        self.classes = None;
        self.coefficients = None;
        self.intercepts = None;
        self.n_iter = None;
        self.accuracy = None;
        self.roc_auc = None;
    }
}
