use crate::config::LogisticConfig;
use crate::models::classifier_trait::Classifier;
use crate::models::logistic::LogisticClassifier;

/// Build a boxed classifier from a `LogisticConfig`.
/// Additional model families plug in here without touching the learner.
pub fn build_classifier(config: LogisticConfig) -> Box<dyn Classifier> {
    Box::new(LogisticClassifier::new(config))
}
