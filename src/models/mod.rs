pub mod classifier_trait;
pub mod factory;
pub mod logistic;
