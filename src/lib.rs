//! shopfloor-classifiers: classical-ML classifier wrappers for shop-floor
//! process data.
//!
//! This crate wraps an external logistic regression backend (linfa) behind
//! a small, configurable learner: hold a feature matrix and label vector,
//! call [`learner::LogisticLearner::run`], and read back the fitted
//! coefficients and held-out accuracy/ROC-AUC. There is no numerical
//! optimizer in here; the value is the parameter plumbing, the randomized
//! train/test split, and the metric reporting around the backend.
//!
//! The design favors small, testable modules: configuration, data
//! partitioning, metrics, CSV ingestion, and the model wrappers each live
//! on their own.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod learner;
pub mod models;
pub mod stats;

pub use config::LogisticConfig;
pub use learner::LogisticLearner;
