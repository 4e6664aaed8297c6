use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::config::{ClassWeight, LogisticConfig, MultiClass, Penalty, Solver};
use crate::error::ModelError;
use crate::models::classifier_trait::Classifier;

enum FittedState {
    /// A single fit on the raw labels; probability output is that of the
    /// larger class.
    Binary(FittedLogisticRegression<f64, usize>),
    /// One binary fit per class against the rest, in sorted class order.
    OneVsRest(Vec<FittedLogisticRegression<f64, usize>>),
}

/// Logistic regression backed by linfa's l-bfgs solver.
///
/// The solver is deterministic, so the configured `random_state` is
/// carried for interface parity and does not influence the fit.
pub struct LogisticClassifier {
    state: Option<FittedState>,
    config: LogisticConfig,
    classes: Option<Array1<usize>>,
    coefficients: Option<Array2<f64>>,
    intercepts: Option<Array1<f64>>,
}

impl LogisticClassifier {
    pub fn new(config: LogisticConfig) -> Self {
        LogisticClassifier {
            state: None,
            config,
            classes: None,
            coefficients: None,
            intercepts: None,
        }
    }

    /// Reject hyperparameter combinations the l-bfgs backend cannot honor.
    fn validate_config(&self) -> Result<(), ModelError> {
        match self.config.penalty {
            Penalty::L2 | Penalty::None => {}
            Penalty::L1 => {
                return Err(ModelError::Unsupported(
                    "penalty=l1 is not supported by the lbfgs backend".to_string(),
                ))
            }
            Penalty::ElasticNet => {
                return Err(ModelError::Unsupported(
                    "penalty=elasticnet is not supported by the lbfgs backend".to_string(),
                ))
            }
        }
        if self.config.solver != Solver::Lbfgs {
            return Err(ModelError::Unsupported(format!(
                "solver {:?} is not available; only lbfgs is",
                self.config.solver
            )));
        }
        if self.config.dual {
            return Err(ModelError::Unsupported(
                "the dual formulation is not supported".to_string(),
            ));
        }
        if self.config.class_weight == ClassWeight::Balanced {
            return Err(ModelError::Unsupported(
                "class_weight=balanced is not supported by the lbfgs backend".to_string(),
            ));
        }
        if self.config.multi_class == MultiClass::Multinomial {
            return Err(ModelError::Unsupported(
                "the multinomial strategy is not supported; use ovr".to_string(),
            ));
        }
        Ok(())
    }

    fn base_params(&self) -> LogisticRegression<f64> {
        LogisticRegression::new()
            .alpha(self.config.alpha())
            .with_intercept(self.config.fit_intercept)
            .gradient_tolerance(self.config.tol)
            .max_iterations(self.config.max_iter)
    }

    /// Starting point for a warm-started fit: the previously learned
    /// coefficient row, with the intercept appended when one is fitted.
    fn warm_params(&self, row: usize, n_features: usize) -> Option<Array1<f64>> {
        if !self.config.warm_start {
            return None;
        }
        let coef = self.coefficients.as_ref()?;
        let icept = self.intercepts.as_ref()?;
        if coef.ncols() != n_features || row >= coef.nrows() {
            return None;
        }
        let mut init: Vec<f64> = coef.row(row).to_vec();
        if self.config.fit_intercept {
            init.push(icept[row]);
        }
        Some(Array1::from_vec(init))
    }

    /// True when the previous fit saw the same class set, so its solution
    /// rows line up with the new one-vs-rest (or binary) fits.
    fn warm_classes_match(&self, classes: &[usize]) -> bool {
        match self.classes.as_ref() {
            Some(prev) => prev.as_slice().map_or(false, |p| p == classes),
            None => false,
        }
    }

    fn fit_binary(
        &self,
        x: &Array2<f64>,
        y: &Array1<usize>,
        warm: Option<Array1<f64>>,
    ) -> Result<FittedLogisticRegression<f64, usize>, ModelError> {
        let mut params = self.base_params();
        if let Some(init) = warm {
            log::debug!("warm start: seeding the solver with the previous solution");
            params = params.initial_params(init);
        }
        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        params.fit(&dataset).map_err(ModelError::from)
    }

    fn fit_one_vs_rest(
        &self,
        x: &Array2<f64>,
        y: &Array1<usize>,
        classes: &[usize],
        warm_ok: bool,
    ) -> Result<Vec<FittedLogisticRegression<f64, usize>>, ModelError> {
        let n_features = x.ncols();
        let fit_one = |(row, &class): (usize, &usize)| {
            // Rest maps to 0, the class of interest to 1, so the backend's
            // positive-class probability is the per-class score.
            let targets = y.mapv(|v| usize::from(v == class));
            let warm = if warm_ok {
                self.warm_params(row, n_features)
            } else {
                None
            };
            self.fit_binary(x, &targets, warm)
        };

        if self.config.n_jobs == Some(1) {
            classes.iter().enumerate().map(fit_one).collect()
        } else {
            classes.par_iter().enumerate().map(fit_one).collect()
        }
    }

    fn fitted_state(&self) -> Result<&FittedState, ModelError> {
        self.state.as_ref().ok_or(ModelError::NotFitted)
    }

    fn check_feature_count(&self, x: &Array2<f64>) -> Result<(), ModelError> {
        let expected = self
            .coefficients
            .as_ref()
            .ok_or(ModelError::NotFitted)?
            .ncols();
        if x.ncols() != expected {
            return Err(ModelError::FeatureMismatch {
                expected,
                found: x.ncols(),
            });
        }
        Ok(())
    }
}

impl Classifier for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<(), ModelError> {
        self.validate_config()?;

        if x.nrows() != y.len() {
            return Err(ModelError::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(ModelError::DegenerateLabels(
                "no samples to fit on".to_string(),
            ));
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(ModelError::DegenerateLabels(format!(
                "need at least 2 distinct classes, found {}",
                classes.len()
            )));
        }

        if self.config.verbose > 0 {
            log::info!(
                "fitting logistic regression on {} samples, {} features, {} classes",
                x.nrows(),
                x.ncols(),
                classes.len()
            );
        }

        let warm_ok = self.warm_classes_match(&classes);

        let (state, coefficients, intercepts) = if classes.len() == 2 {
            let warm = if warm_ok {
                self.warm_params(0, x.ncols())
            } else {
                None
            };
            let fitted = self.fit_binary(x, y, warm)?;
            let coef = fitted
                .params()
                .to_owned()
                .insert_axis(ndarray::Axis(0));
            let icept = Array1::from_vec(vec![fitted.intercept()]);
            (FittedState::Binary(fitted), coef, icept)
        } else {
            let fits = self.fit_one_vs_rest(x, y, &classes, warm_ok)?;
            let mut coef = Array2::zeros((classes.len(), x.ncols()));
            let mut icept = Array1::zeros(classes.len());
            for (row, fitted) in fits.iter().enumerate() {
                coef.row_mut(row).assign(fitted.params());
                icept[row] = fitted.intercept();
            }
            (FittedState::OneVsRest(fits), coef, icept)
        };

        self.state = Some(state);
        self.classes = Some(Array1::from_vec(classes));
        self.coefficients = Some(coefficients);
        self.intercepts = Some(intercepts);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError> {
        self.check_feature_count(x)?;
        match self.fitted_state()? {
            FittedState::Binary(fitted) => Ok(fitted.predict(x)),
            FittedState::OneVsRest(_) => {
                let proba = self.predict_proba(x)?;
                let classes = self.classes.as_ref().ok_or(ModelError::NotFitted)?;
                let preds = proba
                    .outer_iter()
                    .map(|row| {
                        let mut best = 0;
                        for (j, &p) in row.iter().enumerate() {
                            if p > row[best] {
                                best = j;
                            }
                        }
                        classes[best]
                    })
                    .collect::<Vec<usize>>();
                Ok(Array1::from_vec(preds))
            }
        }
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        self.check_feature_count(x)?;
        match self.fitted_state()? {
            FittedState::Binary(fitted) => {
                // The backend reports the probability of the larger class,
                // which sits in the second sorted-class column.
                let pos = fitted.predict_probabilities(x);
                let mut proba = Array2::zeros((x.nrows(), 2));
                proba.column_mut(0).assign(&pos.mapv(|p| 1.0 - p));
                proba.column_mut(1).assign(&pos);
                Ok(proba)
            }
            FittedState::OneVsRest(fits) => {
                let mut proba = Array2::zeros((x.nrows(), fits.len()));
                for (col, fitted) in fits.iter().enumerate() {
                    proba
                        .column_mut(col)
                        .assign(&fitted.predict_probabilities(x));
                }
                // Per-class sigmoid scores are not a distribution until
                // normalized row-wise.
                for mut row in proba.outer_iter_mut() {
                    let total: f64 = row.sum();
                    if total > 0.0 {
                        row.mapv_inplace(|v| v / total);
                    }
                }
                Ok(proba)
            }
        }
    }

    fn classes(&self) -> Option<&Array1<usize>> {
        self.classes.as_ref()
    }

    fn coefficients(&self) -> Option<&Array2<f64>> {
        self.coefficients.as_ref()
    }

    fn intercepts(&self) -> Option<&Array1<f64>> {
        self.intercepts.as_ref()
    }

    fn n_iter(&self) -> Option<&Array1<u64>> {
        // The l-bfgs backend does not report per-class iteration counts.
        None
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated clusters along the first feature.
    fn binary_data() -> (Array2<f64>, Array1<usize>) {
        let n = 30;
        let x = Array2::from_shape_fn((n, 2), |(r, c)| {
            let base = if r < n / 2 { -2.0 } else { 2.0 };
            base + 0.1 * ((r * 7 + c * 3) % 10) as f64
        });
        let y = Array1::from_shape_fn(n, |r| usize::from(r >= n / 2));
        (x, y)
    }

    /// Three clusters spread along both features.
    fn three_class_data() -> (Array2<f64>, Array1<usize>) {
        let n = 45;
        let x = Array2::from_shape_fn((n, 2), |(r, c)| {
            let group = r / 15;
            let center = match (group, c) {
                (0, 0) => -4.0,
                (0, 1) => 0.0,
                (1, 0) => 4.0,
                (1, 1) => 0.0,
                (2, 0) => 0.0,
                _ => 5.0,
            };
            center + 0.1 * ((r * 5 + c) % 7) as f64
        });
        let y = Array1::from_shape_fn(n, |r| r / 15);
        (x, y)
    }

    #[test]
    fn binary_fit_learns_separable_data() {
        let (x, y) = binary_data();
        let mut model = LogisticClassifier::new(LogisticConfig::default());
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&x).unwrap();
        let correct = preds.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);

        assert_eq!(model.classes().unwrap().to_vec(), vec![0, 1]);
        assert_eq!(model.coefficients().unwrap().dim(), (1, 2));
        assert_eq!(model.intercepts().unwrap().len(), 1);
        assert!(model.n_iter().is_none());
    }

    #[test]
    fn binary_proba_columns_are_complementary() {
        let (x, y) = binary_data();
        let mut model = LogisticClassifier::new(LogisticConfig::default());
        model.fit(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.dim(), (x.nrows(), 2));
        for row in proba.outer_iter() {
            assert!((row[0] + row[1] - 1.0).abs() < 1e-9);
            assert!(row[0] >= 0.0 && row[0] <= 1.0);
        }
    }

    #[test]
    fn one_vs_rest_covers_three_classes() {
        let (x, y) = three_class_data();
        let mut model = LogisticClassifier::new(LogisticConfig::default());
        model.fit(&x, &y).unwrap();

        assert_eq!(model.classes().unwrap().to_vec(), vec![0, 1, 2]);
        assert_eq!(model.coefficients().unwrap().dim(), (3, 2));
        assert_eq!(model.intercepts().unwrap().len(), 3);

        let proba = model.predict_proba(&x).unwrap();
        for row in proba.outer_iter() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }

        let preds = model.predict(&x).unwrap();
        let correct = preds.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);
    }

    #[test]
    fn serial_one_vs_rest_matches_hint() {
        let (x, y) = three_class_data();
        let mut cfg = LogisticConfig::default();
        cfg.n_jobs = Some(1);
        let mut model = LogisticClassifier::new(cfg);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coefficients().unwrap().nrows(), 3);
    }

    #[test]
    fn unsupported_penalty_is_rejected() {
        let (x, y) = binary_data();
        let mut cfg = LogisticConfig::default();
        cfg.penalty = Penalty::L1;
        let mut model = LogisticClassifier::new(cfg);
        match model.fit(&x, &y) {
            Err(ModelError::Unsupported(msg)) => assert!(msg.contains("l1")),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn single_class_labels_are_rejected() {
        let x = Array2::zeros((5, 2));
        let y = Array1::from_vec(vec![1usize; 5]);
        let mut model = LogisticClassifier::new(LogisticConfig::default());
        assert!(matches!(
            model.fit(&x, &y),
            Err(ModelError::DegenerateLabels(_))
        ));
    }

    #[test]
    fn predict_before_fit_errors() {
        let model = LogisticClassifier::new(LogisticConfig::default());
        let x = Array2::zeros((3, 2));
        assert!(matches!(model.predict(&x), Err(ModelError::NotFitted)));
        assert!(matches!(
            model.predict_proba(&x),
            Err(ModelError::NotFitted)
        ));
    }

    #[test]
    fn feature_count_is_checked_on_predict() {
        let (x, y) = binary_data();
        let mut model = LogisticClassifier::new(LogisticConfig::default());
        model.fit(&x, &y).unwrap();
        let wide = Array2::zeros((4, 5));
        assert!(matches!(
            model.predict(&wide),
            Err(ModelError::FeatureMismatch {
                expected: 2,
                found: 5
            })
        ));
    }

    #[test]
    fn warm_start_refits_on_same_data() {
        let (x, y) = binary_data();
        let mut cfg = LogisticConfig::default();
        cfg.warm_start = true;
        let mut model = LogisticClassifier::new(cfg);
        model.fit(&x, &y).unwrap();
        let first = model.coefficients().unwrap().clone();
        // Second fit is seeded with the first solution and must land on a
        // solution of the same shape that still separates the data.
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coefficients().unwrap().dim(), first.dim());
        let preds = model.predict(&x).unwrap();
        let correct = preds.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        assert!(correct as f64 / y.len() as f64 > 0.9);
    }
}
