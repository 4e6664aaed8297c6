use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Regularization applied to the logistic loss.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    L1,
    L2,
    ElasticNet,
    None,
}

impl Default for Penalty {
    fn default() -> Self {
        Penalty::L2
    }
}

impl FromStr for Penalty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l1" => Ok(Penalty::L1),
            "l2" => Ok(Penalty::L2),
            "elasticnet" | "elastic_net" => Ok(Penalty::ElasticNet),
            "none" => Ok(Penalty::None),
            _ => Err(format!(
                "Unknown penalty: {}. Valid options are: l1, l2, elasticnet, none",
                s
            )),
        }
    }
}

/// Optimization algorithm requested for the fit. The backend decides which
/// of these it can honor and rejects the rest at fit time.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    Lbfgs,
    Liblinear,
    NewtonCg,
    Sag,
    Saga,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::Lbfgs
    }
}

impl FromStr for Solver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbfgs" => Ok(Solver::Lbfgs),
            "liblinear" => Ok(Solver::Liblinear),
            "newton-cg" | "newton_cg" => Ok(Solver::NewtonCg),
            "sag" => Ok(Solver::Sag),
            "saga" => Ok(Solver::Saga),
            _ => Err(format!(
                "Unknown solver: {}. Valid options are: lbfgs, liblinear, newton-cg, sag, saga",
                s
            )),
        }
    }
}

/// Strategy for datasets with more than two classes.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// Binary fit for two classes, one-vs-rest otherwise.
    Auto,
    Ovr,
    Multinomial,
}

impl Default for MultiClass {
    fn default() -> Self {
        MultiClass::Auto
    }
}

impl FromStr for MultiClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(MultiClass::Auto),
            "ovr" => Ok(MultiClass::Ovr),
            "multinomial" => Ok(MultiClass::Multinomial),
            _ => Err(format!(
                "Unknown multi-class strategy: {}. Valid options are: auto, ovr, multinomial",
                s
            )),
        }
    }
}

/// Per-class weighting applied during training.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// Every sample counts the same.
    None,
    /// Weights inversely proportional to class frequencies.
    Balanced,
}

impl Default for ClassWeight {
    fn default() -> Self {
        ClassWeight::None
    }
}

impl FromStr for ClassWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(ClassWeight::None),
            "balanced" => Ok(ClassWeight::Balanced),
            _ => Err(format!(
                "Unknown class weighting: {}. Valid options are: none, balanced",
                s
            )),
        }
    }
}

/// Central configuration for the logistic regression wrapper.
///
/// No cross-field invariants are enforced here; the classifier backend
/// rejects combinations it cannot honor when `fit` is called.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogisticConfig {
    pub penalty: Penalty,
    pub dual: bool,
    /// Convergence tolerance handed to the solver.
    pub tol: f64,
    /// Inverse regularization strength; smaller values regularize harder.
    pub c: f64,
    pub fit_intercept: bool,
    /// Only meaningful to solvers that augment the feature vector with a
    /// synthetic constant column; carried for interface parity.
    pub intercept_scaling: f64,
    pub class_weight: ClassWeight,
    /// Seed handed to the classifier. The train/test splitter draws its own
    /// randomness and never sees this value.
    pub random_state: Option<u64>,
    pub solver: Solver,
    /// Iteration cap for the solver.
    pub max_iter: u64,
    pub multi_class: MultiClass,
    /// Positive values add info-level logging during the fit.
    pub verbose: u32,
    /// Reuse the previous solution of this classifier instance as the
    /// starting point for the next fit.
    pub warm_start: bool,
    /// Parallelism hint for the one-vs-rest fan-out. `Some(1)` forces a
    /// serial fit loop.
    pub n_jobs: Option<usize>,
    /// Elastic-net mixing parameter: 0 is pure l2, 1 is pure l1.
    pub l1_ratio: Option<f64>,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            penalty: Penalty::L2,
            dual: false,
            tol: 1e-4,
            c: 1.0,
            fit_intercept: true,
            intercept_scaling: 1.0,
            class_weight: ClassWeight::None,
            random_state: None,
            solver: Solver::Lbfgs,
            max_iter: 100,
            multi_class: MultiClass::Auto,
            verbose: 0,
            warm_start: false,
            n_jobs: None,
            l1_ratio: None,
        }
    }
}

impl LogisticConfig {
    /// Regularization strength the backend expects (`alpha`), derived from
    /// the inverse strength `c`. `Penalty::None` maps to zero.
    pub(crate) fn alpha(&self) -> f64 {
        match self.penalty {
            Penalty::None => 0.0,
            _ => 1.0 / self.c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_wrapper() {
        let cfg = LogisticConfig::default();
        assert_eq!(cfg.penalty, Penalty::L2);
        assert!(!cfg.dual);
        assert!((cfg.tol - 1e-4).abs() < 1e-12);
        assert!((cfg.c - 1.0).abs() < 1e-12);
        assert!(cfg.fit_intercept);
        assert_eq!(cfg.solver, Solver::Lbfgs);
        assert_eq!(cfg.max_iter, 100);
        assert_eq!(cfg.multi_class, MultiClass::Auto);
        assert!(!cfg.warm_start);
        assert!(cfg.random_state.is_none());
        assert!(cfg.n_jobs.is_none());
        assert!(cfg.l1_ratio.is_none());
    }

    #[test]
    fn enums_parse_lowercase_names() {
        assert_eq!("l2".parse::<Penalty>().unwrap(), Penalty::L2);
        assert_eq!("elasticnet".parse::<Penalty>().unwrap(), Penalty::ElasticNet);
        assert_eq!("lbfgs".parse::<Solver>().unwrap(), Solver::Lbfgs);
        assert_eq!("newton-cg".parse::<Solver>().unwrap(), Solver::NewtonCg);
        assert_eq!("ovr".parse::<MultiClass>().unwrap(), MultiClass::Ovr);
        assert_eq!(
            "balanced".parse::<ClassWeight>().unwrap(),
            ClassWeight::Balanced
        );
    }

    #[test]
    fn unknown_names_error() {
        assert!("ridge".parse::<Penalty>().is_err());
        assert!("adam".parse::<Solver>().is_err());
        assert!("one_vs_one".parse::<MultiClass>().is_err());
    }

    #[test]
    fn alpha_inverts_c() {
        let mut cfg = LogisticConfig::default();
        cfg.c = 4.0;
        assert!((cfg.alpha() - 0.25).abs() < 1e-12);
        cfg.penalty = Penalty::None;
        assert_eq!(cfg.alpha(), 0.0);
    }
}
