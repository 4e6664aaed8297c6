use ndarray::{Array1, Array2};
use shopfloor_classifiers::config::LogisticConfig;
use shopfloor_classifiers::models::classifier_trait::Classifier;
use shopfloor_classifiers::models::factory;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 0.0, // class 1
            0.0, 1.0, // class 0
            1.0, 0.1, // class 1
            0.0, 0.9, // class 0
            1.1, 0.0, // class 1
            0.0, 1.2, // class 0
        ],
    )
    .expect("failed to create feature matrix");

    let y = Array1::from_vec(vec![1usize, 0, 1, 0, 1, 0]);

    let mut model = factory::build_classifier(LogisticConfig::default());
    model.fit(&x, &y).expect("fit should succeed");
    assert_eq!(model.name(), "logistic_regression");

    let probs = model.predict_proba(&x).expect("predict_proba should succeed");
    assert_eq!(probs.nrows(), x.nrows());
    assert_eq!(probs.ncols(), 2);

    let preds = model.predict(&x).expect("predict should succeed");
    assert_eq!(preds.len(), x.nrows());
}
