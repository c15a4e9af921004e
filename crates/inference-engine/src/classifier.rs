//! Classifier implementations
//!
//! Every supported model family answers the same two questions for a single
//! aligned row: the class probability distribution and the predicted label.

use common::error::{Error, Result};
use common::models::RainLabel;
use model_manager::{LogisticRegressionSpec, ModelSpec, RandomForestSpec, TreeNode, TreeSpec};

use crate::features::FeatureVector;

/// Binary rain classifier
pub trait Classifier: Send + Sync {
    /// Probability distribution `[p(no rain), p(rain)]` for one row
    fn classify_proba(&self, row: &FeatureVector) -> Result<[f64; 2]>;

    /// Predicted label for one row; ties go to class 0
    fn classify(&self, row: &FeatureVector) -> Result<RainLabel> {
        self.classify_proba(row).map(label_for)
    }
}

/// Label with the larger probability; ties go to class 0
pub fn label_for([no_rain, rain]: [f64; 2]) -> RainLabel {
    if rain > no_rain {
        RainLabel::Rain
    } else {
        RainLabel::NoRain
    }
}

impl Classifier for TreeSpec {
    fn classify_proba(&self, row: &FeatureVector) -> Result<[f64; 2]> {
        let values = row.as_slice();
        let mut idx = 0;

        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| Error::Inference(format!("tree node {} does not exist", idx)))?;

            match node {
                TreeNode::Leaf { distribution } => return normalize(distribution),
                TreeNode::Split { feature, threshold, left, right } => {
                    let value = values.get(*feature).ok_or_else(|| {
                        Error::Inference(format!(
                            "split on feature {} but row has {} values",
                            feature,
                            values.len()
                        ))
                    })?;
                    idx = if *value <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Classifier for RandomForestSpec {
    fn classify_proba(&self, row: &FeatureVector) -> Result<[f64; 2]> {
        if self.trees.is_empty() {
            return Err(Error::Inference("random forest has no trees".to_string()));
        }

        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [no_rain, rain] = tree.classify_proba(row)?;
            sum[0] += no_rain;
            sum[1] += rain;
        }

        let n_trees = self.trees.len() as f64;
        Ok([sum[0] / n_trees, sum[1] / n_trees])
    }
}

impl Classifier for LogisticRegressionSpec {
    fn classify_proba(&self, row: &FeatureVector) -> Result<[f64; 2]> {
        if self.coefficients.len() != row.len() {
            return Err(Error::Inference(format!(
                "{} coefficients for a row of {} values",
                self.coefficients.len(),
                row.len()
            )));
        }

        let logit: f64 = self
            .coefficients
            .iter()
            .zip(row.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        // Opposite-signed overflows cancel to NaN.
        if logit.is_nan() {
            return Err(Error::Inference(
                "logistic regression score is undefined for this row".to_string(),
            ));
        }

        let rain = sigmoid(logit);
        Ok([1.0 - rain, rain])
    }
}

impl Classifier for ModelSpec {
    fn classify_proba(&self, row: &FeatureVector) -> Result<[f64; 2]> {
        match self {
            ModelSpec::RandomForest(forest) => forest.classify_proba(row),
            ModelSpec::DecisionTree(tree) => tree.classify_proba(row),
            ModelSpec::LogisticRegression(logit) => logit.classify_proba(row),
        }
    }
}

/// Scales leaf weights to probabilities
///
/// Dividing by the larger weight first keeps the sum finite for weights near `f64::MAX`.
fn normalize(weights: &[f64; 2]) -> Result<[f64; 2]> {
    let scale = weights[0].max(weights[1]);
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(Error::Inference("leaf has no usable weight".to_string()));
    }

    let [no_rain, rain] = [weights[0] / scale, weights[1] / scale];
    let total = no_rain + rain;
    Ok([no_rain / total, rain / total])
}

/// Numerically stable logistic function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSchema;
    use common::models::FeatureMap;

    fn row(values: &[f64]) -> FeatureVector {
        let names: Vec<String> = (0..values.len()).map(|i| format!("f{}", i)).collect();
        let map: FeatureMap = names.iter().cloned().zip(values.iter().copied()).collect();
        FeatureSchema::new(names).align(&map).unwrap().vector
    }

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> TreeSpec {
        TreeSpec {
            nodes: vec![
                TreeNode::Split { feature, threshold, left: 1, right: 2 },
                TreeNode::Leaf { distribution: left },
                TreeNode::Leaf { distribution: right },
            ],
        }
    }

    #[test]
    fn test_tree_goes_left_on_equal() {
        let tree = stump(0, 10.0, [4.0, 1.0], [1.0, 4.0]);
        assert_eq!(tree.classify_proba(&row(&[10.0])).unwrap(), [0.8, 0.2]);
        assert_eq!(tree.classify_proba(&row(&[10.5])).unwrap(), [0.2, 0.8]);
        assert_eq!(tree.classify(&row(&[10.5])).unwrap(), RainLabel::Rain);
    }

    #[test]
    fn test_forest_averages_tree_distributions() {
        let forest = RandomForestSpec {
            trees: vec![
                stump(0, 5.0, [1.0, 0.0], [0.0, 1.0]),
                stump(1, 5.0, [1.0, 0.0], [0.5, 0.5]),
            ],
        };

        let proba = forest.classify_proba(&row(&[6.0, 6.0])).unwrap();
        assert_eq!(proba, [0.25, 0.75]);
        assert_eq!(forest.classify(&row(&[6.0, 6.0])).unwrap(), RainLabel::Rain);

        let proba = forest.classify_proba(&row(&[6.0, 1.0])).unwrap();
        assert_eq!(proba, [0.5, 0.5]);
        assert_eq!(forest.classify(&row(&[6.0, 1.0])).unwrap(), RainLabel::NoRain);
    }

    #[test]
    fn test_logistic_regression() {
        let logit = LogisticRegressionSpec { coefficients: vec![1.0, -1.0], intercept: 0.0 };
        let [no_rain, rain] = logit.classify_proba(&row(&[2.0, 2.0])).unwrap();
        assert_eq!(rain, 0.5);
        assert_eq!(no_rain, 0.5);
        assert_eq!(logit.classify(&row(&[2.0, 2.0])).unwrap(), RainLabel::NoRain);
        assert_eq!(logit.classify(&row(&[3.0, 0.0])).unwrap(), RainLabel::Rain);
    }

    #[test]
    fn test_logistic_rejects_undefined_score() {
        let logit = LogisticRegressionSpec { coefficients: vec![10.0, -10.0], intercept: 0.0 };
        let err = logit.classify_proba(&row(&[1e308, 1e308])).unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
        assert!(logit.classify(&row(&[1e308, 1e308])).is_err());
    }

    #[test]
    fn test_huge_leaf_weights_do_not_overflow() {
        let leaf = TreeSpec { nodes: vec![TreeNode::Leaf { distribution: [1e308, 1.7e308] }] };
        let [no_rain, rain] = leaf.classify_proba(&row(&[0.0])).unwrap();
        assert!((rain - 1.7 / 2.7).abs() < 1e-12);
        assert!((no_rain + rain - 1.0).abs() < 1e-12);
        assert_eq!(leaf.classify(&row(&[0.0])).unwrap(), RainLabel::Rain);
    }

    #[test]
    fn test_label_ties_go_to_no_rain() {
        assert_eq!(label_for([0.5, 0.5]), RainLabel::NoRain);
        assert_eq!(label_for([0.49, 0.51]), RainLabel::Rain);
    }

    #[test]
    fn test_logistic_rejects_wrong_width() {
        let logit = LogisticRegressionSpec { coefficients: vec![1.0], intercept: 0.0 };
        assert!(logit.classify_proba(&row(&[1.0, 2.0])).is_err());
    }

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!((sigmoid(0.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_model_spec_dispatch() {
        let spec = ModelSpec::DecisionTree(stump(0, 0.5, [0.27, 0.73], [1.0, 0.0]));
        let proba = spec.classify_proba(&row(&[0.0])).unwrap();
        assert!((proba[1] - 0.73).abs() < 1e-12);
    }
}
