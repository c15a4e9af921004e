//! Artifact validation
//!
//! Rejects artifacts whose parameters would let inference read out of bounds
//! or produce non-finite probabilities.

use std::collections::HashSet;

use common::error::{Error, Result};

use crate::artifact::{ArtifactFile, LogisticRegressionSpec, ModelSpec, TreeNode, TreeSpec};

/// Validates a raw artifact against its own feature list
pub fn validate(file: &ArtifactFile) -> Result<()> {
    validate_features(&file.features)?;

    let n_features = file.features.len();
    match &file.model {
        ModelSpec::RandomForest(forest) => {
            if forest.trees.is_empty() {
                return Err(Error::Model("random forest has no trees".to_string()));
            }
            for (i, tree) in forest.trees.iter().enumerate() {
                validate_tree(tree, n_features)
                    .map_err(|e| Error::Model(format!("tree {}: {}", i, e)))?;
            }
        }
        ModelSpec::DecisionTree(tree) => {
            validate_tree(tree, n_features).map_err(Error::Model)?;
        }
        ModelSpec::LogisticRegression(spec) => validate_logistic(spec, n_features)?,
    }

    Ok(())
}

fn validate_features(features: &[String]) -> Result<()> {
    if features.is_empty() {
        return Err(Error::Model("feature list is empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(features.len());
    for name in features {
        if name.is_empty() {
            return Err(Error::Model("feature list contains an empty name".to_string()));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::Model(format!("duplicate feature name '{}'", name)));
        }
    }

    Ok(())
}

fn validate_tree(tree: &TreeSpec, n_features: usize) -> std::result::Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }

    let n_nodes = tree.nodes.len();
    for (idx, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Split { feature, threshold, left, right } => {
                if *feature >= n_features {
                    return Err(format!(
                        "node {} splits on feature {} but only {} features exist",
                        idx, feature, n_features
                    ));
                }
                if threshold.is_nan() {
                    return Err(format!("node {} has a NaN threshold", idx));
                }
                // Children after their parent rules out cycles.
                for child in [*left, *right] {
                    if child <= idx || child >= n_nodes {
                        return Err(format!(
                            "node {} points to invalid child {} ({} nodes)",
                            idx, child, n_nodes
                        ));
                    }
                }
            }
            TreeNode::Leaf { distribution } => {
                if distribution.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("leaf {} has a negative or non-finite weight", idx));
                }
                if distribution.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {} has no weight", idx));
                }
            }
        }
    }

    Ok(())
}

fn validate_logistic(spec: &LogisticRegressionSpec, n_features: usize) -> Result<()> {
    if spec.coefficients.len() != n_features {
        return Err(Error::Model(format!(
            "logistic regression has {} coefficients for {} features",
            spec.coefficients.len(),
            n_features
        )));
    }

    if spec.coefficients.iter().any(|c| !c.is_finite()) || !spec.intercept.is_finite() {
        return Err(Error::Model(
            "logistic regression has non-finite parameters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::RandomForestSpec;

    fn features(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn stump(feature: usize) -> TreeSpec {
        TreeSpec {
            nodes: vec![
                TreeNode::Split { feature, threshold: 0.5, left: 1, right: 2 },
                TreeNode::Leaf { distribution: [3.0, 1.0] },
                TreeNode::Leaf { distribution: [1.0, 3.0] },
            ],
        }
    }

    fn artifact(features: Vec<String>, model: ModelSpec) -> ArtifactFile {
        ArtifactFile { features, model, metadata: None }
    }

    #[test]
    fn test_valid_forest() {
        let file = artifact(
            features(&["a", "b"]),
            ModelSpec::RandomForest(RandomForestSpec { trees: vec![stump(0), stump(1)] }),
        );
        assert!(validate(&file).is_ok());
    }

    #[test]
    fn test_rejects_empty_and_duplicate_features() {
        let empty = artifact(Vec::new(), ModelSpec::DecisionTree(stump(0)));
        assert!(validate(&empty).is_err());

        let dup = artifact(features(&["a", "a"]), ModelSpec::DecisionTree(stump(0)));
        let err = validate(&dup).unwrap_err();
        assert!(err.to_string().contains("duplicate feature name 'a'"));
    }

    #[test]
    fn test_rejects_split_on_unknown_feature() {
        let file = artifact(features(&["a"]), ModelSpec::DecisionTree(stump(1)));
        assert!(validate(&file).is_err());
    }

    #[test]
    fn test_rejects_backward_child() {
        let tree = TreeSpec {
            nodes: vec![
                TreeNode::Leaf { distribution: [1.0, 0.0] },
                TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 2 },
                TreeNode::Leaf { distribution: [0.0, 1.0] },
            ],
        };
        let file = artifact(features(&["a"]), ModelSpec::DecisionTree(tree));
        assert!(validate(&file).is_err());
    }

    #[test]
    fn test_rejects_weightless_leaf() {
        let tree = TreeSpec { nodes: vec![TreeNode::Leaf { distribution: [0.0, 0.0] }] };
        let file = artifact(features(&["a"]), ModelSpec::DecisionTree(tree));
        assert!(validate(&file).is_err());
    }

    #[test]
    fn test_rejects_empty_forest() {
        let file = artifact(
            features(&["a"]),
            ModelSpec::RandomForest(RandomForestSpec { trees: Vec::new() }),
        );
        assert!(validate(&file).is_err());
    }

    #[test]
    fn test_rejects_coefficient_mismatch() {
        let file = artifact(
            features(&["a", "b", "c"]),
            ModelSpec::LogisticRegression(LogisticRegressionSpec {
                coefficients: vec![0.1, 0.2],
                intercept: 0.0,
            }),
        );
        let err = validate(&file).unwrap_err();
        assert!(err.to_string().contains("2 coefficients for 3 features"));
    }
}
