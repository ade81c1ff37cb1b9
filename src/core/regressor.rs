//! Regression model artifact
//!
//! Supported model families, serialized as tagged JSON:
//! - `linear`: `{"kind": "linear", "coefficients": [..], "intercept": 0.0}`
//! - `forest`: `{"kind": "forest", "trees": [..]}`, mean of regression trees
//!
//! Trees use the flat node layout exported by tree learners: parallel arrays
//! indexed by node id, with `-1` children marking a leaf.

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, AppResult, ErrorCode};

/// Child index marking a leaf node
pub const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        /// Input width the forest was fitted on
        n_features: usize,
        trees: Vec<RegressionTree>,
    },
}

/// Single regression tree in flat node layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    fn validate(&self, n_features: usize) -> AppResult<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(AppError::invalid_artifact("tree has no nodes"));
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(AppError::invalid_artifact(format!(
                "tree node arrays disagree in length (expected {})",
                n
            )));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            match (left == TREE_LEAF, right == TREE_LEAF) {
                (true, true) => {
                    if !self.value[node].is_finite() {
                        return Err(AppError::invalid_artifact(format!(
                            "leaf {} has a non-finite value",
                            node
                        )));
                    }
                }
                (false, false) => {
                    // children always come after their parent, so every walk terminates
                    for child in [left, right] {
                        if child <= node as i64 || child >= n as i64 {
                            return Err(AppError::invalid_artifact(format!(
                                "node {} has out-of-order child {}",
                                node, child
                            )));
                        }
                    }
                    let feature = self.feature[node];
                    if feature < 0 || feature as usize >= n_features {
                        return Err(AppError::invalid_artifact(format!(
                            "node {} splits on feature {} (model has {})",
                            node, feature, n_features
                        )));
                    }
                    if self.threshold[node].is_nan() {
                        return Err(AppError::invalid_artifact(format!(
                            "node {} has a NaN threshold",
                            node
                        )));
                    }
                }
                _ => {
                    return Err(AppError::invalid_artifact(format!(
                        "node {} has exactly one child",
                        node
                    )));
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Assumes `validate` passed.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == TREE_LEAF {
                return self.value[node];
            }
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

impl Regressor {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "linear",
            Self::Forest { .. } => "forest",
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            Self::Linear { coefficients, .. } => coefficients.len(),
            Self::Forest { n_features, .. } => *n_features,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        match self {
            Self::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    return Err(AppError::invalid_artifact("linear model has no coefficients"));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(AppError::invalid_artifact(
                        "linear model contains non-finite parameters",
                    ));
                }
            }
            Self::Forest { n_features, trees } => {
                if *n_features == 0 {
                    return Err(AppError::invalid_artifact("forest has zero input features"));
                }
                if trees.is_empty() {
                    return Err(AppError::invalid_artifact("forest has no trees"));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(*n_features).map_err(|e| {
                        AppError::invalid_artifact(format!("tree {}: {}", i, e.message))
                    })?;
                }
            }
        }
        Ok(())
    }

    pub fn predict(&self, row: &[f64]) -> AppResult<f64> {
        if row.len() != self.n_features() {
            return Err(AppError::new(
                ErrorCode::PredictionShapeMismatch,
                format!(
                    "model expects {} features, got {}",
                    self.n_features(),
                    row.len()
                ),
            ));
        }

        let prediction = match self {
            Self::Linear {
                coefficients,
                intercept,
            } => {
                coefficients
                    .iter()
                    .zip(row)
                    .map(|(c, x)| c * x)
                    .sum::<f64>()
                    + intercept
            }
            Self::Forest { trees, .. } => {
                let total: f64 = trees.iter().map(|t| t.predict(row)).sum();
                total / trees.len() as f64
            }
        };
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x[0] <= 0.5 → 10, else (x[1] <= 2.0 → 20, else 30)
    fn stump_tree() -> RegressionTree {
        RegressionTree {
            children_left: vec![1, -1, 3, -1, -1],
            children_right: vec![2, -1, 4, -1, -1],
            feature: vec![0, -2, 1, -2, -2],
            threshold: vec![0.5, -2.0, 2.0, -2.0, -2.0],
            value: vec![0.0, 10.0, 0.0, 20.0, 30.0],
        }
    }

    #[test]
    fn test_linear_predict() {
        let model = Regressor::Linear {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(model.predict(&[3.0, 1.0]).unwrap(), 5.5);
    }

    #[test]
    fn test_tree_walk() {
        let tree = stump_tree();
        assert_eq!(tree.predict(&[0.0, 100.0]), 10.0);
        assert_eq!(tree.predict(&[0.5, 0.0]), 10.0);
        assert_eq!(tree.predict(&[1.0, 2.0]), 20.0);
        assert_eq!(tree.predict(&[1.0, 2.5]), 30.0);
    }

    #[test]
    fn test_forest_averages_trees() {
        let constant = RegressionTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![40.0],
        };
        let model = Regressor::Forest {
            n_features: 2,
            trees: vec![stump_tree(), constant],
        };
        model.validate().unwrap();
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), 25.0);
    }

    #[test]
    fn test_forest_rejects_cycles() {
        let mut tree = stump_tree();
        tree.children_left[2] = 0;
        let model = Regressor::Forest {
            n_features: 2,
            trees: vec![tree],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_forest_rejects_unknown_feature() {
        let mut tree = stump_tree();
        tree.feature[2] = 7;
        let model = Regressor::Forest {
            n_features: 2,
            trees: vec![tree],
        };
        let err = model.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ArtifactInvalid);
        assert!(err.message.contains("tree 0"));
    }

    #[test]
    fn test_forest_rejects_half_leaf() {
        let mut tree = stump_tree();
        tree.children_right[0] = -1;
        let model = Regressor::Forest {
            n_features: 2,
            trees: vec![tree],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_linear_validate() {
        let empty = Regressor::Linear {
            coefficients: vec![],
            intercept: 0.0,
        };
        assert!(empty.validate().is_err());

        let inf = Regressor::Linear {
            coefficients: vec![1.0],
            intercept: f64::INFINITY,
        };
        assert!(inf.validate().is_err());
    }

    #[test]
    fn test_width_mismatch() {
        let model = Regressor::Linear {
            coefficients: vec![1.0; 5],
            intercept: 0.0,
        };
        let err = model.predict(&[1.0]).unwrap_err();
        assert_eq!(err.code, ErrorCode::PredictionShapeMismatch);
    }

    #[test]
    fn test_deserialize_forest() {
        let json = r#"{
            "kind": "forest",
            "n_features": 1,
            "trees": [{
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [3.5]
            }]
        }"#;
        let model: Regressor = serde_json::from_str(json).unwrap();
        assert_eq!(model.kind(), "forest");
        model.validate().unwrap();
        assert_eq!(model.predict(&[9.0]).unwrap(), 3.5);
    }
}
