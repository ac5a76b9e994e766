//! JSON model artifact and its evaluation.
//!
//! The artifact describes a fitted binary or multi-class classifier exported
//! from a scikit-learn style estimator. Its feature contract is not checked at
//! load time; any mismatch surfaces as a prediction error on first use.

use crate::domain::model::{InputVector, Label};
use crate::domain::ports::Predictor;
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
    pub estimator: Estimator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
    DecisionTree(DecisionTree),
    RandomForest { trees: Vec<DecisionTree> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// `row[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// 每個類別的權重（樣本數或機率）
    Leaf { value: Vec<f64> },
}

impl DecisionTree {
    fn leaf_for(&self, row: &[f64]) -> Result<&[f64]> {
        let mut index = 0;
        // 每走一步都會前進到子節點，超過節點數代表有環
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                AppError::prediction(format!("Tree node {} does not exist", index))
            })?;

            match node {
                TreeNode::Leaf { value } => return Ok(value.as_slice()),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = row.get(*feature).ok_or_else(|| {
                        AppError::prediction(format!(
                            "Split uses feature {} but the row has {} features",
                            feature,
                            row.len()
                        ))
                    })?;
                    index = if *x <= *threshold { *left } else { *right };
                }
            }
        }

        Err(AppError::prediction("Tree does not reach a leaf"))
    }
}

fn argmax(weights: &[f64]) -> Option<usize> {
    weights
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &w)| match best {
            Some((_, best_w)) if best_w >= w => best,
            _ => Some((i, w)),
        })
        .map(|(i, _)| i)
}

impl ModelArtifact {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn kind(&self) -> &'static str {
        match self.estimator {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }

    fn class_at(&self, index: usize) -> Result<Label> {
        self.classes.get(index).copied().ok_or_else(|| {
            AppError::prediction(format!(
                "Class index {} is out of range for {} classes",
                index,
                self.classes.len()
            ))
        })
    }

    fn check_leaf_width(&self, leaf: &[f64]) -> Result<()> {
        if leaf.len() != self.classes.len() {
            return Err(AppError::prediction(format!(
                "Leaf has {} class weights but the model declares {} classes",
                leaf.len(),
                self.classes.len()
            )));
        }
        Ok(())
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, row: &InputVector) -> Result<Label> {
        let row = row.as_slice();

        match &self.estimator {
            Estimator::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != row.len() {
                    return Err(AppError::prediction(format!(
                        "Model expects {} features, got {}",
                        coefficients.len(),
                        row.len()
                    )));
                }
                if self.classes.len() != 2 {
                    return Err(AppError::prediction(
                        "Logistic regression needs exactly two classes",
                    ));
                }
                let z: f64 = intercept
                    + coefficients
                        .iter()
                        .zip(row)
                        .map(|(w, x)| w * x)
                        .sum::<f64>();
                self.class_at(if z > 0.0 { 1 } else { 0 })
            }
            Estimator::DecisionTree(tree) => {
                let leaf = tree.leaf_for(row)?;
                self.check_leaf_width(leaf)?;
                let best = argmax(leaf).ok_or_else(|| AppError::prediction("Empty leaf"))?;
                self.class_at(best)
            }
            Estimator::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(AppError::prediction("Random forest has no trees"));
                }

                // 與 sklearn 相同：先把每棵樹的葉節點正規化成機率再平均
                let mut proba = vec![0.0; self.classes.len()];
                for tree in trees {
                    let leaf = tree.leaf_for(row)?;
                    self.check_leaf_width(leaf)?;
                    let total: f64 = leaf.iter().sum();
                    let scale = if total > 0.0 { 1.0 / total } else { 0.0 };
                    for (p, w) in proba.iter_mut().zip(leaf) {
                        *p += w * scale;
                    }
                }

                let best = argmax(&proba).ok_or_else(|| AppError::prediction("Model has no classes"))?;
                self.class_at(best)
            }
        }
    }
}

/// 啟動時載入的模型，整個行程期間唯讀
#[derive(Debug)]
pub struct LoadedModel {
    artifact: ModelArtifact,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl LoadedModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let bytes = std::fs::read(path).map_err(|e| AppError::model_load(&source_name, e.to_string()))?;
        let artifact = ModelArtifact::from_json_slice(&bytes)
            .map_err(|e| AppError::model_load(&source_name, e.to_string()))?;

        tracing::info!(
            "📦 Loaded {} model from {} ({} classes)",
            artifact.kind(),
            source_name,
            artifact.classes.len()
        );

        Ok(Self {
            artifact,
            source: path.to_path_buf(),
            loaded_at: Utc::now(),
        })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Predictor for LoadedModel {
    fn predict(&self, row: &InputVector) -> Result<Label> {
        self.artifact.predict(row)
    }
}
