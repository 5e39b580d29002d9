//! Classifier and explainer seams, plus the linear model shipped in bundles.

use crate::error::FinsightError;
use serde::{Deserialize, Serialize};

/// A fitted classifier over encoded feature rows.
pub trait Classifier {
    /// Class labels, in score order.
    fn classes(&self) -> &[String];

    /// Class probabilities for one encoded row.
    fn predict_proba(&self, row: &[f64]) -> Vec<f64>;

    /// Most probable class. The first class wins ties; `None` when the model
    /// scores no class it has a label for.
    fn predict(&self, row: &[f64]) -> Option<(usize, &str)> {
        let proba = self.predict_proba(row);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes().get(best).map(|label| (best, label.as_str()))
    }
}

/// Per-column attributions toward one class.
pub trait AttributionExplainer {
    /// One signed score per encoded column.
    fn attributions(&self, row: &[f64], class_index: usize) -> Vec<f64>;
}

/// Linear (logistic / softmax) classifier.
///
/// Binary models may carry a single weight row, which scores the second
/// class against a fixed zero logit for the first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub classes: Vec<String>,
    /// `weights[row][column]`.
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
    /// Expected encoded row; attributions are measured against it. Empty means zeros.
    #[serde(default)]
    pub background: Vec<f64>,
}

impl LinearModel {
    fn is_single_row_binary(&self) -> bool {
        self.classes.len() == 2 && self.weights.len() == 1
    }

    /// Check every dimension against the encoded width.
    pub fn validate(&self, width: usize) -> Result<(), FinsightError> {
        if self.classes.len() < 2 {
            return Err(FinsightError::model(format!(
                "a classifier needs at least 2 classes, got {}",
                self.classes.len()
            )));
        }
        if self.weights.len() != self.classes.len() && !self.is_single_row_binary() {
            return Err(FinsightError::shape(format!(
                "{} weight rows for {} classes",
                self.weights.len(),
                self.classes.len()
            )));
        }
        if self.intercepts.len() != self.weights.len() {
            return Err(FinsightError::shape(format!(
                "{} intercepts for {} weight rows",
                self.intercepts.len(),
                self.weights.len()
            )));
        }
        if let Some((i, row)) = self.weights.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(FinsightError::shape(format!(
                "weight row {i} has {} columns, preprocessor produces {width}",
                row.len()
            )));
        }
        if !self.background.is_empty() && self.background.len() != width {
            return Err(FinsightError::shape(format!(
                "background has {} columns, preprocessor produces {width}",
                self.background.len()
            )));
        }
        Ok(())
    }

    fn background_at(&self, column: usize) -> f64 {
        self.background.get(column).copied().unwrap_or(0.0)
    }

    fn logits(&self, row: &[f64]) -> Vec<f64> {
        let scores = self.weights.iter().zip(&self.intercepts).map(|(w, b)| {
            w.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + b
        });
        if self.is_single_row_binary() {
            std::iter::once(0.0).chain(scores).collect()
        } else {
            scores.collect()
        }
    }
}

impl Classifier for LinearModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let logits = self.logits(row);
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / total).collect()
    }
}

impl AttributionExplainer for LinearModel {
    /// Exact SHAP values for a linear logit: `w[c][j] * (x[j] - background[j])`.
    fn attributions(&self, row: &[f64], class_index: usize) -> Vec<f64> {
        let (weights, sign) = if self.is_single_row_binary() {
            (&self.weights[0], if class_index == 1 { 1.0 } else { -1.0 })
        } else {
            match self.weights.get(class_index) {
                Some(w) => (w, 1.0),
                None => return vec![0.0; row.len()],
            }
        };
        row.iter()
            .enumerate()
            .map(|(j, x)| {
                sign * weights.get(j).copied().unwrap_or(0.0) * (x - self.background_at(j))
            })
            .collect()
    }
}
