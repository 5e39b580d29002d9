//! Model bundles: a fitted preprocessor and a classifier loaded together.
//!
//! Bundles are loaded once by the caller and passed by reference into
//! prediction calls. There is no process-wide cache.

use super::model::{AttributionExplainer, Classifier, LinearModel};
use crate::error::FinsightError;
use crate::features::{ColumnTransformer, InputRecord};
use crate::interpretability::{AttributionRequest, ExplanationKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable preprocessor + model pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub name: String,
    pub preprocessor: ColumnTransformer,
    pub model: LinearModel,
    #[serde(skip)]
    feature_names: Vec<String>,
}

/// One classified record with its attributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub class_index: usize,
    pub label: String,
    pub probabilities: Vec<f64>,
    /// Attributions toward the predicted class, one per encoded column.
    pub attributions: Vec<f64>,
    pub encoded_names: Vec<String>,
}

impl Prediction {
    /// Formatter request explaining this prediction under its own label.
    pub fn explanation_request(
        &self,
        input: InputRecord,
        kind: ExplanationKind,
    ) -> AttributionRequest {
        self.explanation_request_as(input, kind, self.label.clone())
    }

    /// Formatter request explaining this prediction under a caller-chosen label.
    pub fn explanation_request_as(
        &self,
        input: InputRecord,
        kind: ExplanationKind,
        outcome_label: impl Into<String>,
    ) -> AttributionRequest {
        AttributionRequest::new(
            self.attributions.clone(),
            self.encoded_names.clone(),
            input,
            outcome_label,
            kind,
        )
    }
}

impl ModelBundle {
    /// Assemble and validate a bundle from its parts.
    pub fn new(
        name: impl Into<String>,
        preprocessor: ColumnTransformer,
        model: LinearModel,
    ) -> Result<Self, FinsightError> {
        let mut bundle = Self {
            name: name.into(),
            preprocessor,
            model,
            feature_names: Vec::new(),
        };
        bundle.finish()?;
        Ok(bundle)
    }

    /// Load a JSON bundle from disk.
    pub fn load(path: &Path) -> Result<Self, FinsightError> {
        if !path.exists() {
            return Err(FinsightError::not_found(format!(
                "model bundle {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let bundle = Self::from_json(&content)?;
        tracing::info!(
            bundle = %bundle.name,
            path = %path.display(),
            features = bundle.feature_names.len(),
            classes = bundle.model.classes.len(),
            "Model bundle loaded"
        );
        Ok(bundle)
    }

    pub fn from_json(content: &str) -> Result<Self, FinsightError> {
        let mut bundle: ModelBundle = serde_json::from_str(content)?;
        bundle.finish()?;
        Ok(bundle)
    }

    fn finish(&mut self) -> Result<(), FinsightError> {
        self.model.validate(self.preprocessor.width())?;
        self.feature_names = self.preprocessor.feature_names();
        Ok(())
    }

    /// Encoded feature names, in attribution order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }

    /// Encode, classify, and attribute one raw record.
    pub fn predict_and_explain(&self, input: &InputRecord) -> Result<Prediction, FinsightError> {
        let row = self.preprocessor.transform(input)?;
        let probabilities = self.model.predict_proba(&row);
        let (class_index, label) = self
            .model
            .predict(&row)
            .ok_or_else(|| {
                FinsightError::model(format!("bundle '{}' has no classes", self.name))
            })?;
        let attributions = self.model.attributions(&row, class_index);
        tracing::debug!(bundle = %self.name, label, "Prediction made");

        Ok(Prediction {
            class_index,
            label: label.to_string(),
            probabilities,
            attributions,
            encoded_names: self.feature_names.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{CategoricalColumn, InputValue, NumericColumn};

    const BUNDLE_JSON: &str = r#"{
        "name": "risk",
        "preprocessor": {
            "numeric": [{"field": "TimeHorizonYears", "mean": 10.0, "scale": 5.0}],
            "categorical": [{"field": "AgeRange", "categories": ["25-34", "55+"]}]
        },
        "model": {
            "classes": ["Conservative", "Aggressive"],
            "weights": [[-1.0, -0.5, 1.0], [1.0, 0.5, -1.0]],
            "intercepts": [0.0, 0.0],
            "background": [0.0, 0.5, 0.5]
        }
    }"#;

    #[test]
    fn test_from_json_and_predict() {
        let bundle = ModelBundle::from_json(BUNDLE_JSON).unwrap();
        assert_eq!(
            bundle.feature_names(),
            &[
                "numeric__TimeHorizonYears",
                "categorical__AgeRange_25-34",
                "categorical__AgeRange_55+",
            ]
        );

        let input: InputRecord = [
            ("TimeHorizonYears", InputValue::from(20)),
            ("AgeRange", InputValue::from("25-34")),
        ]
        .into_iter()
        .collect();
        let prediction = bundle.predict_and_explain(&input).unwrap();
        assert_eq!(prediction.label, "Aggressive");
        assert_eq!(prediction.attributions, vec![2.0, 0.25, 0.5]);
        assert_eq!(prediction.encoded_names.len(), 3);
    }

    #[test]
    fn test_new_rejects_width_mismatch() {
        let preprocessor = ColumnTransformer {
            numeric: vec![NumericColumn {
                field: "X".into(),
                mean: 0.0,
                scale: 1.0,
            }],
            categorical: vec![CategoricalColumn {
                field: "Y".into(),
                categories: vec!["a".into()],
            }],
        };
        let model = LinearModel {
            classes: vec!["no".into(), "yes".into()],
            weights: vec![vec![1.0]],
            intercepts: vec![0.0],
            background: vec![],
        };
        assert!(matches!(
            ModelBundle::new("bad", preprocessor, model),
            Err(FinsightError::Shape(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelBundle::load(Path::new("/nonexistent/bundle.json")).unwrap_err();
        assert!(matches!(err, FinsightError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.json");
        std::fs::write(&path, BUNDLE_JSON).unwrap();
        let bundle = ModelBundle::load(&path).unwrap();
        assert_eq!(bundle.classes(), &["Conservative", "Aggressive"]);
    }
}
