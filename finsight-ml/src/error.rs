//! Error types for the finsight-ml crate.

use thiserror::Error;

/// Top-level error type for model loading and the advice pipeline.
///
/// The attribution formatter has its own [`crate::interpretability::ExplanationError`],
/// which never escapes [`crate::interpretability::AttributionFormatter::format`].
#[derive(Debug, Error)]
pub enum FinsightError {
    #[error("Model error: {0}")]
    Model(String),

    #[error("Preprocessing error: {0}")]
    Preprocessing(String),

    #[error("Shape mismatch: {0}")]
    Shape(String),

    #[error("Missing profile fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl FinsightError {
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn preprocessing(msg: impl Into<String>) -> Self {
        Self::Preprocessing(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
