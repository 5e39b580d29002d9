//! # finsight-ml — explainable risk and investment-suitability advice
//!
//! This crate maps per-column model attributions back onto the inputs a user
//! actually entered and phrases them as short ranked explanations. Around that
//! formatter it provides the pieces an advice request needs:
//!
//! 1. **Features**: raw input records, encoded column names, column transforms
//! 2. **Interpretability**: attribution folding, ranking, and phrasing
//! 3. **Inference**: model bundles loaded once and passed by reference
//! 4. **Advice**: risk assessment, investment suitability, growth projection

pub mod config;
pub mod error;

pub mod advice;
pub mod features;
pub mod inference;
pub mod interpretability;

// Re-exports
pub use config::{FinsightConfig, load_config};
pub use error::FinsightError;
pub use features::{InputRecord, InputValue};
pub use inference::ModelBundle;
pub use interpretability::{
    AttributionFormatter, AttributionRequest, Explanation, ExplanationError, ExplanationKind,
};
