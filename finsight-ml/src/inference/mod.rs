//! Inference: loaded model bundles, prediction, and attribution.

pub mod bundle;
pub mod model;

pub use bundle::{ModelBundle, Prediction};
pub use model::{AttributionExplainer, Classifier, LinearModel};
