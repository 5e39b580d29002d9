//! Interpretability: mapping model attributions back to user inputs and
//! phrasing them as explanations.

pub mod attribution;
pub mod formatter;
pub mod phrasing;

pub use attribution::{Contribution, fold_contributions, rank_contributions};
pub use formatter::{
    AttributionFormatter, AttributionRequest, Explanation, ExplanationError, ExplanationLine,
};
pub use phrasing::{ExplanationKind, Strength, friendly_label};
