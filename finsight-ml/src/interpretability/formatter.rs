//! Attribution formatter. Turns per-column model attributions into a short,
//! ranked, plain-language explanation of which inputs drove an outcome.
//!
//! The formatter is a pure function of its request and configuration. It never
//! fails: [`AttributionFormatter::format`] degrades every error to a fixed
//! message, and [`AttributionFormatter::try_format`] exposes which branch fired.

use super::attribution::{Contribution, fold_contributions, rank_contributions};
use super::phrasing::{
    ExplanationKind, INSUFFICIENT_DATA_MESSAGE, LENGTH_MISMATCH_MESSAGE, MIXED_INFLUENCE_MESSAGE,
    NO_STANDOUT_FACTOR_MESSAGE, Strength, friendly_label,
};
use crate::config::ExplanationConfig;
use crate::features::InputRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an explanation could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplanationError {
    #[error("attributions, encoded names, or original input are empty")]
    InsufficientInput,

    #[error("{attributions} attributions for {names} encoded feature names")]
    LengthMismatch { attributions: usize, names: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("no encoded feature maps back to an original input field")]
    NoMappableContribution,

    #[error("no contribution is significant and supportive")]
    NoSignificantContribution,
}

impl ExplanationError {
    /// User-facing text shown in place of an explanation.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ExplanationError::InsufficientInput | ExplanationError::MalformedInput(_) => {
                INSUFFICIENT_DATA_MESSAGE
            }
            ExplanationError::LengthMismatch { .. } => LENGTH_MISMATCH_MESSAGE,
            ExplanationError::NoMappableContribution => NO_STANDOUT_FACTOR_MESSAGE,
            ExplanationError::NoSignificantContribution => MIXED_INFLUENCE_MESSAGE,
        }
    }
}

/// Everything needed to explain one prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionRequest {
    /// One signed score per encoded column.
    pub attributions: Vec<f64>,
    /// Encoded column names, same length and order as `attributions`.
    pub encoded_names: Vec<String>,
    /// Raw values the subject actually has.
    pub original_input: InputRecord,
    /// The predicted class being explained.
    pub outcome_label: String,
    #[serde(default)]
    pub kind: ExplanationKind,
    /// Bullet cap; the configured default applies when unset.
    #[serde(default)]
    pub max_lines: Option<usize>,
}

impl AttributionRequest {
    pub fn new(
        attributions: Vec<f64>,
        encoded_names: Vec<String>,
        original_input: InputRecord,
        outcome_label: impl Into<String>,
        kind: ExplanationKind,
    ) -> Self {
        Self {
            attributions,
            encoded_names,
            original_input,
            outcome_label: outcome_label.into(),
            kind,
            max_lines: None,
        }
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }
}

/// One rendered bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationLine {
    pub field: String,
    pub label: String,
    pub value_display: Option<String>,
    pub score: f64,
    pub strength: Strength,
    pub text: String,
}

/// A successful explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub kind: ExplanationKind,
    pub outcome_label: String,
    pub intro: String,
    pub lines: Vec<ExplanationLine>,
    /// Significant contributions, ranked.
    pub contributions: Vec<Contribution>,
}

impl Explanation {
    /// Intro sentence followed by one bullet per line.
    pub fn render(&self) -> String {
        let bullets: Vec<&str> = self.lines.iter().map(|l| l.text.as_str()).collect();
        format!("{}\n\n{}", self.intro, bullets.join("\n"))
    }
}

/// Formats attribution vectors into explanations.
#[derive(Debug, Clone, Default)]
pub struct AttributionFormatter {
    config: ExplanationConfig,
}

impl AttributionFormatter {
    pub fn new(config: ExplanationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplanationConfig {
        &self.config
    }

    /// Render an explanation, or the fallback message for whichever branch
    /// prevented one. Never panics on well-typed input.
    pub fn format(&self, request: &AttributionRequest) -> String {
        match self.try_format(request) {
            Ok(explanation) => explanation.render(),
            Err(err) => err.fallback_message().to_string(),
        }
    }

    pub fn try_format(
        &self,
        request: &AttributionRequest,
    ) -> Result<Explanation, ExplanationError> {
        let result = self.build(request);
        match &result {
            Ok(explanation) => tracing::debug!(
                kind = %request.kind,
                lines = explanation.lines.len(),
                "Explanation built"
            ),
            Err(
                err @ (ExplanationError::LengthMismatch { .. }
                | ExplanationError::MalformedInput(_)),
            ) => {
                tracing::warn!(kind = %request.kind, error = %err, "Explanation unavailable")
            }
            Err(err) => {
                tracing::debug!(kind = %request.kind, reason = %err, "Explanation degraded")
            }
        }
        result
    }

    fn build(&self, request: &AttributionRequest) -> Result<Explanation, ExplanationError> {
        if request.attributions.is_empty()
            || request.encoded_names.is_empty()
            || request.original_input.is_empty()
        {
            return Err(ExplanationError::InsufficientInput);
        }

        let contributions = fold_contributions(
            &request.attributions,
            &request.encoded_names,
            &request.original_input,
        )?;
        if contributions.is_empty() {
            return Err(ExplanationError::NoMappableContribution);
        }

        let ranked = rank_contributions(contributions, self.config.significance_floor);
        if ranked.is_empty() {
            return Err(ExplanationError::NoSignificantContribution);
        }

        let max_lines = request
            .max_lines
            .unwrap_or(self.config.default_max_lines)
            .max(1);
        // Negative contributions still occupy a top slot; they just render nothing.
        let lines: Vec<ExplanationLine> = ranked
            .iter()
            .take(max_lines)
            .filter_map(|c| self.render_line(c, request))
            .collect();
        if lines.is_empty() {
            return Err(ExplanationError::NoSignificantContribution);
        }

        Ok(Explanation {
            kind: request.kind,
            outcome_label: request.outcome_label.clone(),
            intro: request.kind.intro(&request.outcome_label),
            lines,
            contributions: ranked,
        })
    }

    fn strength(&self, score: f64) -> Option<Strength> {
        if score > self.config.strong_threshold {
            Some(Strength::Strong)
        } else if score > self.config.weak_threshold {
            Some(Strength::Supporting)
        } else {
            None
        }
    }

    fn value_display(&self, field: &str, input: &InputRecord) -> Option<String> {
        if self.config.boolean_fields.iter().any(|f| f == field) {
            let yes = input.get(field).is_some_and(|v| v.is_affirmative());
            return Some(format!(" ({})", if yes { "Yes" } else { "No" }));
        }
        input.present(field).map(|v| format!(" ('{v}')"))
    }

    fn render_line(
        &self,
        contribution: &Contribution,
        request: &AttributionRequest,
    ) -> Option<ExplanationLine> {
        let strength = self.strength(contribution.score)?;
        let label = friendly_label(&contribution.field);
        let value_display = self.value_display(&contribution.field, &request.original_input);
        let phrase = request.kind.phrase(strength, &request.outcome_label);
        let text = format!(
            "*   **{label}{}:** {phrase}",
            value_display.as_deref().unwrap_or("")
        );

        Some(ExplanationLine {
            field: contribution.field.clone(),
            label,
            value_display,
            score: contribution.score,
            strength,
            text,
        })
    }
}
