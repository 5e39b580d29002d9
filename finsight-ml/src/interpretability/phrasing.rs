//! Wording for explanations: intros, phrase banks, field labels, fallback messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when inputs are empty, absent, or malformed.
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "*We considered your overall profile, but a detailed breakdown is unavailable.*";

/// Returned when the caller passes attribution and name lists of different lengths.
pub const LENGTH_MISMATCH_MESSAGE: &str =
    "*Explanation error: attribution and feature lists are out of step.*";

/// Returned when no encoded column maps back to an original input field.
pub const NO_STANDOUT_FACTOR_MESSAGE: &str =
    "*Overall profile considered, no single input stood out significantly.*";

/// Returned when fields mapped but none is significant and supportive.
pub const MIXED_INFLUENCE_MESSAGE: &str =
    "*Profile assessed, factors had mixed or only minor influence.*";

/// Which outcome is being explained. Selects the intro and the phrase bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationKind {
    Risk,
    Investment,
    #[default]
    Generic,
}

/// How strongly a factor pushes toward the explained outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Supporting,
}

impl ExplanationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExplanationKind::Risk => "risk",
            ExplanationKind::Investment => "investment",
            ExplanationKind::Generic => "generic",
        }
    }

    /// Lead sentence naming the explained outcome.
    pub fn intro(self, outcome_label: &str) -> String {
        match self {
            ExplanationKind::Risk => format!(
                "Here's what primarily led to the **'{outcome_label}'** risk profile assessment:"
            ),
            ExplanationKind::Investment => {
                format!("Here's why this investment is considered **'{outcome_label}'** for you:")
            }
            ExplanationKind::Generic => {
                format!("**Key factors in the '{outcome_label}' decision:**")
            }
        }
    }

    /// Phrase closing a bullet.
    pub fn phrase(self, strength: Strength, outcome_label: &str) -> String {
        match (self, strength) {
            (ExplanationKind::Risk, Strength::Strong) => {
                format!("Key factor for '{outcome_label}' profile.")
            }
            (ExplanationKind::Risk, Strength::Supporting) => {
                format!("Aligns with '{outcome_label}' approach.")
            }
            (ExplanationKind::Investment, Strength::Strong) => {
                "Strong reason this investment is suitable.".to_string()
            }
            (ExplanationKind::Investment, Strength::Supporting) => {
                "Supports this investment's suitability.".to_string()
            }
            (ExplanationKind::Generic, Strength::Strong) => {
                "Key factor in this decision.".to_string()
            }
            (ExplanationKind::Generic, Strength::Supporting) => {
                "Contributes to this decision.".to_string()
            }
        }
    }
}

impl fmt::Display for ExplanationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExplanationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "risk" => Ok(ExplanationKind::Risk),
            "investment" => Ok(ExplanationKind::Investment),
            "generic" => Ok(ExplanationKind::Generic),
            other => Err(format!(
                "unknown explanation kind '{other}' (expected risk, investment or generic)"
            )),
        }
    }
}

/// User-facing label for an original input field.
pub fn friendly_label(field: &str) -> String {
    let known = match field {
        "AgeRange" => "Your age group",
        "IncomeRange" => "Your income level",
        "SavingsLevel" => "Your savings level",
        "DebtLevel" => "Your debt level",
        "HasDependents" => "Having dependents",
        "PrimaryGoal" => "Your primary goal",
        "TimeHorizonYears" => "Your investment time horizon",
        "SelfReportedTolerance" => "Your stated risk comfort",
        "InvestmentKnowledge" => "Your investment knowledge",
        "LiquidityNeeds" => "Your liquidity needs",
        "RiskProfile" => "Your overall risk profile",
        "InvestmentType" => "The type of investment",
        "InvestmentVolRange" => "Investment's typical volatility",
        "InvestmentRetRange" => "Investment's potential return",
        _ => return humanize_field(field),
    };
    known.to_string()
}

/// `MonthlySIPAmount` -> `Monthly sip amount`, `emergency_fund` -> `Emergency fund`.
pub fn humanize_field(field: &str) -> String {
    let chars: Vec<char> = field.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let sentence = words.join(" ").to_lowercase();
    let mut out = String::with_capacity(sentence.len());
    let mut sentence_chars = sentence.chars();
    if let Some(first) = sentence_chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(sentence_chars.as_str());
    }
    out
}
