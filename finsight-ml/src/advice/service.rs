//! Advice pipeline: risk assessment, investment suitability, projections.

use super::catalog::{InvestmentProduct, default_catalog};
use super::projection::{Projection, project_growth};
use crate::config::{FinsightConfig, ProjectionConfig};
use crate::error::FinsightError;
use crate::features::{InputRecord, InputValue};
use crate::inference::ModelBundle;
use crate::interpretability::{AttributionFormatter, ExplanationKind};
use serde::{Deserialize, Serialize};

/// Profile fields the risk model is trained on.
pub const RISK_FEATURES: [&str; 8] = [
    "AgeRange",
    "IncomeRange",
    "SavingsLevel",
    "DebtLevel",
    "HasDependents",
    "PrimaryGoal",
    "TimeHorizonYears",
    "SelfReportedTolerance",
];

/// Fields of the record the investment model scores.
pub const INVESTMENT_FEATURES: [&str; 7] = [
    "RiskProfile",
    "InvestmentKnowledge",
    "LiquidityNeeds",
    "TimeHorizonYears",
    "InvestmentType",
    "InvestmentVolRange",
    "InvestmentRetRange",
];

const SUITABLE_LABEL: &str = "Suitable";

/// Plain-language summary of a risk profile.
pub fn risk_profile_description(profile: &str) -> &'static str {
    match profile {
        "Conservative" => {
            "This suggests you generally prefer safer options for your money, even if it means \
             slower growth. You likely prioritize protecting your initial investment over taking \
             big chances for potentially high returns. This approach is often suitable for \
             short-term goals or those nearing retirement."
        }
        "Moderate" => {
            "This indicates you're comfortable taking some calculated risks for potentially \
             better returns than very safe options. You're looking for a balance: aiming for good \
             growth over time without taking extreme chances. This approach often fits \
             medium-to-long-term goals."
        }
        "Aggressive" => {
            "This suggests you are comfortable with taking significant risks for the chance of \
             achieving higher long-term growth. You understand that investments might go up and \
             down quite a bit, but you're focused on the potential for greater rewards over a \
             longer period. This is often suitable for long-term goals where you have time to \
             ride out market fluctuations."
        }
        _ => "Your risk profile helps determine suitable investment strategies.",
    }
}

/// Predicted risk profile with its explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub profile: String,
    pub probabilities: Vec<f64>,
    /// Attribution-based explanation.
    pub explanation: String,
    /// Static description of the profile.
    pub description: String,
}

/// An investment predicted suitable for the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRecommendation {
    pub investment: String,
    pub suitability: String,
    pub explanation: String,
    pub projection: Projection,
}

/// Full advice for one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advice {
    pub risk: RiskAssessment,
    pub investments: Vec<InvestmentRecommendation>,
}

/// Runs both models over a profile. Bundles are borrowed from the caller.
pub struct AdviceService<'a> {
    risk_model: &'a ModelBundle,
    investment_model: &'a ModelBundle,
    formatter: AttributionFormatter,
    catalog: Vec<InvestmentProduct>,
    projection: ProjectionConfig,
}

impl<'a> AdviceService<'a> {
    pub fn new(
        risk_model: &'a ModelBundle,
        investment_model: &'a ModelBundle,
        config: &FinsightConfig,
    ) -> Self {
        Self {
            risk_model,
            investment_model,
            formatter: AttributionFormatter::new(config.explanation.clone()),
            catalog: default_catalog(),
            projection: config.projection.clone(),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<InvestmentProduct>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &[InvestmentProduct] {
        &self.catalog
    }

    /// Predict and explain the user's risk profile.
    pub fn assess_risk(&self, profile: &InputRecord) -> Result<RiskAssessment, FinsightError> {
        let missing = profile.missing_fields(&RISK_FEATURES);
        if !missing.is_empty() {
            return Err(FinsightError::MissingFields(missing));
        }

        let prediction = self.risk_model.predict_and_explain(profile)?;
        let request = prediction.explanation_request(profile.clone(), ExplanationKind::Risk);
        let explanation = self.formatter.format(&request);
        tracing::info!(profile = %prediction.label, "Risk profile assessed");

        Ok(RiskAssessment {
            description: risk_profile_description(&prediction.label).to_string(),
            profile: prediction.label,
            probabilities: prediction.probabilities,
            explanation,
        })
    }

    /// Record the investment model scores for `product`.
    pub fn investment_input(
        profile: &InputRecord,
        risk_profile: &str,
        product: &InvestmentProduct,
    ) -> InputRecord {
        let from_profile = |field: &str| profile.get(field).cloned().unwrap_or(InputValue::Null);

        let mut input = InputRecord::new();
        input.insert("RiskProfile", risk_profile);
        input.insert("InvestmentKnowledge", from_profile("InvestmentKnowledge"));
        input.insert("LiquidityNeeds", from_profile("LiquidityNeeds"));
        input.insert("TimeHorizonYears", from_profile("TimeHorizonYears"));
        input.insert("InvestmentType", product.code.as_str());
        input.insert("InvestmentVolRange", product.volatility.as_str());
        input.insert("InvestmentRetRange", product.expected_return.as_str());
        input
    }

    /// Every catalog product the investment model rates suitable, explained
    /// and projected. Products that fail to score are logged and skipped.
    pub fn recommend_investments(
        &self,
        profile: &InputRecord,
        risk_profile: &str,
    ) -> Vec<InvestmentRecommendation> {
        let mut recommendations = Vec::new();

        for product in &self.catalog {
            let input = Self::investment_input(profile, risk_profile, product);
            let prediction = match self.investment_model.predict_and_explain(&input) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(
                        investment = %product.code,
                        error = %e,
                        "Suitability prediction failed"
                    );
                    continue;
                }
            };
            if prediction.label != SUITABLE_LABEL {
                tracing::debug!(
                    investment = %product.code,
                    label = %prediction.label,
                    "Not suitable"
                );
                continue;
            }

            let request = prediction.explanation_request_as(
                input,
                ExplanationKind::Investment,
                SUITABLE_LABEL,
            );
            let projection = project_growth(
                self.projection.principal,
                product.expected_return.annual_return_rate(),
                self.projection.years,
                self.projection.compounding,
            );

            recommendations.push(InvestmentRecommendation {
                investment: product.code.clone(),
                suitability: SUITABLE_LABEL.to_string(),
                explanation: self.formatter.format(&request),
                projection,
            });
        }

        tracing::info!(
            risk_profile,
            suitable = recommendations.len(),
            "Investment recommendations generated"
        );
        recommendations
    }

    /// Risk assessment followed by investment recommendations for that profile.
    pub fn generate_advice(&self, profile: &InputRecord) -> Result<Advice, FinsightError> {
        let risk = self.assess_risk(profile)?;
        let investments = self.recommend_investments(profile, &risk.profile);
        Ok(Advice { risk, investments })
    }
}
