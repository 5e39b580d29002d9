//! Advice: investment catalog, growth projection, and the advice pipeline.

pub mod catalog;
pub mod projection;
pub mod service;

pub use catalog::{Band, InvestmentProduct, default_catalog};
pub use projection::{Compounding, Projection, project_growth};
pub use service::{
    Advice, AdviceService, INVESTMENT_FEATURES, InvestmentRecommendation, RISK_FEATURES,
    RiskAssessment, risk_profile_description,
};
