//! Investment products offered to users and their characteristic bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative level used for both volatility and expected return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Band {
    pub fn as_str(self) -> &'static str {
        match self {
            Band::VeryLow => "Very Low",
            Band::Low => "Low",
            Band::Medium => "Medium",
            Band::High => "High",
            Band::VeryHigh => "Very High",
        }
    }

    /// Illustrative long-run average annual return for a return band.
    pub fn annual_return_rate(self) -> f64 {
        match self {
            Band::VeryLow => 0.04,
            Band::Low => 0.06,
            Band::Medium => 0.08,
            Band::High => 0.12,
            Band::VeryHigh => 0.15,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "verylow" => Ok(Band::VeryLow),
            "low" => Ok(Band::Low),
            "medium" => Ok(Band::Medium),
            "high" => Ok(Band::High),
            "veryhigh" => Ok(Band::VeryHigh),
            _ => Err(format!("unknown band '{s}'")),
        }
    }
}

/// An investment the suitability model is asked about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProduct {
    pub code: String,
    pub volatility: Band,
    pub expected_return: Band,
}

impl InvestmentProduct {
    pub fn new(code: impl Into<String>, volatility: Band, expected_return: Band) -> Self {
        Self {
            code: code.into(),
            volatility,
            expected_return,
        }
    }
}

/// Standard product line-up, in presentation order.
pub fn default_catalog() -> Vec<InvestmentProduct> {
    use Band::*;
    vec![
        InvestmentProduct::new("FD", VeryLow, VeryLow),
        InvestmentProduct::new("PPF", VeryLow, Low),
        InvestmentProduct::new("DebtMF", Low, Low),
        InvestmentProduct::new("IndexFund", Medium, Medium),
        InvestmentProduct::new("BalancedMF", Medium, Medium),
        InvestmentProduct::new("LargeCapMF", High, High),
        InvestmentProduct::new("MidSmallCapMF", VeryHigh, VeryHigh),
        InvestmentProduct::new("DirectEquity", VeryHigh, VeryHigh),
    ]
}
