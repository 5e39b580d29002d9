//! Compound-growth projection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    #[default]
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
}

impl Compounding {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Annually => 1,
            Compounding::SemiAnnually => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Compounding::Annually => "annually",
            Compounding::SemiAnnually => "semi-annually",
            Compounding::Quarterly => "quarterly",
            Compounding::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Compounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annually" => Ok(Compounding::Annually),
            "semi-annually" | "semi_annually" => Ok(Compounding::SemiAnnually),
            "quarterly" => Ok(Compounding::Quarterly),
            "monthly" => Ok(Compounding::Monthly),
            other => Err(format!("unknown compounding frequency '{other}'")),
        }
    }
}

/// Projected value of a lump sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub projected_value: f64,
    pub total_growth: f64,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `P (1 + r/n)^(n t)`, rounded to cents. A non-finite result projects no growth.
pub fn project_growth(
    principal: f64,
    annual_rate: f64,
    years: u32,
    compounding: Compounding,
) -> Projection {
    let n = f64::from(compounding.periods_per_year());
    let value = principal * (1.0 + annual_rate / n).powf(n * f64::from(years));

    let (projected_value, total_growth) = if value.is_finite() {
        (round_cents(value), round_cents(value - principal))
    } else {
        tracing::warn!(principal, annual_rate, years, "Projection overflowed, reporting no growth");
        (principal, 0.0)
    };

    Projection {
        principal,
        annual_rate,
        years,
        projected_value,
        total_growth,
    }
}
