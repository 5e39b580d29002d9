//! Configuration types for Finsight.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> explicit file -> environment.

use crate::advice::projection::Compounding;
use crate::error::FinsightError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinsightConfig {
    /// Attribution formatter thresholds and wording options.
    #[serde(default)]
    pub explanation: ExplanationConfig,
    /// Growth projection shown next to suitable investments.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Locations of the serialized model bundles.
    #[serde(default)]
    pub models: ModelPathsConfig,
}

/// Attribution formatter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplanationConfig {
    /// A field is only mentioned when its absolute aggregated score is strictly above this.
    #[serde(default = "default_significance_floor")]
    pub significance_floor: f64,
    /// Positive scores strictly above this get the "key factor" phrasing.
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
    /// Positive scores strictly above this (and not strong) get the "supports" phrasing.
    #[serde(default = "default_weak_threshold")]
    pub weak_threshold: f64,
    /// Bullet cap used when a request does not carry its own.
    #[serde(default = "default_max_lines")]
    pub default_max_lines: usize,
    /// Fields rendered as `(Yes)` / `(No)` instead of their raw stored value.
    #[serde(default = "default_boolean_fields")]
    pub boolean_fields: Vec<String>,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            significance_floor: default_significance_floor(),
            strong_threshold: default_strong_threshold(),
            weak_threshold: default_weak_threshold(),
            default_max_lines: default_max_lines(),
            boolean_fields: default_boolean_fields(),
        }
    }
}

fn default_significance_floor() -> f64 {
    0.01
}

fn default_strong_threshold() -> f64 {
    0.02
}

fn default_weak_threshold() -> f64 {
    0.01
}

fn default_max_lines() -> usize {
    3
}

fn default_boolean_fields() -> Vec<String> {
    vec!["HasDependents".to_string()]
}

/// Growth projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionConfig {
    /// Amount projected for every suitable investment.
    #[serde(default = "default_principal")]
    pub principal: f64,
    /// Projection horizon in years.
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default)]
    pub compounding: Compounding,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            years: default_years(),
            compounding: Compounding::default(),
        }
    }
}

fn default_principal() -> f64 {
    100_000.0
}

fn default_years() -> u32 {
    5
}

/// Model bundle locations. Relative paths resolve against the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelPathsConfig {
    #[serde(default = "default_risk_bundle")]
    pub risk_bundle: PathBuf,
    #[serde(default = "default_investment_bundle")]
    pub investment_bundle: PathBuf,
}

impl Default for ModelPathsConfig {
    fn default() -> Self {
        Self {
            risk_bundle: default_risk_bundle(),
            investment_bundle: default_investment_bundle(),
        }
    }
}

fn default_risk_bundle() -> PathBuf {
    PathBuf::from("models/risk_bundle.json")
}

fn default_investment_bundle() -> PathBuf {
    PathBuf::from("models/investment_bundle.json")
}

/// User-level config file (`~/.config/finsight/config.toml` on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "finsight", "finsight")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Workspace-level config file.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".finsight").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `FINSIGHT_`, `__` for nesting)
/// 2. Explicit config file (if given)
/// 3. Workspace-local config (`.finsight/config.toml`)
/// 4. User config
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<FinsightConfig, FinsightError> {
    let mut figment = Figment::from(Serialized::defaults(FinsightConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(FinsightError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    // FINSIGHT_EXPLANATION__SIGNIFICANCE_FLOOR, FINSIGHT_PROJECTION__YEARS, ...
    figment = figment.merge(Env::prefixed("FINSIGHT_").split("__"));

    figment
        .extract()
        .map_err(|e| FinsightError::config(e.to_string()))
}
