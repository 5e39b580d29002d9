//! Subcommand handlers.

use crate::{Commands, ConfigAction};
use finsight_ml::advice::{Advice, AdviceService, project_growth};
use finsight_ml::config::{self, FinsightConfig};
use finsight_ml::{AttributionFormatter, AttributionRequest, InputRecord, ModelBundle};
use std::path::{Path, PathBuf};

pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config_file),
        Commands::Explain {
            request,
            max_lines,
            kind,
            json,
        } => {
            let config = load(workspace, config_file)?;
            let mut request = read_request(&request)?;
            if max_lines.is_some() {
                request.max_lines = max_lines;
            }
            if let Some(kind) = kind {
                request.kind = kind;
            }
            println!("{}", explain(&config, &request, json)?);
            Ok(())
        }
        Commands::Advise {
            profile,
            risk_bundle,
            investment_bundle,
            json,
        } => {
            let config = load(workspace, config_file)?;
            let risk_path = resolve(
                workspace,
                risk_bundle.unwrap_or(config.models.risk_bundle.clone()),
            );
            let investment_path = resolve(
                workspace,
                investment_bundle.unwrap_or(config.models.investment_bundle.clone()),
            );
            tracing::debug!(
                risk = %risk_path.display(),
                investment = %investment_path.display(),
                "Loading model bundles"
            );
            let risk = ModelBundle::load(&risk_path)?;
            let investment = ModelBundle::load(&investment_path)?;

            let content = std::fs::read_to_string(&profile)?;
            let profile: InputRecord = serde_json::from_str(&content)?;
            let advice = AdviceService::new(&risk, &investment, &config).generate_advice(&profile)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&advice)?);
            } else {
                println!("{}", render_advice(&advice, &config));
            }
            Ok(())
        }
        Commands::Project {
            principal,
            band,
            years,
            compounding,
        } => {
            let projection =
                project_growth(principal, band.annual_return_rate(), years, compounding);
            println!(
                "{:.2} at {:.1}% ({band}) compounded {compounding} for {years} years -> \
                 {:.2} (growth {:.2})",
                projection.principal,
                projection.annual_rate * 100.0,
                projection.projected_value,
                projection.total_growth
            );
            Ok(())
        }
    }
}

fn load(workspace: &Path, config_file: Option<&Path>) -> anyhow::Result<FinsightConfig> {
    config::load_config(Some(workspace), config_file)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
}

fn resolve(workspace: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        workspace.join(path)
    }
}

fn read_request(path: &Path) -> anyhow::Result<AttributionRequest> {
    tracing::debug!(path = %path.display(), "Reading attribution request");
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read request {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&content)?)
}

fn explain(
    config: &FinsightConfig,
    request: &AttributionRequest,
    json: bool,
) -> anyhow::Result<String> {
    let formatter = AttributionFormatter::new(config.explanation.clone());
    if !json {
        return Ok(formatter.format(request));
    }
    let value = match formatter.try_format(request) {
        Ok(explanation) => serde_json::to_value(&explanation)?,
        Err(err) => serde_json::json!({
            "error": err.to_string(),
            "message": err.fallback_message(),
        }),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn render_advice(advice: &Advice, config: &FinsightConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("Risk profile: {}\n\n", advice.risk.profile));
    out.push_str(&advice.risk.description);
    out.push_str("\n\n");
    out.push_str(&advice.risk.explanation);
    out.push_str("\n\n");

    if advice.investments.is_empty() {
        out.push_str("No standard investments were deemed suitable for this profile.\n");
        return out;
    }

    out.push_str(&format!(
        "Suitable investments (projecting {:.2} over {} years, compounded {}):\n",
        config.projection.principal, config.projection.years, config.projection.compounding
    ));
    for rec in &advice.investments {
        out.push_str(&format!(
            "\n## {}  ({:.1}% p.a. -> {:.2}, growth {:.2})\n{}\n",
            rec.investment,
            rec.projection.annual_rate * 100.0,
            rec.projection.projected_value,
            rec.projection.total_growth,
            rec.explanation
        ));
    }
    out
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = config::workspace_config_path(workspace);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            if let Some(dir) = config_path.parent() {
                std::fs::create_dir_all(dir)?;
            }

            let toml_str = toml::to_string_pretty(&FinsightConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = load(workspace, config_file)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Path => {
            match config::user_config_path() {
                Some(p) => println!("user:      {}", p.display()),
                None => println!("user:      (no home directory)"),
            }
            println!(
                "workspace: {}",
                config::workspace_config_path(workspace).display()
            );
            if let Some(p) = config_file {
                println!("explicit:  {}", p.display());
            }
            Ok(())
        }
    }
}
