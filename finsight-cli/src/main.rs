//! Finsight CLI: explain risk-profile and investment-suitability predictions
//! from the terminal.

mod commands;

use clap::Parser;
use finsight_ml::ExplanationKind;
use finsight_ml::advice::{Band, Compounding};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Finsight: explainable financial-profile advice
#[derive(Parser, Debug)]
#[command(name = "finsight", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Format an attribution request (JSON) into an explanation
    Explain {
        /// Path to the request JSON
        request: PathBuf,
        /// Override the request's bullet cap
        #[arg(long)]
        max_lines: Option<usize>,
        /// Override the request's explanation kind (risk, investment, generic)
        #[arg(long)]
        kind: Option<ExplanationKind>,
        /// Print the structured explanation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assess a profile (JSON) and recommend suitable investments
    Advise {
        /// Path to the profile JSON
        profile: PathBuf,
        /// Risk model bundle (defaults to the configured path)
        #[arg(long)]
        risk_bundle: Option<PathBuf>,
        /// Investment model bundle (defaults to the configured path)
        #[arg(long)]
        investment_bundle: Option<PathBuf>,
        /// Print the advice as JSON
        #[arg(long)]
        json: bool,
    },
    /// Project lump-sum growth for a return band
    Project {
        #[arg(long)]
        principal: f64,
        /// Expected return band, e.g. "Very High"
        #[arg(long)]
        band: Band,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value = "annually")]
        compounding: Compounding,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Create a default workspace configuration file
    Init,
    /// Show the effective configuration
    Show,
    /// Print the configuration file locations
    Path,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "finsight", "finsight")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "finsight.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace, cli.config.as_deref())
}
