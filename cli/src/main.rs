//! CLI entrypoint for consilium
//!
//! Wires the layers together with dependency injection, runs one
//! directive end-to-end and prints the decision package.

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use consilium_application::{seed_context, AuditTrail, RunDirectiveUseCase};
use consilium_infrastructure::{
    default_workers, ConfigLoader, GovernanceEngine, JsonlAuditExport, MemoryAuditTrail,
    MemoryStateStore, MockEnterpriseData, PatternIntentParser,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable decision package
    Text,
    /// Full package as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "consilium", about = "Coordinate functional workers on a business directive")]
struct Cli {
    /// The directive to process
    directive: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append every audit record to this JSONL file
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?;
    info!("Starting consilium");

    // === Dependency Injection ===
    let store = Arc::new(MemoryStateStore::new());
    let audit = Arc::new(MemoryAuditTrail::new());
    if let Some(path) = &cli.audit_log {
        if let Some(export) = JsonlAuditExport::new(path) {
            audit.register_observer(Arc::new(export));
        }
    }
    let governance = Arc::new(GovernanceEngine::new(
        config.auto_approval_limits(),
        config.escalation_policy(),
    ));

    seed_context(store.as_ref(), &config.seed_context());

    let use_case = RunDirectiveUseCase::new(
        store,
        audit,
        governance,
        Arc::new(PatternIntentParser::default()),
        Arc::new(MockEnterpriseData::new()),
        default_workers(),
    )
    .with_conflict_policy(config.conflict_policy());

    let package = use_case.execute(&cli.directive).await?;

    match cli.format {
        OutputFormat::Text => println!("{}", render::render(&package)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&package)?),
    }

    Ok(())
}
