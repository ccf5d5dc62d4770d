use clap::Parser;
use miette::{IntoDiagnostic, Result};
use purs_bundler::application::orchestrator::BundleOrchestrator;
use purs_bundler::domain::purchase::{PromotionRequest, PurchaseRequest};
use purs_bundler::infrastructure::id::RandIdGenerator;
use purs_bundler::infrastructure::recording::RecordingExecutor;
use serde::Deserialize;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Dry-run a purchase bundle: validate the request, sequence the writes
/// against a recording store, and print the resulting receipt.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bundle request JSON file
    input: PathBuf,

    /// Also print the statements the bundle would execute
    #[arg(long)]
    show_statements: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BundleRequest {
    purchase: PurchaseRequest,
    #[serde(default)]
    promotion: PromotionRequest,
    scope: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.input).into_diagnostic()?;
    let request: BundleRequest = serde_json::from_reader(file).into_diagnostic()?;

    let executor = RecordingExecutor::new();
    let orchestrator =
        BundleOrchestrator::new(Box::new(executor.clone()), Box::new(RandIdGenerator));

    let receipt = orchestrator
        .execute_bundle(&request.purchase, &request.promotion, &request.scope)
        .await
        .into_diagnostic()?;

    if cli.show_statements {
        for call in executor.calls().await {
            println!("-- scope {}", call.scope.token());
            println!("{}", call.sql);
            for set in &call.param_sets {
                let rendered: Vec<String> =
                    set.iter().map(|(name, value)| format!("{name}={value:?}")).collect();
                println!("   [{}]", rendered.join(", "));
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&receipt).into_diagnostic()?);

    Ok(())
}
