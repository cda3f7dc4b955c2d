use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vibesip_core::settings::Settings;
use vibesip_seed::{default_seed_path, run_seed, FAILURE_MESSAGE, SUCCESS_MESSAGE};

#[derive(Parser, Debug)]
#[command(
    name = "vibesip-seed",
    version,
    about = "Import the Vibe & Sip catalog seed file into Postgres"
)]
struct Cli {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Seed file to import (defaults to the repository's data/seedData.ts)
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibesip_seed=info,vibesip_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().with_database_url(cli.database_url);
    let seed_file = cli.seed_file.unwrap_or_else(default_seed_path);

    match run_seed(&settings, &seed_file).await {
        Ok(summary) => {
            tracing::info!(?summary, "Seed run finished");
            println!("{SUCCESS_MESSAGE}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Seed run failed");
            println!("{FAILURE_MESSAGE}");
            Err(e.into())
        }
    }
}
