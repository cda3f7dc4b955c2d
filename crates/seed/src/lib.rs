//! Seed runner: loads the catalog seed file and imports it into Postgres
//! in a single all-or-nothing transaction.
//!
//! The sequence is:
//!
//! 1. Resolve the database URL (fatal if unset).
//! 2. Read and parse the seed file. Parse failures abort before any
//!    connection is opened.
//! 3. Connect and apply migrations.
//! 4. Upsert every entity and wire cocktail relationships.
//! 5. Verify storage against the seed. Any problem rolls the whole
//!    transaction back; otherwise it is committed.

use std::path::{Path, PathBuf};

use sqlx::PgConnection;
use vibesip_core::error::CoreError;
use vibesip_core::seed::{SeedData, SeedError};
use vibesip_core::settings::Settings;
use vibesip_db::repositories::seed_repo::{SeedImportError, SeedSummary};
use vibesip_db::repositories::SeedRepo;
use vibesip_db::DbPool;

/// Seed file shipped with the repository.
pub const DEFAULT_SEED_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/seedData.ts");

pub const SUCCESS_MESSAGE: &str = "Seed successful: all entities inserted and verified.";
pub const FAILURE_MESSAGE: &str = "Seed failed: see error details above.";

#[derive(Debug, thiserror::Error)]
pub enum SeedRunError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Import(#[from] SeedImportError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub fn default_seed_path() -> PathBuf {
    PathBuf::from(DEFAULT_SEED_FILE)
}

/// Read and parse a seed file without touching the database.
pub fn load_seed_data(path: &Path) -> Result<SeedData, SeedRunError> {
    let source = std::fs::read_to_string(path).map_err(|source| SeedRunError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = SeedData::from_source(&source)?;

    tracing::info!(
        path = %path.display(),
        vibes = data.vibes.len(),
        occasions = data.occasions.len(),
        difficulties = data.difficulties.len(),
        alcohol_levels = data.alcohol_levels.len(),
        cocktails = data.cocktails.len(),
        "Seed file parsed",
    );
    Ok(data)
}

/// Full seed run: parse, connect, migrate, import and verify.
pub async fn run_seed(settings: &Settings, seed_file: &Path) -> Result<SeedSummary, SeedRunError> {
    let database_url = settings.database_url()?;
    let data = load_seed_data(seed_file)?;

    let pool = vibesip_db::create_pool(database_url).await?;
    vibesip_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let summary = run_seed_on_pool(&pool, &data).await;
    pool.close().await;
    summary
}

/// Import `data` inside one transaction, committing only when the
/// post-import check finds nothing missing.
pub async fn run_seed_on_pool(pool: &DbPool, data: &SeedData) -> Result<SeedSummary, SeedRunError> {
    let mut tx = pool.begin().await?;

    match import_and_verify(&mut tx, data).await {
        Ok(summary) => {
            tx.commit().await?;
            tracing::info!("Seed transaction committed");
            Ok(summary)
        }
        Err(e) => {
            tracing::error!(error = %e, "Seed import failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}

async fn import_and_verify(
    conn: &mut PgConnection,
    data: &SeedData,
) -> Result<SeedSummary, SeedRunError> {
    let summary = SeedRepo::insert_seed_data(&mut *conn, data).await?;

    let errors = SeedRepo::collect_check_errors(&mut *conn, data).await?;
    if !errors.is_empty() {
        for error in &errors {
            tracing::error!(%error, "Seed verification");
        }
        return Err(SeedError::Validation(errors).into());
    }

    Ok(summary)
}
