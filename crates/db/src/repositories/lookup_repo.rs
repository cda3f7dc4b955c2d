//! Repository for the small lookup tables: occasions, difficulties and
//! alcohol levels.

use sqlx::PgPool;

use crate::models::alcohol_level::AlcoholLevel;
use crate::models::difficulty::Difficulty;
use crate::models::occasion::Occasion;

pub struct LookupRepo;

impl LookupRepo {
    /// All occasions ordered by name.
    pub async fn list_occasions(pool: &PgPool) -> Result<Vec<Occasion>, sqlx::Error> {
        sqlx::query_as::<_, Occasion>(
            "SELECT id, name, description FROM occasions ORDER BY name, id",
        )
        .fetch_all(pool)
        .await
    }

    /// All difficulties ordered by rank.
    pub async fn list_difficulties(pool: &PgPool) -> Result<Vec<Difficulty>, sqlx::Error> {
        sqlx::query_as::<_, Difficulty>(
            "SELECT id, label, rank FROM difficulties ORDER BY rank, id",
        )
        .fetch_all(pool)
        .await
    }

    /// All alcohol levels ordered by rank.
    pub async fn list_alcohol_levels(pool: &PgPool) -> Result<Vec<AlcoholLevel>, sqlx::Error> {
        sqlx::query_as::<_, AlcoholLevel>(
            "SELECT id, label, rank FROM alcohol_levels ORDER BY rank, id",
        )
        .fetch_all(pool)
        .await
    }
}
