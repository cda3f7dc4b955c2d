//! Repository for the `vibes` table.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::models::vibe::Vibe;

/// Read access to vibes.
pub struct VibeRepo;

impl VibeRepo {
    /// All vibes ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Vibe>, sqlx::Error> {
        sqlx::query_as::<_, Vibe>(
            "SELECT id, name, description, icon FROM vibes ORDER BY name, id",
        )
        .fetch_all(pool)
        .await
    }

    /// For one occasion, how many of its cocktails carry each vibe.
    /// Vibes with no such cocktail are absent from the map.
    pub async fn occasion_counts(
        pool: &PgPool,
        occasion_id: &str,
    ) -> Result<HashMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT cv.vibe_id, COUNT(*) \
             FROM cocktail_vibes cv \
             JOIN cocktail_occasions co ON co.cocktail_id = cv.cocktail_id \
             WHERE co.occasion_id = $1 \
             GROUP BY cv.vibe_id",
        )
        .bind(occasion_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
