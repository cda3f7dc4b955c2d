//! Repository for the `cocktails` table and its junction tables.
//!
//! Listing and counting share one filter builder so the total always
//! matches the predicates used for the page.

use sqlx::{PgPool, Postgres, QueryBuilder};
use vibesip_core::pagination::Pagination;
use vibesip_core::types::EntityId;

use crate::models::cocktail::{Cocktail, CocktailFilter, CocktailSummary, COCKTAIL_COLUMNS};

pub struct CocktailRepo;

impl CocktailRepo {
    /// One page of cocktails matching `filter`, ordered by rank then name.
    pub async fn list(
        pool: &PgPool,
        filter: &CocktailFilter,
        pagination: Pagination,
    ) -> Result<Vec<CocktailSummary>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT c.id, c.name, c.description, c.image_url",
        );
        push_filtered_source(&mut qb, filter);
        qb.push(" ORDER BY c.rank ASC, c.name ASC, c.id ASC LIMIT ")
            .push_bind(pagination.limit)
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        qb.build_query_as::<CocktailSummary>()
            .fetch_all(pool)
            .await
    }

    /// Total cocktails matching `filter`, independent of pagination.
    pub async fn count(pool: &PgPool, filter: &CocktailFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(DISTINCT c.id)");
        push_filtered_source(&mut qb, filter);

        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a cocktail by its id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Cocktail>, sqlx::Error> {
        let query = format!("SELECT {COCKTAIL_COLUMNS} FROM cocktails WHERE id = $1");
        sqlx::query_as::<_, Cocktail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Vibe ids attached to a cocktail, sorted.
    pub async fn vibe_ids(pool: &PgPool, cocktail_id: &str) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT vibe_id FROM cocktail_vibes WHERE cocktail_id = $1 ORDER BY vibe_id",
        )
        .bind(cocktail_id)
        .fetch_all(pool)
        .await
    }

    /// Occasion ids attached to a cocktail, sorted.
    pub async fn occasion_ids(
        pool: &PgPool,
        cocktail_id: &str,
    ) -> Result<Vec<EntityId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT occasion_id FROM cocktail_occasions WHERE cocktail_id = $1 ORDER BY occasion_id",
        )
        .bind(cocktail_id)
        .fetch_all(pool)
        .await
    }
}

/// Append `FROM ... WHERE ...` for the given filter. Junction joins pin a
/// single vibe/occasion id, so each cocktail appears at most once.
fn push_filtered_source(qb: &mut QueryBuilder<'_, Postgres>, filter: &CocktailFilter) {
    qb.push(" FROM cocktails c");

    if let Some(vibe_id) = &filter.vibe_id {
        qb.push(" JOIN cocktail_vibes cv ON cv.cocktail_id = c.id AND cv.vibe_id = ")
            .push_bind(vibe_id.clone());
    }
    if let Some(occasion_id) = &filter.occasion_id {
        qb.push(" JOIN cocktail_occasions co ON co.cocktail_id = c.id AND co.occasion_id = ")
            .push_bind(occasion_id.clone());
    }

    qb.push(" WHERE TRUE");
    if let Some(difficulty_id) = &filter.difficulty_id {
        qb.push(" AND c.difficulty_id = ")
            .push_bind(difficulty_id.clone());
    }
    if let Some(alcohol_level_id) = &filter.alcohol_level_id {
        qb.push(" AND c.alcohol_level_id = ")
            .push_bind(alcohol_level_id.clone());
    }
}
