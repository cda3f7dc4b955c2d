//! Seed store: idempotent upsert of seed payloads, cocktail relationship
//! wiring, and the post-insert validation pass.
//!
//! Everything here takes a `&mut PgConnection` so the caller can run the
//! whole import inside a single transaction and roll it back on failure.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgConnection;
use vibesip_core::seed::{SeedCategory, SeedData, SeedError};
use vibesip_core::seed_payload::{
    AlcoholLevelPayload, CocktailPayload, DifficultyPayload, OccasionPayload, SeedPayload,
    VibePayload,
};
use vibesip_core::seed_source::Payload;

use crate::models::alcohol_level::AlcoholLevel;
use crate::models::cocktail::{Cocktail, COCKTAIL_COLUMNS};
use crate::models::difficulty::Difficulty;
use crate::models::occasion::Occasion;
use crate::models::vibe::Vibe;

/// Failures while importing seed payloads into storage.
#[derive(Debug, thiserror::Error)]
pub enum SeedImportError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("Database error during seed import: {0}")]
    Database(#[from] sqlx::Error),
}

/// What the generic upsert needs from an entity: lookup by id,
/// construction from a decoded payload, and field assignment.
#[async_trait]
pub trait SeedEntity: Sized + Send + Sync {
    type Payload: SeedPayload + Send;

    fn id(&self) -> &str;

    /// Build a new row. Every required field must be present.
    fn from_payload(payload: Self::Payload) -> Result<Self, SeedError>;

    /// Overwrite the fields present in the payload; others stay untouched.
    fn assign(&mut self, payload: Self::Payload);

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error>;

    /// Write the row, inserting or replacing by id.
    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error>;
}

/// Upsert every payload by id and return the resulting rows keyed by id.
pub async fn upsert_entities<E: SeedEntity>(
    conn: &mut PgConnection,
    payloads: &[Payload],
) -> Result<HashMap<String, E>, SeedImportError> {
    let mut entities = HashMap::with_capacity(payloads.len());

    for raw in payloads {
        let payload = E::Payload::decode(raw)?;
        let entity = upsert_one::<E>(conn, payload).await?;
        entities.insert(entity.id().to_string(), entity);
    }

    Ok(entities)
}

async fn upsert_one<E: SeedEntity>(
    conn: &mut PgConnection,
    payload: E::Payload,
) -> Result<E, SeedImportError> {
    let existing = E::find_by_id(&mut *conn, payload.id()).await?;
    let entity = match existing {
        None => E::from_payload(payload)?,
        Some(mut existing) => {
            existing.assign(payload);
            existing
        }
    };
    entity.save(&mut *conn).await?;
    Ok(entity)
}

/// Rows resolved by the base-entity upserts, used to wire cocktails.
#[derive(Debug, Default)]
pub struct ResolvedRefs {
    pub vibes: HashMap<String, Vibe>,
    pub occasions: HashMap<String, Occasion>,
    pub difficulties: HashMap<String, Difficulty>,
    pub alcohol_levels: HashMap<String, AlcoholLevel>,
}

/// Upsert cocktails and replace their vibe and occasion sets.
///
/// Every referenced id must already be in `refs`; an unknown id aborts the
/// import with [`SeedError::MissingReference`].
pub async fn upsert_cocktails(
    conn: &mut PgConnection,
    payloads: &[Payload],
    refs: &ResolvedRefs,
) -> Result<HashMap<String, Cocktail>, SeedImportError> {
    let mut cocktails = HashMap::with_capacity(payloads.len());

    for raw in payloads {
        let mut payload = CocktailPayload::decode(raw)?;
        let vibe_ids = payload
            .vibe_ids
            .take()
            .ok_or_else(|| payload.missing("vibeIds"))?;
        let occasion_ids = payload
            .occasion_ids
            .take()
            .ok_or_else(|| payload.missing("occasionIds"))?;

        let missing = |category: SeedCategory, id: &str| SeedError::MissingReference {
            cocktail_id: payload.id.clone(),
            category,
            id: id.to_string(),
        };
        if let Some(id) = payload.difficulty_id.as_deref() {
            if !refs.difficulties.contains_key(id) {
                return Err(missing(SeedCategory::Difficulties, id).into());
            }
        }
        if let Some(id) = payload.alcohol_level_id.as_deref() {
            if !refs.alcohol_levels.contains_key(id) {
                return Err(missing(SeedCategory::AlcoholLevels, id).into());
            }
        }
        if let Some(id) = vibe_ids.iter().find(|id| !refs.vibes.contains_key(*id)) {
            return Err(missing(SeedCategory::Vibes, id).into());
        }
        if let Some(id) = occasion_ids.iter().find(|id| !refs.occasions.contains_key(*id)) {
            return Err(missing(SeedCategory::Occasions, id).into());
        }

        let cocktail = upsert_one::<Cocktail>(conn, payload).await?;
        replace_links(conn, "cocktail_vibes", "vibe_id", &cocktail.id, &vibe_ids).await?;
        replace_links(conn, "cocktail_occasions", "occasion_id", &cocktail.id, &occasion_ids)
            .await?;

        cocktails.insert(cocktail.id.clone(), cocktail);
    }

    Ok(cocktails)
}

/// Replace a cocktail's rows in a junction table with exactly `ids`.
async fn replace_links(
    conn: &mut PgConnection,
    table: &str,
    column: &str,
    cocktail_id: &str,
    ids: &[String],
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DELETE FROM {table} WHERE cocktail_id = $1"))
        .bind(cocktail_id)
        .execute(&mut *conn)
        .await?;

    if ids.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {table} (cocktail_id, {column}) \
         SELECT $1, UNNEST($2::text[]) \
         ON CONFLICT DO NOTHING"
    ))
    .bind(cocktail_id)
    .bind(ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Rows written per category by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub vibes: usize,
    pub occasions: usize,
    pub difficulties: usize,
    pub alcohol_levels: usize,
    pub cocktails: usize,
}

pub struct SeedRepo;

impl SeedRepo {
    /// Upsert all base entities, then cocktails with their relationships.
    pub async fn insert_seed_data(
        conn: &mut PgConnection,
        data: &SeedData,
    ) -> Result<SeedSummary, SeedImportError> {
        let refs = ResolvedRefs {
            vibes: upsert_entities(conn, &data.vibes).await?,
            occasions: upsert_entities(conn, &data.occasions).await?,
            difficulties: upsert_entities(conn, &data.difficulties).await?,
            alcohol_levels: upsert_entities(conn, &data.alcohol_levels).await?,
        };
        let cocktails = upsert_cocktails(conn, &data.cocktails, &refs).await?;

        let summary = SeedSummary {
            vibes: refs.vibes.len(),
            occasions: refs.occasions.len(),
            difficulties: refs.difficulties.len(),
            alcohol_levels: refs.alcohol_levels.len(),
            cocktails: cocktails.len(),
        };
        tracing::info!(
            vibes = summary.vibes,
            occasions = summary.occasions,
            difficulties = summary.difficulties,
            alcohol_levels = summary.alcohol_levels,
            cocktails = summary.cocktails,
            "Seed payloads upserted",
        );

        Ok(summary)
    }

    /// Compare storage against the seed payloads.
    ///
    /// Reports, per category, ids declared in the seed but absent from
    /// storage, and a row count lower than the number of declared ids.
    /// Extra rows in storage are not reported. An empty list means the
    /// check passed.
    pub async fn collect_check_errors(
        conn: &mut PgConnection,
        data: &SeedData,
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut errors = Vec::new();

        for category in SeedCategory::ALL {
            let table = category.table();
            let expected = data.expected_ids(category);

            let actual: HashSet<String> =
                sqlx::query_scalar::<_, String>(&format!("SELECT id FROM {table}"))
                    .fetch_all(&mut *conn)
                    .await?
                    .into_iter()
                    .collect();

            let missing: Vec<&str> = expected
                .iter()
                .copied()
                .filter(|id| !actual.contains(*id))
                .collect();
            if !missing.is_empty() {
                errors.push(format!("Missing {table} IDs: {missing:?}"));
            }

            let actual_count: i64 =
                sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(&mut *conn)
                    .await?;
            let expected_count = expected.len() as i64;
            if actual_count < expected_count {
                errors.push(format!(
                    "{table} count {actual_count} is less than expected {expected_count}"
                ));
            }
        }

        if errors.is_empty() {
            tracing::info!("Seed validation passed");
        } else {
            tracing::warn!(error_count = errors.len(), "Seed validation found problems");
        }

        Ok(errors)
    }
}

// ---------------------------------------------------------------------------
// SeedEntity implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl SeedEntity for Vibe {
    type Payload = VibePayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_payload(mut payload: VibePayload) -> Result<Self, SeedError> {
        let name = payload.name.take().ok_or_else(|| payload.missing("name"))?;
        let description = payload
            .description
            .take()
            .ok_or_else(|| payload.missing("description"))?;
        Ok(Self {
            id: payload.id,
            name,
            description,
            icon: payload.icon.flatten(),
        })
    }

    fn assign(&mut self, payload: VibePayload) {
        if let Some(name) = payload.name {
            self.name = name;
        }
        if let Some(description) = payload.description {
            self.description = description;
        }
        if let Some(icon) = payload.icon {
            self.icon = icon;
        }
    }

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Vibe>("SELECT id, name, description, icon FROM vibes WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO vibes (id, name, description, icon) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 icon = EXCLUDED.icon",
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(&self.description)
        .bind(&self.icon)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedEntity for Occasion {
    type Payload = OccasionPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_payload(mut payload: OccasionPayload) -> Result<Self, SeedError> {
        let name = payload.name.take().ok_or_else(|| payload.missing("name"))?;
        let description = payload
            .description
            .take()
            .ok_or_else(|| payload.missing("description"))?;
        Ok(Self {
            id: payload.id,
            name,
            description,
        })
    }

    fn assign(&mut self, payload: OccasionPayload) {
        if let Some(name) = payload.name {
            self.name = name;
        }
        if let Some(description) = payload.description {
            self.description = description;
        }
    }

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Occasion>("SELECT id, name, description FROM occasions WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO occasions (id, name, description) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description",
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(&self.description)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedEntity for Difficulty {
    type Payload = DifficultyPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_payload(mut payload: DifficultyPayload) -> Result<Self, SeedError> {
        let label = payload.label.take().ok_or_else(|| payload.missing("label"))?;
        let rank = payload.rank.ok_or_else(|| payload.missing("rank"))?;
        Ok(Self {
            id: payload.id,
            label,
            rank,
        })
    }

    fn assign(&mut self, payload: DifficultyPayload) {
        if let Some(label) = payload.label {
            self.label = label;
        }
        if let Some(rank) = payload.rank {
            self.rank = rank;
        }
    }

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Difficulty>("SELECT id, label, rank FROM difficulties WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO difficulties (id, label, rank) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET label = EXCLUDED.label, rank = EXCLUDED.rank",
        )
        .bind(&self.id)
        .bind(&self.label)
        .bind(self.rank)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedEntity for AlcoholLevel {
    type Payload = AlcoholLevelPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_payload(mut payload: AlcoholLevelPayload) -> Result<Self, SeedError> {
        let label = payload.label.take().ok_or_else(|| payload.missing("label"))?;
        let rank = payload.rank.ok_or_else(|| payload.missing("rank"))?;
        Ok(Self {
            id: payload.id,
            label,
            rank,
        })
    }

    fn assign(&mut self, payload: AlcoholLevelPayload) {
        if let Some(label) = payload.label {
            self.label = label;
        }
        if let Some(rank) = payload.rank {
            self.rank = rank;
        }
    }

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AlcoholLevel>(
            "SELECT id, label, rank FROM alcohol_levels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO alcohol_levels (id, label, rank) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET label = EXCLUDED.label, rank = EXCLUDED.rank",
        )
        .bind(&self.id)
        .bind(&self.label)
        .bind(self.rank)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedEntity for Cocktail {
    type Payload = CocktailPayload;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_payload(mut payload: CocktailPayload) -> Result<Self, SeedError> {
        let name = payload.name.take().ok_or_else(|| payload.missing("name"))?;
        let description = payload
            .description
            .take()
            .ok_or_else(|| payload.missing("description"))?;
        let ingredients = payload
            .ingredients
            .take()
            .ok_or_else(|| payload.missing("ingredients"))?;
        let steps = payload.steps.take().ok_or_else(|| payload.missing("steps"))?;
        let difficulty_id = payload
            .difficulty_id
            .take()
            .ok_or_else(|| payload.missing("difficultyId"))?;
        let alcohol_level_id = payload
            .alcohol_level_id
            .take()
            .ok_or_else(|| payload.missing("alcoholLevelId"))?;
        let tags = payload.tags.unwrap_or_default();

        Ok(Self {
            id: payload.id,
            name,
            description,
            rank: payload.rank.unwrap_or(0),
            ingredients: Json(ingredients),
            steps: Json(steps),
            difficulty_id,
            alcohol_level_id,
            glassware: payload.glassware.flatten(),
            garnish: payload.garnish.flatten(),
            image_url: payload.image_url.flatten(),
            spirit_tags: Json(tags.spirit),
            flavor_tags: Json(tags.flavor),
        })
    }

    fn assign(&mut self, payload: CocktailPayload) {
        if let Some(name) = payload.name {
            self.name = name;
        }
        if let Some(description) = payload.description {
            self.description = description;
        }
        if let Some(rank) = payload.rank {
            self.rank = rank;
        }
        if let Some(ingredients) = payload.ingredients {
            self.ingredients = Json(ingredients);
        }
        if let Some(steps) = payload.steps {
            self.steps = Json(steps);
        }
        if let Some(difficulty_id) = payload.difficulty_id {
            self.difficulty_id = difficulty_id;
        }
        if let Some(alcohol_level_id) = payload.alcohol_level_id {
            self.alcohol_level_id = alcohol_level_id;
        }
        if let Some(glassware) = payload.glassware {
            self.glassware = glassware;
        }
        if let Some(garnish) = payload.garnish {
            self.garnish = garnish;
        }
        if let Some(image_url) = payload.image_url {
            self.image_url = image_url;
        }
        if let Some(tags) = payload.tags {
            self.spirit_tags = Json(tags.spirit);
            self.flavor_tags = Json(tags.flavor);
        }
    }

    async fn find_by_id(conn: &mut PgConnection, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {COCKTAIL_COLUMNS} FROM cocktails WHERE id = $1");
        sqlx::query_as::<_, Cocktail>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO cocktails ({COCKTAIL_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 rank = EXCLUDED.rank, \
                 ingredients = EXCLUDED.ingredients, \
                 steps = EXCLUDED.steps, \
                 difficulty_id = EXCLUDED.difficulty_id, \
                 alcohol_level_id = EXCLUDED.alcohol_level_id, \
                 glassware = EXCLUDED.glassware, \
                 garnish = EXCLUDED.garnish, \
                 image_url = EXCLUDED.image_url, \
                 spirit_tags = EXCLUDED.spirit_tags, \
                 flavor_tags = EXCLUDED.flavor_tags"
        );
        sqlx::query(&query)
            .bind(&self.id)
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.rank)
            .bind(&self.ingredients)
            .bind(&self.steps)
            .bind(&self.difficulty_id)
            .bind(&self.alcohol_level_id)
            .bind(&self.glassware)
            .bind(&self.garnish)
            .bind(&self.image_url)
            .bind(&self.spirit_tags)
            .bind(&self.flavor_tags)
            .execute(conn)
            .await?;
        Ok(())
    }
}
