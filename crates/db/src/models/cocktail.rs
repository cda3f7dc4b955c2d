//! Cocktail model, listing filters, and the summary/detail views.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use vibesip_core::seed_payload::TagGroups;
use vibesip_core::types::EntityId;

/// A row from the `cocktails` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Cocktail {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Display order; lower ranks first, ties broken by name.
    pub rank: i32,
    pub ingredients: Json<Vec<String>>,
    pub steps: Json<Vec<String>>,
    pub difficulty_id: EntityId,
    pub alcohol_level_id: EntityId,
    pub glassware: Option<String>,
    pub garnish: Option<String>,
    pub image_url: Option<String>,
    pub spirit_tags: Json<Vec<String>>,
    pub flavor_tags: Json<Vec<String>>,
}

/// Column list for `cocktails` queries.
pub const COCKTAIL_COLUMNS: &str = "\
    id, name, description, rank, ingredients, steps, difficulty_id, \
    alcohol_level_id, glassware, garnish, image_url, spirit_tags, flavor_tags";

/// Optional listing filters. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CocktailFilter {
    pub vibe_id: Option<String>,
    pub occasion_id: Option<String>,
    pub difficulty_id: Option<String>,
    pub alcohol_level_id: Option<String>,
}

impl CocktailFilter {
    pub fn new(
        vibe_id: Option<String>,
        occasion_id: Option<String>,
        difficulty_id: Option<String>,
        alcohol_level_id: Option<String>,
    ) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            vibe_id: present(vibe_id),
            occasion_id: present(occasion_id),
            difficulty_id: present(difficulty_id),
            alcohol_level_id: present(alcohol_level_id),
        }
    }
}

/// Listing entry returned by `GET /cocktails`.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailSummary {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Full recipe returned by `GET /cocktails/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CocktailDetail {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub glassware: Option<String>,
    pub garnish: Option<String>,
    pub difficulty_id: EntityId,
    pub alcohol_level_id: EntityId,
    pub vibe_ids: Vec<EntityId>,
    pub occasion_ids: Vec<EntityId>,
    pub tags: TagGroups,
}

impl CocktailDetail {
    pub fn new(cocktail: Cocktail, vibe_ids: Vec<EntityId>, occasion_ids: Vec<EntityId>) -> Self {
        Self {
            id: cocktail.id,
            name: cocktail.name,
            description: cocktail.description,
            image_url: cocktail.image_url,
            ingredients: cocktail.ingredients.0,
            steps: cocktail.steps.0,
            glassware: cocktail.glassware,
            garnish: cocktail.garnish,
            difficulty_id: cocktail.difficulty_id,
            alcohol_level_id: cocktail.alcohol_level_id,
            vibe_ids,
            occasion_ids,
            tags: TagGroups {
                spirit: cocktail.spirit_tags.0,
                flavor: cocktail.flavor_tags.0,
            },
        }
    }
}
