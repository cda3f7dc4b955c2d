//! Seed dataset: the five catalog categories extracted from the seed
//! source, and the errors raised while importing them.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::seed_source::{parse_exported_array, Payload, SeedSourceError};

/// Entity categories in the order they must be imported. Cocktails come
/// last because their relationships resolve against the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeedCategory {
    Vibes,
    Occasions,
    Difficulties,
    AlcoholLevels,
    Cocktails,
}

impl SeedCategory {
    pub const ALL: [SeedCategory; 5] = [
        SeedCategory::Vibes,
        SeedCategory::Occasions,
        SeedCategory::Difficulties,
        SeedCategory::AlcoholLevels,
        SeedCategory::Cocktails,
    ];

    /// Name of the `export const` array in the seed source.
    pub fn export_name(self) -> &'static str {
        match self {
            SeedCategory::Vibes => "vibes",
            SeedCategory::Occasions => "occasions",
            SeedCategory::Difficulties => "difficulties",
            SeedCategory::AlcoholLevels => "alcoholLevels",
            SeedCategory::Cocktails => "cocktails",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            SeedCategory::Vibes => "vibes",
            SeedCategory::Occasions => "occasions",
            SeedCategory::Difficulties => "difficulties",
            SeedCategory::AlcoholLevels => "alcohol_levels",
            SeedCategory::Cocktails => "cocktails",
        }
    }
}

impl std::fmt::Display for SeedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// Errors raised while turning seed payloads into catalog rows.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Source(#[from] SeedSourceError),

    #[error("{category} payload {id} is missing required field `{field}`")]
    MissingField {
        category: SeedCategory,
        id: String,
        field: &'static str,
    },

    #[error("{category} payload {id} is malformed: {source}")]
    InvalidPayload {
        category: SeedCategory,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cocktail {cocktail_id} references unknown {category} id {id}")]
    MissingReference {
        cocktail_id: String,
        category: SeedCategory,
        id: String,
    },

    #[error("Seed validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// All payloads declared by one seed source, grouped by category.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub vibes: Vec<Payload>,
    pub occasions: Vec<Payload>,
    pub difficulties: Vec<Payload>,
    pub alcohol_levels: Vec<Payload>,
    pub cocktails: Vec<Payload>,
}

impl SeedData {
    /// Extract every category from the seed source text.
    pub fn from_source(source: &str) -> Result<Self, SeedError> {
        let parse = |category: SeedCategory| parse_exported_array(source, category.export_name());

        Ok(Self {
            vibes: parse(SeedCategory::Vibes)?,
            occasions: parse(SeedCategory::Occasions)?,
            difficulties: parse(SeedCategory::Difficulties)?,
            alcohol_levels: parse(SeedCategory::AlcoholLevels)?,
            cocktails: parse(SeedCategory::Cocktails)?,
        })
    }

    pub fn payloads(&self, category: SeedCategory) -> &[Payload] {
        match category {
            SeedCategory::Vibes => &self.vibes,
            SeedCategory::Occasions => &self.occasions,
            SeedCategory::Difficulties => &self.difficulties,
            SeedCategory::AlcoholLevels => &self.alcohol_levels,
            SeedCategory::Cocktails => &self.cocktails,
        }
    }

    /// Distinct ids declared for a category. Payloads without a string `id`
    /// are skipped here; the importer rejects them before this is used.
    pub fn expected_ids(&self, category: SeedCategory) -> BTreeSet<&str> {
        self.payloads(category)
            .iter()
            .filter_map(|payload| payload.get("id").and_then(Value::as_str))
            .collect()
    }
}
