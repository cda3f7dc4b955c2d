//! Typed seed payloads.
//!
//! Each category decodes into a DTO where every field except `id` is
//! optional: a new row needs the required ones, an existing row only takes
//! the ones present. Nullable columns use `Option<Option<T>>` so an explicit
//! `null` (clear) is distinguishable from an absent key (keep).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::seed::{SeedCategory, SeedError};
use crate::seed_source::Payload;
use crate::types::EntityId;

/// A decoded seed record belonging to one category.
pub trait SeedPayload: DeserializeOwned {
    const CATEGORY: SeedCategory;

    fn id(&self) -> &str;

    /// Decode a raw record. Wrong types and a missing `id` are reported as
    /// [`SeedError::InvalidPayload`]; unknown keys are ignored.
    fn decode(raw: &Payload) -> Result<Self, SeedError> {
        serde_json::from_value(Value::Object(raw.clone())).map_err(|source| {
            SeedError::InvalidPayload {
                category: Self::CATEGORY,
                id: raw
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>")
                    .to_string(),
                source,
            }
        })
    }

    /// Error for a field that a new row cannot do without.
    fn missing(&self, field: &'static str) -> SeedError {
        SeedError::MissingField {
            category: Self::CATEGORY,
            id: self.id().to_string(),
            field,
        }
    }
}

/// Keeps `null` as `Some(None)`; pair with `#[serde(default)]` so an absent
/// key stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct VibePayload {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
}

impl SeedPayload for VibePayload {
    const CATEGORY: SeedCategory = SeedCategory::Vibes;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OccasionPayload {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl SeedPayload for OccasionPayload {
    const CATEGORY: SeedCategory = SeedCategory::Occasions;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyPayload {
    pub id: EntityId,
    pub label: Option<String>,
    pub rank: Option<i32>,
}

impl SeedPayload for DifficultyPayload {
    const CATEGORY: SeedCategory = SeedCategory::Difficulties;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlcoholLevelPayload {
    pub id: EntityId,
    pub label: Option<String>,
    pub rank: Option<i32>,
}

impl SeedPayload for AlcoholLevelPayload {
    const CATEGORY: SeedCategory = SeedCategory::AlcoholLevels;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Spirit and flavor tag lists. Either group may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagGroups {
    pub spirit: Vec<String>,
    pub flavor: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocktailPayload {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub rank: Option<i32>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub difficulty_id: Option<EntityId>,
    pub alcohol_level_id: Option<EntityId>,
    #[serde(default, deserialize_with = "nullable")]
    pub glassware: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub garnish: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    pub tags: Option<TagGroups>,
    /// Required on every cocktail; replaces the stored vibe set.
    pub vibe_ids: Option<Vec<EntityId>>,
    /// Required on every cocktail; replaces the stored occasion set.
    pub occasion_ids: Option<Vec<EntityId>>,
}

impl SeedPayload for CocktailPayload {
    const CATEGORY: SeedCategory = SeedCategory::Cocktails;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn absent_and_null_are_distinct() {
        let absent = VibePayload::decode(&raw(json!({ "id": "v" }))).unwrap();
        assert_eq!(absent.icon, None);

        let cleared = VibePayload::decode(&raw(json!({ "id": "v", "icon": null }))).unwrap();
        assert_eq!(cleared.icon, Some(None));

        let set = VibePayload::decode(&raw(json!({ "id": "v", "icon": "moon" }))).unwrap();
        assert_eq!(set.icon, Some(Some("moon".to_string())));
    }

    #[test]
    fn cocktail_fields_use_camel_case_keys() {
        let payload = CocktailPayload::decode(&raw(json!({
            "id": "cocktail-a",
            "name": "A",
            "rank": 3,
            "difficultyId": "difficulty-lazy",
            "imageUrl": "a.png",
            "vibeIds": ["vibe-chill"],
            "unknownKey": true,
        })))
        .unwrap();

        assert_eq!(payload.rank, Some(3));
        assert_eq!(payload.difficulty_id.as_deref(), Some("difficulty-lazy"));
        assert_eq!(payload.image_url, Some(Some("a.png".to_string())));
        assert_eq!(payload.vibe_ids, Some(vec!["vibe-chill".to_string()]));
        assert_eq!(payload.occasion_ids, None);
        assert_eq!(payload.garnish, None);
    }

    #[test]
    fn tag_groups_default_missing_group_to_empty() {
        let payload =
            CocktailPayload::decode(&raw(json!({ "id": "c", "tags": { "spirit": ["gin"] } })))
                .unwrap();
        assert_eq!(
            payload.tags,
            Some(TagGroups {
                spirit: vec!["gin".into()],
                flavor: vec![],
            })
        );
    }

    #[test]
    fn wrong_types_are_invalid_payloads() {
        let result = CocktailPayload::decode(&raw(json!({
            "id": "cocktail-a",
            "ingredients": ["ice", 4],
        })));
        assert_matches!(
            result,
            Err(SeedError::InvalidPayload { category: SeedCategory::Cocktails, ref id, .. })
                if id == "cocktail-a"
        );

        let fractional = DifficultyPayload::decode(&raw(json!({ "id": "d", "rank": 1.5 })));
        assert_matches!(fractional, Err(SeedError::InvalidPayload { .. }));
    }

    #[test]
    fn payload_without_id_is_rejected() {
        assert_matches!(
            VibePayload::decode(&raw(json!({ "name": "No id" }))),
            Err(SeedError::InvalidPayload { ref id, .. }) if id == "<unknown>"
        );
    }

    #[test]
    fn repository_seed_decodes() {
        let data =
            crate::seed::SeedData::from_source(include_str!("../../../data/seedData.ts")).unwrap();

        let espresso = data
            .cocktails
            .iter()
            .map(|raw| CocktailPayload::decode(raw).unwrap())
            .find(|c| c.id == "cocktail-velvet-espresso")
            .unwrap();
        assert_eq!(espresso.glassware, Some(Some("coupe".to_string())));
        assert_eq!(espresso.tags.unwrap().flavor, vec!["coffee", "rich"]);

        for raw in &data.difficulties {
            assert!(DifficultyPayload::decode(raw).unwrap().rank.is_some());
        }
    }

    #[test]
    fn missing_names_category_and_field() {
        let payload = OccasionPayload::decode(&raw(json!({ "id": "occasion-solo" }))).unwrap();
        let err = payload.missing("name");
        assert_eq!(
            err.to_string(),
            "occasions payload occasion-solo is missing required field `name`"
        );
    }
}
