//! Vibe model: a mood/theme tag attachable to many cocktails.

use serde::Serialize;
use sqlx::FromRow;
use vibesip_core::types::EntityId;

/// A row from the `vibes` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Vibe {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
}

/// Vibe as returned by `GET /vibes`. The icon reference doubles as the
/// image URL; `tags` is reserved and always empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeResponse {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

impl From<Vibe> for VibeResponse {
    fn from(vibe: Vibe) -> Self {
        Self {
            id: vibe.id,
            name: vibe.name,
            description: vibe.description,
            image_url: vibe.icon,
            tags: Vec::new(),
        }
    }
}
