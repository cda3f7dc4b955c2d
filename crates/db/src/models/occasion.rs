use serde::Serialize;
use sqlx::FromRow;
use vibesip_core::types::EntityId;

/// A row from the `occasions` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Occasion {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}
