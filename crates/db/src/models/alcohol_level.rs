use serde::Serialize;
use sqlx::FromRow;
use vibesip_core::types::EntityId;

/// A row from the `alcohol_levels` table. `rank` defines sort order.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct AlcoholLevel {
    pub id: EntityId,
    pub label: String,
    pub rank: i32,
}
