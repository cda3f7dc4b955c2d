use serde::Serialize;
use sqlx::FromRow;
use vibesip_core::types::EntityId;

/// A row from the `difficulties` table. `rank` defines sort order.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct Difficulty {
    pub id: EntityId,
    pub label: String,
    pub rank: i32,
}
