/// Catalog primary keys are stable external string ids supplied by the
/// seed source (e.g. `"vibe-chill"`), never generated.
pub type EntityId = String;
