//! Row models and response DTOs.
//!
//! Each submodule contains a `FromRow` struct matching its table and, where
//! the HTTP shape differs from the row, a camelCase `Serialize` view.

pub mod alcohol_level;
pub mod cocktail;
pub mod difficulty;
pub mod occasion;
pub mod vibe;
