//! Repository layer.
//!
//! Each read repository is a zero-sized struct providing async query
//! methods that accept `&PgPool` as the first argument. The seed store
//! works on a `&mut PgConnection` so the whole import runs inside one
//! transaction.

pub mod cocktail_repo;
pub mod lookup_repo;
pub mod seed_repo;
pub mod vibe_repo;

pub use cocktail_repo::CocktailRepo;
pub use lookup_repo::LookupRepo;
pub use seed_repo::SeedRepo;
pub use vibe_repo::VibeRepo;
