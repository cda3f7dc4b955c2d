pub mod cocktails;
pub mod lookups;
pub mod vibes;
