//! Domain types and pure logic for the Vibe & Sip catalog.
//!
//! Nothing in this crate touches the database or performs network I/O.

pub mod error;
pub mod pagination;
pub mod ranking;
pub mod seed;
pub mod seed_payload;
pub mod seed_source;
pub mod settings;
pub mod types;
