//! Configuration module for svg2clip
//!
//! Provides types and parsing for `svg2clip.toml` conversion settings.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
