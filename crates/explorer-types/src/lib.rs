//! Shared type definitions for the Hotel Explorer.
//!
//! This crate is the single source of truth for the data model shared by
//! the mock API, the explore client, and the web front-end. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe experience identifier
//! - [`experience`] -- Experience records and the catalog document
//! - [`enums`] -- Rating thresholds and themes

pub mod enums;
pub mod experience;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use enums::{InvalidThreshold, RatingThreshold, Theme, ThemePalette, UnknownTheme};
pub use experience::{Experience, ExperienceCatalog, ExperienceSource};
pub use ids::ExperienceId;
