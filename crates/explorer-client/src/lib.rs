//! Explore-page client for the Hotel Explorer.
//!
//! - [`fetch`] loads the catalog from the experiences API
//! - [`page`] is the explore-page view model: search, rating dropdown,
//!   favorites, the detail view, and the rendered cards
//!
//! The `explorer` binary drives both from the command line, persisting
//! preferences under a storage directory.

pub mod fetch;
pub mod page;

pub use fetch::{CatalogClient, FetchError};
pub use page::{Card, CardSections, ExplorePage, PageError, StarRating};
