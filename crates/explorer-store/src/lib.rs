//! Client-side state for the Hotel Explorer.
//!
//! This crate holds everything the explore page keeps between user
//! interactions:
//!
//! - [`store`] -- the experience state store (favorites, rating filter,
//!   selected experience) with automatic durable persistence
//! - [`filter`] -- pure derivation of the displayed experience lists
//! - [`theme`] -- the theme context
//! - [`context`] -- root-level provisioning of both containers
//! - [`storage`] -- the durable key-value storage abstraction and its
//!   in-memory and file-backed backends
//! - [`persist`] -- the versioned snapshot format
//!
//! # Architecture
//!
//! The containers are single-threaded and mutate synchronously through
//! `&mut self`. Observers are notified after every mutation. Durable
//! storage failures are logged and swallowed; in-memory state is always
//! authoritative.

pub mod context;
pub mod error;
pub mod filter;
pub mod persist;
pub mod storage;
pub mod store;
pub mod theme;

// Re-export primary types for convenience.
pub use context::AppContext;
pub use error::{ContextError, SnapshotError, StorageError};
pub use filter::{DerivedLists, derive_lists, filter_by_rating, filter_by_text};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use store::{ExperienceStore, ExperienceStoreState, SubscriptionId};
pub use theme::ThemeContext;
