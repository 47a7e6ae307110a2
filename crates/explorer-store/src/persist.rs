//! Versioned snapshot format for the experience store.
//!
//! Only the user's preferences are persisted; the selected experience
//! is ephemeral UI focus and is rebuilt from navigation after a reload.
//!
//! # Envelope
//!
//! ```json
//! {
//!   "version": 1,
//!   "savedAt": "2026-10-19T12:00:00Z",
//!   "state": { "favorites": [1001, 1002], "ratingFilter": 4.5 }
//! }
//! ```
//!
//! Version 0 covers the two untagged layouts written by earlier builds:
//! the bare state object and `{ "state": ..., "version": 0 }`. Both are
//! migrated on read. A version newer than [`SCHEMA_VERSION`] is rejected
//! so the caller can start fresh instead of misreading it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use explorer_types::{ExperienceId, RatingThreshold};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SnapshotError;

/// Storage key holding the experience store snapshot.
pub const STORE_KEY: &str = "experience-storage";

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u64 = 1;

/// The persisted subset of the store state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPreferences {
    /// Favorite experience ids.
    #[serde(default)]
    pub favorites: BTreeSet<ExperienceId>,
    /// Active rating threshold.
    #[serde(default)]
    pub rating_filter: Option<RatingThreshold>,
}

/// Version-tagged wrapper written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedEnvelope {
    /// Schema version of `state`.
    pub version: u64,
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// The preferences themselves.
    pub state: PersistedPreferences,
}

impl PersistedEnvelope {
    /// Wrap preferences in a current-version envelope stamped now.
    pub fn current(state: PersistedPreferences) -> Self {
        Self {
            version: SCHEMA_VERSION,
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Untagged layout of earlier builds.
///
/// Favorites were a JSON array that could in principle repeat ids, and
/// the rating filter accepted any number.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyState {
    #[serde(default)]
    favorites: Vec<ExperienceId>,
    #[serde(default)]
    rating_filter: Option<f64>,
}

/// Serialize preferences into a current-version envelope.
pub fn encode(state: &PersistedPreferences) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&PersistedEnvelope::current(state.clone()))?)
}

/// Decode a stored snapshot of any known version.
pub fn decode(raw: &str) -> Result<PersistedPreferences, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(ref fields) = value else {
        return Err(SnapshotError::Malformed(String::from(
            "snapshot is not a JSON object",
        )));
    };

    let version = match fields.get("version") {
        None => None,
        Some(raw) => Some(raw.as_u64().ok_or_else(|| {
            SnapshotError::Malformed(format!("version is not an unsigned integer: {raw}"))
        })?),
    };
    let state = fields.get("state").cloned();

    match version {
        // Bare state object, or `{ state }` without a version tag.
        None => migrate_v0(state.unwrap_or(value)),
        Some(0) => migrate_v0(state.unwrap_or(Value::Null)),
        Some(SCHEMA_VERSION) => {
            let envelope: PersistedEnvelope = serde_json::from_value(value)?;
            Ok(envelope.state)
        }
        Some(newer) => Err(SnapshotError::UnsupportedVersion(newer)),
    }
}

fn migrate_v0(state: Value) -> Result<PersistedPreferences, SnapshotError> {
    let legacy: LegacyState = if state.is_null() {
        LegacyState::default()
    } else {
        serde_json::from_value(state)?
    };

    let rating_filter = legacy.rating_filter.and_then(|raw| {
        RatingThreshold::try_from(raw)
            .map_err(|e| {
                tracing::warn!(error = %e, "Dropping legacy rating filter outside the allowed set");
            })
            .ok()
    });

    tracing::info!(
        favorites = legacy.favorites.len(),
        "Migrated version 0 experience snapshot"
    );

    Ok(PersistedPreferences {
        favorites: legacy.favorites.into_iter().collect(),
        rating_filter,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn prefs(ids: &[i64], rating: Option<RatingThreshold>) -> PersistedPreferences {
        PersistedPreferences {
            favorites: ids.iter().copied().map(ExperienceId).collect(),
            rating_filter: rating,
        }
    }

    #[test]
    fn current_envelope_is_version_tagged() {
        let raw = encode(&prefs(&[1001], Some(RatingThreshold::Four))).unwrap();
        let json: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["state"]["favorites"], serde_json::json!([1001]));
        assert_eq!(json["state"]["ratingFilter"], serde_json::json!(4.0));
        assert!(json["savedAt"].is_string());
        assert_eq!(decode(&raw).unwrap(), prefs(&[1001], Some(RatingThreshold::Four)));
    }

    #[test]
    fn migrates_bare_legacy_state() {
        let raw = r#"{"favorites":[2,1,2],"ratingFilter":4.5,"selectedExperience":null}"#;
        assert_eq!(decode(raw).unwrap(), prefs(&[1, 2], Some(RatingThreshold::FourAndHalf)));
    }

    #[test]
    fn migrates_wrapped_version_zero() {
        let raw = r#"{"state":{"favorites":[7],"ratingFilter":null},"version":0}"#;
        assert_eq!(decode(raw).unwrap(), prefs(&[7], None));
    }

    #[test]
    fn legacy_filter_outside_allowed_set_is_dropped() {
        let raw = r#"{"state":{"favorites":[],"ratingFilter":3.5}}"#;
        assert_eq!(decode(raw).unwrap(), prefs(&[], None));
    }

    #[test]
    fn rejects_future_versions() {
        let raw = r#"{"version":2,"savedAt":"2026-01-01T00:00:00Z","state":{}}"#;
        assert!(matches!(decode(raw), Err(SnapshotError::UnsupportedVersion(2))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode("not json"), Err(SnapshotError::Corrupt(_))));
        assert!(matches!(decode("[1,2]"), Err(SnapshotError::Malformed(_))));
        assert!(matches!(
            decode(r#"{"version":"one"}"#),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
