//! Type-safe identifier wrappers.
//!
//! Experience identifiers are plain integers in the catalog JSON. The
//! newtype keeps them from being confused with ratings, indexes, or
//! subscription handles.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Unique identifier of an experience within its list.
///
/// Serialized transparently as a JSON number (`1001`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct ExperienceId(#[ts(type = "number")] pub i64);

impl ExperienceId {
    /// Return the inner integer value.
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExperienceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ExperienceId> for i64 {
    fn from(id: ExperienceId) -> Self {
        id.0
    }
}

impl core::str::FromStr for ExperienceId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ExperienceId(1001)).unwrap();
        assert_eq!(json, "1001");
    }

    #[test]
    fn parses_from_cli_argument() {
        let id: Result<ExperienceId, _> = " 42 ".parse();
        assert_eq!(id.ok(), Some(ExperienceId(42)));
        assert!("forty-two".parse::<ExperienceId>().is_err());
    }
}
