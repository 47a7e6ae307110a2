//! Experience records and the catalog document that carries them.
//!
//! Experiences are read-only on the client: they are fetched once per
//! page load from `GET /api/experiences` and never created, mutated, or
//! deleted locally.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ExperienceId;

/// Which list an experience came from.
///
/// Internal experiences are hotel amenities and carry a `title`;
/// external experiences are nearby third-party venues and carry a
/// `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ExperienceSource {
    /// Amenity provided by the hotel itself.
    Internal,
    /// Nearby third-party venue.
    External,
}

/// A bookable hotel amenity or nearby point of interest, shown as a card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Experience {
    /// Identifier, unique within its list.
    pub id: ExperienceId,
    /// Display name of an internal experience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub title: Option<String>,
    /// Display name of an external experience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
    /// Human-readable distance from the hotel (e.g. `"0.5 miles"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub distance: Option<String>,
    /// Star rating between 0.0 and 5.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rating: Option<f64>,
    /// Card image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl Experience {
    /// The name shown on the card: `title` for internal items, `name`
    /// for external ones. Absent names render as the empty string.
    pub fn display_name(&self, source: ExperienceSource) -> &str {
        let field = match source {
            ExperienceSource::Internal => self.title.as_deref(),
            ExperienceSource::External => self.name.as_deref(),
        };
        field.unwrap_or_default()
    }

    /// Any name the record carries, preferring `title`.
    ///
    /// Used by detail views that do not know which list the record
    /// came from.
    pub fn any_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// The rating used for threshold comparisons; absent counts as `0`.
    pub fn effective_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// The full static experience catalog served by the mock API.
///
/// The JSON document has exactly two top-level fields,
/// `internalExperiences` and `externalExperiences`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export, export_to = "bindings/")]
pub struct ExperienceCatalog {
    /// Hotel amenities, keyed by `title`.
    pub internal_experiences: Vec<Experience>,
    /// Nearby venues, keyed by `name`.
    pub external_experiences: Vec<Experience>,
}

impl ExperienceCatalog {
    /// The list for the given source.
    pub fn list(&self, source: ExperienceSource) -> &[Experience] {
        match source {
            ExperienceSource::Internal => &self.internal_experiences,
            ExperienceSource::External => &self.external_experiences,
        }
    }

    /// Total number of experiences across both lists.
    pub fn len(&self) -> usize {
        self.internal_experiences
            .len()
            .saturating_add(self.external_experiences.len())
    }

    /// Whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.internal_experiences.is_empty() && self.external_experiences.is_empty()
    }

    /// Find an experience by id in the given list.
    pub fn find(&self, source: ExperienceSource, id: ExperienceId) -> Option<&Experience> {
        self.list(source).iter().find(|exp| exp.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "internalExperiences": [
            { "id": 1, "title": "Spa", "description": "Relax" },
            { "id": 2, "title": "Gym", "description": "Workout" }
        ],
        "externalExperiences": [
            { "id": 3, "name": "Cafe", "distance": "0.3 miles", "rating": 4.5 },
            { "id": 4, "name": "Bistro", "rating": 4.8 }
        ]
    }"#;

    #[test]
    fn parses_catalog_document() {
        let catalog: ExperienceCatalog = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(catalog.internal_experiences.len(), 2);
        assert_eq!(catalog.external_experiences.len(), 2);
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.find(ExperienceSource::External, ExperienceId(3)).map(|e| e.display_name(ExperienceSource::External)),
            Some("Cafe")
        );
    }

    #[test]
    fn rejects_extra_top_level_fields() {
        let doc = r#"{"internalExperiences": [], "externalExperiences": [], "hotels": []}"#;
        assert!(serde_json::from_str::<ExperienceCatalog>(doc).is_err());
    }

    #[test]
    fn display_name_follows_source() {
        let exp = Experience {
            id: ExperienceId(1),
            title: Some(String::from("Spa")),
            name: Some(String::from("Day Spa Co.")),
            ..Experience::default()
        };
        assert_eq!(exp.display_name(ExperienceSource::Internal), "Spa");
        assert_eq!(exp.display_name(ExperienceSource::External), "Day Spa Co.");
        assert_eq!(Experience::default().display_name(ExperienceSource::Internal), "");
    }

    #[test]
    fn missing_rating_counts_as_zero() {
        let exp = Experience::default();
        assert!(exp.effective_rating().abs() < f64::EPSILON);
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let exp = Experience {
            id: ExperienceId(7),
            name: Some(String::from("Pier")),
            ..Experience::default()
        };
        let json = serde_json::to_value(&exp).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 7, "name": "Pier" }));
    }
}
