//! Derivation of the displayed experience lists.
//!
//! Pure functions from (raw list, search term, rating threshold) to the
//! subset the explore page renders. Results are recomputed on every
//! input change and never cached: the lists hold tens of items.
//!
//! Both predicates are independent, so applying them in either order
//! gives the same result, and filtering never reorders the source list.

use explorer_types::{Experience, ExperienceCatalog, ExperienceSource, RatingThreshold};

/// Lists ready for rendering, borrowing from the catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedLists<'a> {
    /// Hotel amenities matching the search term.
    pub internal: Vec<&'a Experience>,
    /// Nearby venues matching the search term and the rating threshold.
    pub external: Vec<&'a Experience>,
}

/// Whether `exp` matches the search term.
///
/// Matches when the lowercase term is a substring of the lowercase
/// `"<display name> <description>"`. An empty term matches everything.
pub fn matches_text(exp: &Experience, source: ExperienceSource, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!(
        "{} {}",
        exp.display_name(source),
        exp.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    haystack.contains(&query.to_lowercase())
}

/// Whether `exp` passes the rating threshold. A missing rating counts
/// as zero; no threshold admits everything.
pub fn passes_rating(exp: &Experience, threshold: Option<RatingThreshold>) -> bool {
    threshold.is_none_or(|t| t.admits(exp.effective_rating()))
}

/// Keep the experiences matching the search term, in source order.
pub fn filter_by_text<'a>(
    list: &'a [Experience],
    source: ExperienceSource,
    query: &str,
) -> Vec<&'a Experience> {
    list.iter()
        .filter(|exp| matches_text(exp, source, query))
        .collect()
}

/// Keep the experiences passing the rating threshold, in source order.
pub fn filter_by_rating(
    list: &[Experience],
    threshold: Option<RatingThreshold>,
) -> Vec<&Experience> {
    list.iter()
        .filter(|exp| passes_rating(exp, threshold))
        .collect()
}

/// Compute both displayed lists.
///
/// The search term applies to both lists; the rating threshold applies
/// to the external list only.
pub fn derive_lists<'a>(
    catalog: &'a ExperienceCatalog,
    query: &str,
    rating_filter: Option<RatingThreshold>,
) -> DerivedLists<'a> {
    let internal = filter_by_text(&catalog.internal_experiences, ExperienceSource::Internal, query);
    let external = catalog
        .external_experiences
        .iter()
        .filter(|exp| matches_text(exp, ExperienceSource::External, query))
        .filter(|exp| passes_rating(exp, rating_filter))
        .collect();

    DerivedLists { internal, external }
}
