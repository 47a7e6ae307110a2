//! View model of the explore page.
//!
//! [`ExplorePage`] owns the page-scoped catalog, the loading flag, the
//! search term, and an inline notice, and routes user intents into the
//! provisioned [`AppContext`]. Everything it renders is derived on demand
//! from those inputs through [`explorer_store::filter`].

use explorer_store::filter::{DerivedLists, derive_lists};
use explorer_store::{AppContext, ContextError, DurableStorage};
use explorer_types::{
    Experience, ExperienceCatalog, ExperienceId, ExperienceSource, InvalidThreshold,
    RatingThreshold,
};
use tracing::warn;

use crate::fetch::{CatalogClient, FetchError};

/// Notice shown when the catalog could not be loaded.
pub const FETCH_FAILED_NOTICE: &str =
    "We couldn't load experiences right now. Please try again later.";

/// Errors raised by page intents.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// A context was used before it was provisioned.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The rating dropdown produced a value outside the allowed set.
    #[error(transparent)]
    Threshold(#[from] InvalidThreshold),
}

/// Star breakdown for a rating out of five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Whole stars.
    pub full: u8,
    /// Whether a half star follows the whole stars.
    pub half: bool,
    /// Remaining empty stars.
    pub empty: u8,
}

impl StarRating {
    /// Maximum number of stars.
    pub const MAX: u8 = 5;

    /// Break `rating` down into whole, half, and empty stars.
    ///
    /// The fractional part earns a half star from `.5` upwards.
    pub fn from_rating(rating: f64) -> Self {
        let full = (1..=Self::MAX)
            .take_while(|n| f64::from(*n) <= rating)
            .last()
            .unwrap_or(0);
        let half = full < Self::MAX && rating - f64::from(full) >= 0.5;
        let empty = Self::MAX
            .saturating_sub(full)
            .saturating_sub(u8::from(half));
        Self { full, half, empty }
    }

    /// Text rendering, e.g. `★★★★½`.
    pub fn render(self) -> String {
        let mut out = "★".repeat(usize::from(self.full));
        if self.half {
            out.push('½');
        }
        out.push_str(&"☆".repeat(usize::from(self.empty)));
        out
    }
}

/// One experience card as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Experience id.
    pub id: ExperienceId,
    /// Display name for the card's list.
    pub name: String,
    /// Description, empty when absent.
    pub description: String,
    /// Distance label, external venues only.
    pub distance: Option<String>,
    /// Stars, omitted for unrated experiences.
    pub stars: Option<StarRating>,
    /// Whether the heart is filled.
    pub favorite: bool,
}

impl Card {
    fn from_experience(exp: &Experience, source: ExperienceSource, favorite: bool) -> Self {
        Self {
            id: exp.id,
            name: exp.display_name(source).to_owned(),
            description: exp.description.clone().unwrap_or_default(),
            distance: exp.distance.clone(),
            stars: exp
                .rating
                .filter(|r| *r > 0.0)
                .map(StarRating::from_rating),
            favorite,
        }
    }

    /// Label of the heart button.
    pub const fn favorite_label(&self) -> &'static str {
        if self.favorite {
            "Remove from favorites"
        } else {
            "Add to favorites"
        }
    }
}

/// Both card sections of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSections {
    /// Hotel amenities.
    pub internal: Vec<Card>,
    /// Nearby venues.
    pub external: Vec<Card>,
}

/// The explore page.
#[derive(Debug)]
pub struct ExplorePage<S: DurableStorage> {
    ctx: AppContext<S>,
    catalog: ExperienceCatalog,
    loading: bool,
    notice: Option<String>,
    search: String,
}

impl<S: DurableStorage> ExplorePage<S> {
    /// Mount the page over provisioned contexts. The page starts in the
    /// loading state until a fetch result is applied.
    pub fn new(ctx: AppContext<S>) -> Self {
        Self {
            ctx,
            catalog: ExperienceCatalog::default(),
            loading: true,
            notice: None,
            search: String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Fetch the catalog and apply the result.
    pub async fn load(&mut self, client: &CatalogClient) {
        self.loading = true;
        let result = client.fetch_catalog().await;
        self.apply_fetch(result);
    }

    /// Apply a fetch outcome.
    ///
    /// On failure both lists stay empty and a non-blocking notice is
    /// shown. The loading flag is cleared either way.
    pub fn apply_fetch(&mut self, result: Result<ExperienceCatalog, FetchError>) {
        match result {
            Ok(catalog) => {
                self.catalog = catalog;
                self.notice = None;
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed, showing empty lists");
                self.catalog = ExperienceCatalog::default();
                self.notice = Some(FETCH_FAILED_NOTICE.to_owned());
            }
        }
        self.loading = false;
    }

    /// Whether the catalog is still loading.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Inline notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the inline notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The page-scoped catalog.
    pub const fn catalog(&self) -> &ExperienceCatalog {
        &self.catalog
    }

    /// The application contexts.
    pub const fn context(&self) -> &AppContext<S> {
        &self.ctx
    }

    /// The application contexts, mutably.
    pub const fn context_mut(&mut self) -> &mut AppContext<S> {
        &mut self.ctx
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Update the search box.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Apply a rating dropdown value (`""`, `"4"`, `"4.5"`, `"5"`).
    pub fn set_rating_option(&mut self, value: &str) -> Result<(), PageError> {
        let threshold = RatingThreshold::parse_option(value)?;
        self.ctx.experiences_mut()?.set_rating_filter(threshold);
        Ok(())
    }

    /// Heart-button intent. Returns whether the experience is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, id: ExperienceId) -> Result<bool, ContextError> {
        Ok(self.ctx.experiences_mut()?.toggle_favorite(id))
    }

    /// Card selection intent: open the detail view for an experience.
    ///
    /// Returns `false` when the id is not in the given list.
    pub fn open_detail(
        &mut self,
        source: ExperienceSource,
        id: ExperienceId,
    ) -> Result<bool, ContextError> {
        let Some(exp) = self.catalog.find(source, id).cloned() else {
            return Ok(false);
        };
        self.ctx.experiences_mut()?.set_selected_experience(Some(exp));
        Ok(true)
    }

    /// Close the detail view.
    pub fn close_detail(&mut self) -> Result<(), ContextError> {
        self.ctx.experiences_mut()?.set_selected_experience(None);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Derived output
    // -----------------------------------------------------------------------

    /// The filtered lists for the current inputs.
    pub fn visible(&self) -> Result<DerivedLists<'_>, ContextError> {
        let rating_filter = self.ctx.experiences()?.rating_filter();
        Ok(derive_lists(&self.catalog, &self.search, rating_filter))
    }

    /// The cards to render for the current inputs.
    pub fn cards(&self) -> Result<CardSections, ContextError> {
        let store = self.ctx.experiences()?;
        let visible = derive_lists(&self.catalog, &self.search, store.rating_filter());
        let to_cards = |list: Vec<&Experience>, source| {
            list.into_iter()
                .map(|exp| Card::from_experience(exp, source, store.is_favorite(exp.id)))
                .collect()
        };
        Ok(CardSections {
            internal: to_cards(visible.internal, ExperienceSource::Internal),
            external: to_cards(visible.external, ExperienceSource::External),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use explorer_store::MemoryStorage;

    use super::*;

    fn catalog() -> ExperienceCatalog {
        let internal = |id, title: &str, description: &str| Experience {
            id: ExperienceId(id),
            title: Some(title.to_owned()),
            description: Some(description.to_owned()),
            ..Experience::default()
        };
        let external = |id, name: &str, rating| Experience {
            id: ExperienceId(id),
            name: Some(name.to_owned()),
            rating: Some(rating),
            distance: Some(String::from("0.5 miles")),
            ..Experience::default()
        };
        ExperienceCatalog {
            internal_experiences: vec![internal(1, "Spa", "Relax"), internal(2, "Gym", "Workout")],
            external_experiences: vec![
                external(101, "Local Cafe", 4.5),
                external(102, "Ocean Bistro", 4.2),
            ],
        }
    }

    fn loaded_page(storage: &MemoryStorage) -> ExplorePage<MemoryStorage> {
        let mut page = ExplorePage::new(AppContext::provision(storage, "/explore"));
        page.apply_fetch(Ok(catalog()));
        page
    }

    fn names(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn starts_loading_until_fetch_applied() {
        let page = ExplorePage::new(AppContext::provision(&MemoryStorage::new(), "/explore"));
        assert!(page.is_loading());
        assert!(page.catalog().is_empty());
    }

    #[test]
    fn failed_fetch_clears_loading_and_shows_notice() {
        let mut page = ExplorePage::new(AppContext::provision(&MemoryStorage::new(), "/explore"));
        page.apply_fetch(Err(FetchError::Status(500)));
        assert!(!page.is_loading());
        assert_eq!(page.notice(), Some(FETCH_FAILED_NOTICE));
        let cards = page.cards().unwrap();
        assert!(cards.internal.is_empty());
        assert!(cards.external.is_empty());

        page.dismiss_notice();
        assert!(page.notice().is_none());
    }

    #[test]
    fn search_and_rating_drive_cards() {
        let mut page = loaded_page(&MemoryStorage::new());
        let cards = page.cards().unwrap();
        assert_eq!(names(&cards.internal), vec!["Spa", "Gym"]);
        assert_eq!(names(&cards.external), vec!["Local Cafe", "Ocean Bistro"]);

        page.set_rating_option("4.5").unwrap();
        assert_eq!(names(&page.cards().unwrap().external), vec!["Local Cafe"]);

        page.set_search("SPA");
        let cards = page.cards().unwrap();
        assert_eq!(names(&cards.internal), vec!["Spa"]);
        assert!(cards.external.is_empty());

        page.set_search("");
        page.set_rating_option("").unwrap();
        assert_eq!(page.visible().unwrap().external.len(), 2);
    }

    #[test]
    fn invalid_rating_option_is_rejected_without_change() {
        let mut page = loaded_page(&MemoryStorage::new());
        page.set_rating_option("4").unwrap();
        assert!(matches!(page.set_rating_option("3"), Err(PageError::Threshold(_))));
        assert_eq!(
            page.context().experiences().unwrap().rating_filter(),
            Some(RatingThreshold::Four)
        );
    }

    #[test]
    fn favorites_persist_across_page_loads() {
        let storage = MemoryStorage::new();
        {
            let mut page = loaded_page(&storage);
            assert!(page.toggle_favorite(ExperienceId(101)).unwrap());
            let cards = page.cards().unwrap();
            assert!(cards.external.first().unwrap().favorite);
            assert_eq!(cards.external.first().unwrap().favorite_label(), "Remove from favorites");
        }

        let page = loaded_page(&storage);
        let cards = page.cards().unwrap();
        assert!(cards.external.first().unwrap().favorite);
        assert!(!cards.internal.first().unwrap().favorite);
    }

    #[test]
    fn detail_view_opens_known_experiences_only() {
        let mut page = loaded_page(&MemoryStorage::new());
        assert!(page.open_detail(ExperienceSource::Internal, ExperienceId(2)).unwrap());
        let selected = page
            .context()
            .experiences()
            .unwrap()
            .selected_experience()
            .cloned()
            .unwrap();
        assert_eq!(selected.any_name(), "Gym");

        assert!(!page.open_detail(ExperienceSource::Internal, ExperienceId(101)).unwrap());
        page.close_detail().unwrap();
        assert!(page.context().experiences().unwrap().selected_experience().is_none());
    }

    #[test]
    fn unprovisioned_page_fails_fast() {
        let mut page: ExplorePage<MemoryStorage> = ExplorePage::new(AppContext::unprovisioned());
        assert!(page.cards().is_err());
        assert!(page.toggle_favorite(ExperienceId(1)).is_err());
    }

    #[test]
    fn star_breakdown() {
        assert_eq!(StarRating::from_rating(4.8), StarRating { full: 4, half: true, empty: 0 });
        assert_eq!(StarRating::from_rating(4.2), StarRating { full: 4, half: false, empty: 1 });
        assert_eq!(StarRating::from_rating(5.0), StarRating { full: 5, half: false, empty: 0 });
        assert_eq!(StarRating::from_rating(0.5), StarRating { full: 0, half: true, empty: 4 });
        assert_eq!(StarRating::from_rating(4.5).render(), "★★★★½");
    }
}
