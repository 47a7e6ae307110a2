//! Theme context.
//!
//! Holds the current [`Theme`] and persists it as a plain string under
//! [`THEME_KEY`]. It shares a storage backend with the experience store
//! but never reads or writes the store's state.

use explorer_types::{Theme, ThemePalette};
use tracing::{debug, warn};

use crate::storage::DurableStorage;

/// Storage key holding the theme identifier.
pub const THEME_KEY: &str = "theme";

/// Class toggled on the document root by the dark theme.
pub const DARK_ROOT_CLASS: &str = "dark";

/// Current theme plus its setter.
#[derive(Debug)]
pub struct ThemeContext<S: DurableStorage> {
    theme: Theme,
    /// Whether `theme` came from the user (stored or set) rather than
    /// the route default.
    chosen: bool,
    storage: S,
}

impl<S: DurableStorage> ThemeContext<S> {
    /// Build the context for a page at `route`.
    ///
    /// Uses the stored theme when there is a valid one; otherwise the
    /// route default (dark on the landing page, light elsewhere).
    pub fn provision(storage: S, route: &str) -> Self {
        let stored = match storage.get_item(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, key = THEME_KEY, "Could not read stored theme");
                None
            }
        };

        let stored = stored.and_then(|raw| {
            raw.parse::<Theme>()
                .map_err(|e| warn!(error = %e, "Ignoring stored theme"))
                .ok()
        });

        let (theme, chosen) = stored.map_or_else(
            || (Theme::default_for_route(route), false),
            |theme| (theme, true),
        );
        debug!(%theme, chosen, route, "Theme context provisioned");

        Self {
            theme,
            chosen,
            storage,
        }
    }

    /// The current theme.
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Class names for the current theme.
    pub const fn palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    /// Class to place on the document root, if any.
    pub const fn root_class(&self) -> Option<&'static str> {
        if self.theme.is_dark() {
            Some(DARK_ROOT_CLASS)
        } else {
            None
        }
    }

    /// Switch to `theme` and persist it.
    ///
    /// A storage failure is logged; the new theme still applies for the
    /// rest of the session.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.chosen = true;
        if let Err(e) = self.storage.set_item(THEME_KEY, theme.as_str()) {
            warn!(error = %e, key = THEME_KEY, "Failed to persist theme");
        }
        debug!(%theme, "Theme changed");
    }

    /// Re-evaluate the route default after navigation.
    ///
    /// Has no effect once the user has picked a theme.
    pub fn on_route_change(&mut self, route: &str) {
        if !self.chosen {
            self.theme = Theme::default_for_route(route);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_follow_route_when_nothing_stored() {
        assert_eq!(ThemeContext::provision(MemoryStorage::new(), "/").theme(), Theme::Dark);
        assert_eq!(
            ThemeContext::provision(MemoryStorage::new(), "/explore").theme(),
            Theme::Light
        );
    }

    #[test]
    fn set_theme_persists_plain_identifier() {
        let storage = MemoryStorage::new();
        let mut ctx = ThemeContext::provision(storage.clone(), "/explore");
        ctx.set_theme(Theme::Purple);
        assert_eq!(storage.get_item(THEME_KEY).unwrap().as_deref(), Some("purple"));

        let reloaded = ThemeContext::provision(storage, "/");
        assert_eq!(reloaded.theme(), Theme::Purple);
    }

    #[test]
    fn stored_choice_survives_navigation() {
        let mut ctx = ThemeContext::provision(MemoryStorage::new(), "/");
        ctx.on_route_change("/explore");
        assert_eq!(ctx.theme(), Theme::Light);
        ctx.set_theme(Theme::Green);
        ctx.on_route_change("/");
        assert_eq!(ctx.theme(), Theme::Green);
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set_item(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeContext::provision(storage, "/explore").theme(), Theme::Light);
    }

    #[test]
    fn dark_theme_marks_document_root() {
        let mut ctx = ThemeContext::provision(MemoryStorage::disabled(), "/explore");
        assert_eq!(ctx.root_class(), None);
        ctx.set_theme(Theme::Dark);
        assert_eq!(ctx.root_class(), Some("dark"));
        assert_eq!(ctx.palette().background, "bg-gray-900");
    }
}
