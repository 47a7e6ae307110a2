//! Application-root provisioning of the client state containers.
//!
//! [`AppContext`] owns the experience store and the theme context and
//! hands them to the presentation layer. Initialisation order is fixed:
//! construct, rehydrate from durable storage, expose. Reading a context
//! before it is provided returns [`ContextError::NotProvisioned`] at once
//! instead of falling back to a default.

use tracing::error;

use crate::error::ContextError;
use crate::storage::DurableStorage;
use crate::store::ExperienceStore;
use crate::theme::ThemeContext;

/// Name reported for the experience store context.
const EXPERIENCE_CONTEXT: &str = "ExperienceStore";

/// Name reported for the theme context.
const THEME_CONTEXT: &str = "ThemeContext";

/// Container for every client-side context.
#[derive(Debug)]
pub struct AppContext<S: DurableStorage> {
    experiences: Option<ExperienceStore<S>>,
    theme: Option<ThemeContext<S>>,
}

impl<S: DurableStorage> Default for AppContext<S> {
    fn default() -> Self {
        Self::unprovisioned()
    }
}

impl<S: DurableStorage + Clone> AppContext<S> {
    /// Provision both contexts over one storage backend for a page at
    /// `route`.
    pub fn provision(storage: &S, route: &str) -> Self {
        let mut ctx = Self::unprovisioned();
        ctx.provide_experiences(ExperienceStore::provision(storage.clone()));
        ctx.provide_theme(ThemeContext::provision(storage.clone(), route));
        tracing::info!(route, "Application contexts provisioned");
        ctx
    }
}

impl<S: DurableStorage> AppContext<S> {
    /// A context with no providers yet.
    pub const fn unprovisioned() -> Self {
        Self {
            experiences: None,
            theme: None,
        }
    }

    /// Install the experience store provider.
    pub fn provide_experiences(&mut self, store: ExperienceStore<S>) {
        self.experiences = Some(store);
    }

    /// Install the theme provider.
    pub fn provide_theme(&mut self, theme: ThemeContext<S>) {
        self.theme = Some(theme);
    }

    /// The experience store.
    pub fn experiences(&self) -> Result<&ExperienceStore<S>, ContextError> {
        self.experiences.as_ref().ok_or_else(|| not_provisioned(EXPERIENCE_CONTEXT))
    }

    /// The experience store, mutably.
    pub fn experiences_mut(&mut self) -> Result<&mut ExperienceStore<S>, ContextError> {
        self.experiences.as_mut().ok_or_else(|| not_provisioned(EXPERIENCE_CONTEXT))
    }

    /// The theme context.
    pub fn theme(&self) -> Result<&ThemeContext<S>, ContextError> {
        self.theme.as_ref().ok_or_else(|| not_provisioned(THEME_CONTEXT))
    }

    /// The theme context, mutably.
    pub fn theme_mut(&mut self) -> Result<&mut ThemeContext<S>, ContextError> {
        self.theme.as_mut().ok_or_else(|| not_provisioned(THEME_CONTEXT))
    }
}

fn not_provisioned(context: &'static str) -> ContextError {
    error!(context, "Context accessed outside its provider");
    ContextError::NotProvisioned(context)
}
