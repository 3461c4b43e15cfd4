//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::services::leads::LeadBook;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the product catalog and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    catalog: Catalog,
    leads: LeadBook,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(),
                leads: LeadBook::new(),
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the recorded contact and quote leads.
    #[must_use]
    pub fn leads(&self) -> &LeadBook {
        &self.inner.leads
    }
}
