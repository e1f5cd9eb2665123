//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CategoryFilterService, PaginationService};
use crate::application::LinkFactory;
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::{
    CategoryProvider, FragmentUrlBuilder, PotentialChecker, UrlBuilder,
};
use crate::infrastructure::uri::QueryStringUrlBuilder;

/// Container holding settings and collaborators; hands out request services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Category storage
    pub provider: Arc<dyn CategoryProvider>,

    /// URL construction
    pub urls: Arc<dyn UrlBuilder>,

    /// Record existence probe, used when `filter.check_potential` is on
    pub checker: Option<Arc<dyn PotentialChecker>>,

    /// Replacement for default fragment URLs
    pub fragment: Option<Arc<dyn FragmentUrlBuilder>>,
}

impl ServiceContainer {
    /// Create a container whose URLs are built against `links.base_url`.
    pub fn new(settings: Settings, provider: Arc<dyn CategoryProvider>) -> InfraResult<Self> {
        let urls = Arc::new(QueryStringUrlBuilder::new(&settings.links.base_url)?);
        Ok(Self::with_deps(settings, provider, urls))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        provider: Arc<dyn CategoryProvider>,
        urls: Arc<dyn UrlBuilder>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            provider,
            urls,
            checker: None,
            fragment: None,
        }
    }

    pub fn with_potential_checker(mut self, checker: Arc<dyn PotentialChecker>) -> Self {
        self.checker = Some(checker);
        self
    }

    pub fn with_fragment_builder(mut self, fragment: Arc<dyn FragmentUrlBuilder>) -> Self {
        self.fragment = Some(fragment);
        self
    }

    fn link_factory(&self, record_uid_argument_key: &str) -> LinkFactory {
        let links = &self.settings.links;
        LinkFactory::new(self.urls.clone(), links.fragment_page_type)
            .with_record_uid(record_uid_argument_key, links.record_uid)
            .with_fragment_override(self.fragment.clone())
    }

    pub fn filter_service(&self) -> CategoryFilterService {
        let links = self.link_factory(&self.settings.links.record_uid_argument_key);
        CategoryFilterService::new(self.settings.filter.clone(), self.provider.clone(), links)
            .with_potential_checker(self.checker.clone())
    }

    pub fn pagination_service(&self) -> PaginationService {
        let links = self.link_factory(&self.settings.pagination.record_uid_argument_key);
        PaginationService::new(self.settings.pagination.clone(), links)
    }
}
