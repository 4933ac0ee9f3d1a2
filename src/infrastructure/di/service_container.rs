//! Service container for dependency injection
//!
//! Wires settings into services and configured menu builders.

use std::sync::Arc;

use tracing::debug;

use crate::application::render::RendererKind;
use crate::application::services::{MenuBuilder, SourceService};
use crate::config::Settings;
use crate::infrastructure::cache::MemoryCache;
use crate::infrastructure::traits::{FileSystem, MenuCache, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Render cache, present when `cache.enabled` is set
    pub cache: Option<Arc<dyn MenuCache>>,

    pub source_service: SourceService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let cache: Option<Arc<dyn MenuCache>> = if settings.cache.enabled {
            Some(Arc::new(MemoryCache::new()))
        } else {
            None
        };
        Self::with_deps(settings, Arc::new(RealFileSystem), cache)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cache: Option<Arc<dyn MenuCache>>,
    ) -> Self {
        let settings = Arc::new(settings);
        let source_service = SourceService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            cache,
            source_service,
        }
    }

    /// Menu builder configured from settings.
    ///
    /// `renderer` overrides the configured renderer kind.
    pub fn menu_builder(&self, renderer: Option<RendererKind>) -> MenuBuilder {
        let kind = renderer.unwrap_or(self.settings.renderer);
        debug!(renderer = %kind, cache = self.cache.is_some(), "creating menu builder");

        let mut builder = MenuBuilder::new().with_renderer(kind.create());
        if let Some(cache) = &self.cache {
            builder.set_cache(Some(Arc::clone(cache)));
            builder.set_cache_ttl(self.settings.cache.ttl());
            builder.set_cache_key_prefix(&self.settings.cache.key_prefix);
        }
        for (name, value) in &self.settings.url_vars {
            builder.set_url_replace_var(name, value);
        }
        builder
    }
}
