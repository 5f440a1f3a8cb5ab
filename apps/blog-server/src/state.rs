//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{PostRepository, TagRepository};
use blog_core::{PageService, Serializer};
use blog_infra::InMemoryBlogStore;

#[cfg(feature = "postgres")]
use blog_infra::{PostgresBlogRepository, database::connect};

use crate::config::AppConfig;
use crate::render::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pages: PageService,
    pub templates: Arc<Templates>,
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn TagRepository>);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let templates = Templates::load(&config.templates_glob())?;
        let (posts, tags) = Self::repositories(config).await;

        tracing::info!(limits = ?config.limits, "Application state initialized");

        Ok(Self::with_repositories(config, posts, tags, templates))
    }

    pub fn with_repositories(
        config: &AppConfig,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        templates: Templates,
    ) -> Self {
        let serializer = Serializer::new(config.media_url.clone());
        Self {
            pages: PageService::new(posts, tags, serializer, config.limits),
            templates: Arc::new(templates),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return in_memory();
        };

        match connect(db_config).await {
            Ok(conn) => {
                let repo = Arc::new(PostgresBlogRepository::new(conn));
                (repo.clone(), repo)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory store");
        in_memory()
    }
}

fn in_memory() -> Repositories {
    let store = Arc::new(InMemoryBlogStore::new());
    (store.clone(), store)
}
