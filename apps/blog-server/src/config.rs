//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_core::PageLimits;
use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Public prefix stored image paths are served under.
    pub media_url: String,
    pub templates_dir: String,
    pub limits: PageLimits,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 2),
        });

        let limits = PageLimits {
            index_posts: parse_var("INDEX_POPULAR_POSTS", PageLimits::default().index_posts),
            ..PageLimits::default()
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            media_url: env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string()),
            templates_dir: env::var("TEMPLATES_DIR")
                .unwrap_or_else(|_| concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string()),
            limits,
        }
    }

    /// Glob handed to tera.
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*.html", self.templates_dir.trim_end_matches('/'))
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
