//! # Blog Infrastructure
//!
//! Implementations of the repository ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL data store via SeaORM
//! - without `postgres`, only the in-memory store is available

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogStore, NewPost};

#[cfg(feature = "postgres")]
pub use database::PostgresBlogRepository;
