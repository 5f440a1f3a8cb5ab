//! Database schema migrations for the blog.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_and_tags;
mod m20240101_000002_create_posts;
mod m20240101_000003_create_post_relations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_and_tags::Migration),
            Box::new(m20240101_000002_create_posts::Migration),
            Box::new(m20240101_000003_create_post_relations::Migration),
        ]
    }
}
