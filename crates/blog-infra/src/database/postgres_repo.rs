//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, JoinType, Order, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

use blog_core::domain::{PostCard, PostDetail, TagStat};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, TagRepository};

use super::entity::{post, post_like, post_tag, tag};
use super::postgres_batch::{
    PostRow, TagStatRow, attach_cards, db_error, load_comments, load_tags, post_rows,
};

/// PostgreSQL-backed posts and tags.
pub struct PostgresBlogRepository {
    db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> DbConn {
        self.db
    }
}

#[async_trait]
impl PostRepository for PostgresBlogRepository {
    async fn fetch_popular_posts(&self, limit: u64) -> Result<Vec<PostCard>, RepoError> {
        tracing::debug!(limit, "Fetching popular posts");

        let rows = post_rows()
            .order_by(post_like::Column::UserId.count(), Order::Desc)
            .order_by_desc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .into_model::<PostRow>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        attach_cards(&self.db, rows).await
    }

    async fn fetch_post_detail(&self, slug: &str) -> Result<PostDetail, RepoError> {
        tracing::debug!(slug, "Fetching post detail");

        let row = post_rows()
            .filter(post::Column::Slug.eq(slug))
            .into_model::<PostRow>()
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| RepoError::post_not_found(slug))?;

        let comments = load_comments(&self.db, row.id).await?;
        let mut tags = load_tags(&self.db, &[row.id]).await?;

        Ok(PostDetail {
            tags: tags.remove(&row.id).unwrap_or_default(),
            comments,
            post: row.into(),
        })
    }

    async fn fetch_posts_by_tag(&self, tag_title: &str) -> Result<Vec<PostCard>, RepoError> {
        tracing::debug!(tag = tag_title, "Fetching posts by tag");

        let tag = tag::Entity::find()
            .filter(tag::Column::Title.eq(tag_title))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| RepoError::tag_not_found(tag_title))?;

        let rows = post_rows()
            .join(JoinType::InnerJoin, post::Relation::PostTags.def())
            .filter(post_tag::Column::TagId.eq(tag.id))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id)
            .into_model::<PostRow>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        attach_cards(&self.db, rows).await
    }
}

#[async_trait]
impl TagRepository for PostgresBlogRepository {
    async fn fetch_popular_tags(&self, limit: u64) -> Result<Vec<TagStat>, RepoError> {
        tracing::debug!(limit, "Fetching popular tags");

        let rows = tag::Entity::find()
            .select_only()
            .column(tag::Column::Title)
            .column_as(post_tag::Column::PostId.count(), "posts_count")
            .join(JoinType::LeftJoin, tag::Relation::PostTags.def())
            .group_by(tag::Column::Id)
            .group_by(tag::Column::Title)
            .order_by(post_tag::Column::PostId.count(), Order::Desc)
            .order_by_asc(tag::Column::Title)
            .limit(limit)
            .into_model::<TagStatRow>()
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
