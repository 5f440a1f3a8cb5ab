use async_trait::async_trait;

use crate::domain::{PostCard, PostDetail, TagStat};
use crate::error::RepoError;

/// Read access to posts.
///
/// Every related record the serializer needs (author name, counts, tags,
/// comments) must be attached before the call returns. Implementations
/// load relations in batches for the whole result set, never per post.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts ordered by likes (desc), then publication time (desc), then id (asc).
    async fn fetch_popular_posts(&self, limit: u64) -> Result<Vec<PostCard>, RepoError>;

    /// The post with the given slug, with comments oldest first.
    ///
    /// Fails with [`RepoError::NotFound`] when no post has this slug.
    async fn fetch_post_detail(&self, slug: &str) -> Result<PostDetail, RepoError>;

    /// Posts carrying the tag, newest first.
    ///
    /// Fails with [`RepoError::NotFound`] when the tag does not exist.
    async fn fetch_posts_by_tag(&self, tag_title: &str) -> Result<Vec<PostCard>, RepoError>;
}

/// Read access to tags.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Tags ordered by number of posts (desc), then title (asc).
    async fn fetch_popular_tags(&self, limit: u64) -> Result<Vec<TagStat>, RepoError>;
}
