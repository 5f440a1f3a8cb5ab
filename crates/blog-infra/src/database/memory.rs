//! In-memory blog store - used when no database is configured.
//!
//! Applies the same ordering and counting rules as the PostgreSQL
//! repository. Data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{
    CommentEntry, PostCard, PostDetail, PostId, PostRecord, TagId, TagList, TagStat, User, UserId,
};
use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, TagRepository};

/// Fields of a post to insert.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(
        author_id: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        text: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            slug: slug.into(),
            text: text.into(),
            image: None,
            published_at,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

struct StoredComment {
    id: i64,
    post_id: PostId,
    author_id: UserId,
    text: String,
    published_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<UserId, String>,
    posts: BTreeMap<PostId, NewPost>,
    tags: BTreeMap<TagId, String>,
    /// May hold duplicate pairs; readers deduplicate.
    post_tags: Vec<(PostId, TagId)>,
    comments: Vec<StoredComment>,
    likes: BTreeSet<(PostId, UserId)>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn require_user(&self, id: UserId) -> Result<(), RepoError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::NotFound {
                entity_type: "user",
                key: id.to_string(),
            })
        }
    }

    fn require_post(&self, id: PostId) -> Result<(), RepoError> {
        if self.posts.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::NotFound {
                entity_type: "post",
                key: id.to_string(),
            })
        }
    }

    fn username(&self, id: UserId) -> String {
        self.users.get(&id).cloned().unwrap_or_default()
    }

    fn likes_count(&self, post_id: PostId) -> u64 {
        self.likes.iter().filter(|(p, _)| *p == post_id).count() as u64
    }

    fn comments_count(&self, post_id: PostId) -> u64 {
        self.comments.iter().filter(|c| c.post_id == post_id).count() as u64
    }

    /// Distinct posts carrying the tag.
    fn posts_count(&self, tag_id: TagId) -> u64 {
        self.post_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .map(|(p, _)| *p)
            .collect::<BTreeSet<_>>()
            .len() as u64
    }

    fn tags_of(&self, post_id: PostId) -> TagList {
        self.post_tags
            .iter()
            .filter(|(p, _)| *p == post_id)
            .filter_map(|(_, tag_id)| {
                let title = self.tags.get(tag_id)?;
                Some(TagStat::new(title.clone(), self.posts_count(*tag_id)))
            })
            .collect()
    }

    fn record(&self, id: PostId, post: &NewPost) -> PostRecord {
        PostRecord {
            id,
            title: post.title.clone(),
            text: post.text.clone(),
            slug: post.slug.clone(),
            image: post.image.clone(),
            published_at: post.published_at,
            author: self.username(post.author_id),
            likes_count: self.likes_count(id),
        }
    }

    fn card(&self, id: PostId, post: &NewPost) -> PostCard {
        PostCard {
            post: self.record(id, post),
            comments_count: self.comments_count(id),
            tags: self.tags_of(id),
        }
    }
}

/// Blog store backed by in-process collections.
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    pub async fn add_user(&self, username: impl Into<String>) -> User {
        let mut tables = self.tables.write().await;
        let id = tables.allocate_id();
        let username = username.into();
        tables.users.insert(id, username.clone());
        User::new(id, username)
    }

    pub async fn add_post(&self, post: NewPost) -> Result<PostId, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_user(post.author_id)?;
        if tables.posts.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Query(format!("duplicate slug '{}'", post.slug)));
        }
        let id = tables.allocate_id();
        tables.posts.insert(id, post);
        Ok(id)
    }

    /// Insert a tag, or return the id of the existing tag with this title.
    pub async fn add_tag(&self, title: impl Into<String>) -> TagId {
        let title = title.into();
        let mut tables = self.tables.write().await;
        if let Some((id, _)) = tables.tags.iter().find(|(_, t)| **t == title) {
            return *id;
        }
        let id = tables.allocate_id();
        tables.tags.insert(id, title);
        id
    }

    pub async fn tag_post(&self, post_id: PostId, tag_id: TagId) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_post(post_id)?;
        if !tables.tags.contains_key(&tag_id) {
            return Err(RepoError::NotFound {
                entity_type: "tag",
                key: tag_id.to_string(),
            });
        }
        tables.post_tags.push((post_id, tag_id));
        Ok(())
    }

    pub async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        text: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_post(post_id)?;
        tables.require_user(author_id)?;
        let id = tables.allocate_id();
        tables.comments.push(StoredComment {
            id,
            post_id,
            author_id,
            text: text.into(),
            published_at,
        });
        Ok(())
    }

    /// Liking twice is a no-op.
    pub async fn add_like(&self, post_id: PostId, user_id: UserId) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_post(post_id)?;
        tables.require_user(user_id)?;
        tables.likes.insert((post_id, user_id));
        Ok(())
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn fetch_popular_posts(&self, limit: u64) -> Result<Vec<PostCard>, RepoError> {
        let tables = self.tables.read().await;

        let mut cards: Vec<PostCard> = tables
            .posts
            .iter()
            .map(|(id, post)| tables.card(*id, post))
            .collect();
        cards.sort_by(|a, b| {
            b.post
                .likes_count
                .cmp(&a.post.likes_count)
                .then(b.post.published_at.cmp(&a.post.published_at))
                .then(a.post.id.cmp(&b.post.id))
        });
        cards.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(cards)
    }

    async fn fetch_post_detail(&self, slug: &str) -> Result<PostDetail, RepoError> {
        let tables = self.tables.read().await;

        let (id, post) = tables
            .posts
            .iter()
            .find(|(_, post)| post.slug == slug)
            .ok_or_else(|| RepoError::post_not_found(slug))?;

        let mut comments: Vec<&StoredComment> =
            tables.comments.iter().filter(|c| c.post_id == *id).collect();
        comments.sort_by(|a, b| a.published_at.cmp(&b.published_at).then(a.id.cmp(&b.id)));

        Ok(PostDetail {
            post: tables.record(*id, post),
            comments: comments
                .into_iter()
                .map(|c| CommentEntry {
                    text: c.text.clone(),
                    published_at: c.published_at,
                    author: tables.username(c.author_id),
                })
                .collect(),
            tags: tables.tags_of(*id),
        })
    }

    async fn fetch_posts_by_tag(&self, tag_title: &str) -> Result<Vec<PostCard>, RepoError> {
        let tables = self.tables.read().await;

        let tag_id = tables
            .tags
            .iter()
            .find(|(_, title)| title.as_str() == tag_title)
            .map(|(id, _)| *id)
            .ok_or_else(|| RepoError::tag_not_found(tag_title))?;

        let post_ids: BTreeSet<PostId> = tables
            .post_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .map(|(p, _)| *p)
            .collect();

        let mut cards: Vec<PostCard> = post_ids
            .into_iter()
            .filter_map(|id| tables.posts.get(&id).map(|post| tables.card(id, post)))
            .collect();
        cards.sort_by(|a, b| {
            b.post
                .published_at
                .cmp(&a.post.published_at)
                .then(a.post.id.cmp(&b.post.id))
        });

        Ok(cards)
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn fetch_popular_tags(&self, limit: u64) -> Result<Vec<TagStat>, RepoError> {
        let tables = self.tables.read().await;

        let mut tags: Vec<TagStat> = tables
            .tags
            .iter()
            .map(|(id, title)| TagStat::new(title.clone(), tables.posts_count(*id)))
            .collect();
        tags.sort_by(|a, b| {
            b.posts_count
                .cmp(&a.posts_count)
                .then_with(|| a.title.cmp(&b.title))
        });
        tags.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(tags)
    }
}
