use std::sync::Arc;

use blog_shared::{
    ContactsContext, IndexContext, Page, PostDetailContext, PostSummary, TagFilterContext,
    TagSummary,
};

use crate::error::DomainError;
use crate::ports::{PostRepository, TagRepository};
use crate::serialize::Serializer;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const POST_DETAIL_TEMPLATE: &str = "post-details.html";
pub const TAG_FILTER_TEMPLATE: &str = "posts-list.html";
pub const CONTACTS_TEMPLATE: &str = "contacts.html";

/// How many items each block of a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Popular posts on the index page.
    pub index_posts: u64,
    /// Tags in the popular tags block.
    pub popular_tags: u64,
    /// Popular posts in the "see also" rail of detail and tag pages.
    pub sidebar_posts: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            index_posts: 5,
            popular_tags: 5,
            sidebar_posts: 5,
        }
    }
}

/// Builds page contexts from repository reads.
#[derive(Clone)]
pub struct PageService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    serializer: Serializer,
    limits: PageLimits,
}

impl PageService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        serializer: Serializer,
        limits: PageLimits,
    ) -> Self {
        Self {
            posts,
            tags,
            serializer,
            limits,
        }
    }

    pub async fn index(&self) -> Result<Page<IndexContext>, DomainError> {
        let most_popular_posts = self.popular_posts(self.limits.index_posts).await?;
        let popular_tags = self.popular_tags().await?;

        Ok(Page::new(
            INDEX_TEMPLATE,
            IndexContext {
                most_popular_posts,
                popular_tags,
            },
        ))
    }

    pub async fn post_detail(&self, slug: &str) -> Result<Page<PostDetailContext>, DomainError> {
        let detail = self.posts.fetch_post_detail(slug).await?;
        let popular_tags = self.popular_tags().await?;
        let most_popular_posts = self.popular_posts(self.limits.sidebar_posts).await?;

        Ok(Page::new(
            POST_DETAIL_TEMPLATE,
            PostDetailContext {
                post: self.serializer.post_detail(&detail),
                popular_tags,
                most_popular_posts,
            },
        ))
    }

    pub async fn tag_filter(&self, tag_title: &str) -> Result<Page<TagFilterContext>, DomainError> {
        let posts = self.posts.fetch_posts_by_tag(tag_title).await?;
        let popular_tags = self.popular_tags().await?;
        let most_popular_posts = self.popular_posts(self.limits.sidebar_posts).await?;

        Ok(Page::new(
            TAG_FILTER_TEMPLATE,
            TagFilterContext {
                tag: tag_title.to_string(),
                popular_tags,
                posts: self.serializer.post_summaries(&posts),
                most_popular_posts,
            },
        ))
    }

    // TODO: record visits and store feedback once a contacts form exists.
    pub fn contacts(&self) -> Page<ContactsContext> {
        Page::new(CONTACTS_TEMPLATE, ContactsContext::default())
    }

    async fn popular_posts(&self, limit: u64) -> Result<Vec<PostSummary>, DomainError> {
        let cards = self.posts.fetch_popular_posts(limit).await?;
        Ok(self.serializer.post_summaries(&cards))
    }

    async fn popular_tags(&self) -> Result<Vec<TagSummary>, DomainError> {
        let tags = self.tags.fetch_popular_tags(self.limits.popular_tags).await?;
        Ok(self.serializer.tag_summaries(&tags))
    }
}
