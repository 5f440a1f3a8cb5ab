//! Turns loaded aggregates into template contexts.
//!
//! The serializer only ever sees plain domain values. It holds no data store
//! handle, so it cannot issue queries: anything it needs must already be
//! attached by the repository.

use blog_shared::{CommentView, PostDetailView, PostSummary, TagSummary};

use crate::domain::{CommentEntry, PostCard, PostDetail, TagList, TagStat};

/// Number of characters kept in a teaser.
pub const TEASER_LENGTH: usize = 200;

/// First [`TEASER_LENGTH`] characters of `text`, without any ellipsis.
pub fn teaser(text: &str) -> String {
    text.chars().take(TEASER_LENGTH).collect()
}

#[derive(Debug, Clone)]
pub struct Serializer {
    media_url: String,
}

impl Serializer {
    /// `media_url` is the public prefix stored image paths are served under.
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }

    pub fn image_url(&self, image: Option<&str>) -> Option<String> {
        let path = image.filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        Some(format!(
            "{}/{}",
            self.media_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    pub fn tag_summary(&self, tag: &TagStat) -> TagSummary {
        TagSummary {
            title: tag.title.clone(),
            posts_with_tag: tag.posts_count,
        }
    }

    pub fn tag_summaries<'a>(&self, tags: impl IntoIterator<Item = &'a TagStat>) -> Vec<TagSummary> {
        tags.into_iter().map(|tag| self.tag_summary(tag)).collect()
    }

    pub fn post_summary(&self, card: &PostCard) -> PostSummary {
        let post = &card.post;
        PostSummary {
            title: post.title.clone(),
            teaser_text: teaser(&post.text),
            author: post.author.clone(),
            comments_amount: card.comments_count,
            image_url: self.image_url(post.image.as_deref()),
            published_at: post.published_at,
            slug: post.slug.clone(),
            tags: self.tag_summaries(card.tags.iter()),
            first_tag_title: first_tag_title(&card.tags),
        }
    }

    pub fn post_summaries(&self, cards: &[PostCard]) -> Vec<PostSummary> {
        cards.iter().map(|card| self.post_summary(card)).collect()
    }

    pub fn post_detail(&self, detail: &PostDetail) -> PostDetailView {
        let post = &detail.post;
        PostDetailView {
            title: post.title.clone(),
            text: post.text.clone(),
            author: post.author.clone(),
            comments: detail.comments.iter().map(comment_view).collect(),
            likes_amount: post.likes_count,
            image_url: self.image_url(post.image.as_deref()),
            published_at: post.published_at,
            slug: post.slug.clone(),
            tags: self.tag_summaries(detail.tags.iter()),
            first_tag_title: first_tag_title(&detail.tags),
        }
    }
}

fn first_tag_title(tags: &TagList) -> Option<String> {
    tags.first_title().map(str::to_string)
}

fn comment_view(comment: &CommentEntry) -> CommentView {
    CommentView {
        text: comment.text.clone(),
        published_at: comment.published_at,
        author: comment.author.clone(),
    }
}
