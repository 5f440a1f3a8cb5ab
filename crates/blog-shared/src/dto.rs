//! Context objects handed to the templates.
//!
//! Field names are part of the template contract and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag as shown in tag clouds and on post cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    pub title: String,
    /// Number of posts carrying the tag.
    pub posts_with_tag: u64,
}

/// A post card: teaser plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagSummary>,
    pub first_tag_title: Option<String>,
}

/// A single comment under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

/// The full post as shown on its own page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetailView {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentView>,
    pub likes_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagSummary>,
    pub first_tag_title: Option<String>,
}

/// Context for `index.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexContext {
    pub most_popular_posts: Vec<PostSummary>,
    pub popular_tags: Vec<TagSummary>,
}

/// Context for `post-details.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetailContext {
    pub post: PostDetailView,
    pub popular_tags: Vec<TagSummary>,
    pub most_popular_posts: Vec<PostSummary>,
}

/// Context for `posts-list.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagFilterContext {
    pub tag: String,
    pub popular_tags: Vec<TagSummary>,
    pub posts: Vec<PostSummary>,
    pub most_popular_posts: Vec<PostSummary>,
}

/// Context for `contacts.html`. Intentionally empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsContext {}

/// A template name paired with the context it is rendered with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<C> {
    pub template: &'static str,
    pub context: C,
}

impl<C> Page<C> {
    pub fn new(template: &'static str, context: C) -> Self {
        Self { template, context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_summary_keys() {
        let summary = PostSummary {
            title: "Hello".to_string(),
            teaser_text: "Hi".to_string(),
            author: "alice".to_string(),
            comments_amount: 2,
            image_url: None,
            published_at: DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
            slug: "hello".to_string(),
            tags: vec![TagSummary {
                title: "rust".to_string(),
                posts_with_tag: 3,
            }],
            first_tag_title: Some("rust".to_string()),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Hello",
                "teaser_text": "Hi",
                "author": "alice",
                "comments_amount": 2,
                "image_url": null,
                "published_at": "2024-01-02T03:04:05Z",
                "slug": "hello",
                "tags": [{"title": "rust", "posts_with_tag": 3}],
                "first_tag_title": "rust",
            })
        );
    }

    #[test]
    fn test_contacts_context_is_empty_object() {
        let value = serde_json::to_value(ContactsContext::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
