use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentEntry, TagList};

pub type PostId = i64;

/// Post row with the author's name and the likes count already attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// Stored image path, relative to the media root.
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub likes_count: u64,
}

/// A post loaded for a listing: record, comments count and sorted tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCard {
    pub post: PostRecord,
    pub comments_count: u64,
    pub tags: TagList,
}

/// A post loaded for its own page: record, all comments and sorted tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: PostRecord,
    pub comments: Vec<CommentEntry>,
    pub tags: TagList,
}
