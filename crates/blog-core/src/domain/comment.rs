use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment with its author's name already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}
