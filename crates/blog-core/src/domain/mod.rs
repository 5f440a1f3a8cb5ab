//! Domain entities - the read-side aggregates of the blog.

mod comment;
mod post;
mod tag;
mod user;

pub use comment::CommentEntry;
pub use post::{PostCard, PostDetail, PostId, PostRecord};
pub use tag::{TagId, TagList, TagStat};
pub use user::{User, UserId};
