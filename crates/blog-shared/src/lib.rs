//! # Blog Shared
//!
//! Template-facing context types and HTTP response envelopes.
//! Everything here is plain data: strings, numbers, timestamps and nested lists.

pub mod dto;
pub mod response;

pub use dto::{
    CommentView, ContactsContext, IndexContext, Page, PostDetailContext, PostDetailView,
    PostSummary, TagFilterContext, TagSummary,
};
pub use response::ErrorResponse;
