//! # Blog Core
//!
//! The read side of the blog: domain aggregates, the repository ports the
//! data store must implement, the serializer that turns loaded aggregates
//! into template contexts, and the page assemblers that tie them together.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod serialize;
pub mod services;

pub use error::{DomainError, RepoError};
pub use serialize::Serializer;
pub use services::{PageLimits, PageService};
