//! Page assemblers.

mod pages;

pub use pages::{
    CONTACTS_TEMPLATE, INDEX_TEMPLATE, POST_DETAIL_TEMPLATE, PageLimits, PageService,
    TAG_FILTER_TEMPLATE,
};
