//! Blog page handlers.

use actix_web::{HttpResponse, web};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let page = state.pages.index().await?;
    state.templates.respond(&page)
}

/// GET /post/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.pages.post_detail(&slug).await?;
    state.templates.respond(&page)
}

/// GET /tag/{tag_title}
pub async fn tag_filter(
    state: web::Data<AppState>,
    tag_title: web::Path<String>,
) -> AppResult<HttpResponse> {
    let page = state.pages.tag_filter(&tag_title).await?;
    state.templates.respond(&page)
}

/// GET /contacts
pub async fn contacts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.templates.respond(&state.pages.contacts())
}
