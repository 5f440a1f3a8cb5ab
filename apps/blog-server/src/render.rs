//! Presentation layer - renders page contexts with tera.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use blog_shared::Page;
use serde::Serialize;
use tera::{Context, Tera};

use crate::middleware::error::{AppError, AppResult};

/// Compiled page templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Compile every template matching `glob`.
    pub fn load(glob: &str) -> Result<Self, tera::Error> {
        let tera = Tera::new(glob)?;
        tracing::info!(
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    pub fn render<C: Serialize>(&self, page: &Page<C>) -> AppResult<String> {
        let context = Context::from_serialize(&page.context)?;
        Ok(self.tera.render(page.template, &context)?)
    }

    /// Render `page` into a 200 HTML response.
    pub fn respond<C: Serialize>(&self, page: &Page<C>) -> AppResult<HttpResponse> {
        let body = self.render(page)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful message in the source chain
        let mut detail = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        AppError::Internal(detail)
    }
}
