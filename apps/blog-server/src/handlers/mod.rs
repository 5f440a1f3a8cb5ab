//! HTTP handlers and route configuration.

mod health;
mod pages;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/post/{slug}", web::get().to(pages::post_detail))
        .route("/tag/{tag_title}", web::get().to(pages::tag_filter))
        .route("/contacts", web::get().to(pages::contacts))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use blog_core::PageLimits;
    use blog_infra::{InMemoryBlogStore, NewPost};
    use chrono::{TimeZone, Utc};

    use super::configure_routes;
    use crate::config::AppConfig;
    use crate::observability::RequestIdMiddleware;
    use crate::render::Templates;
    use crate::state::AppState;

    fn config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: None,
            media_url: "/media/".to_string(),
            templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").to_string(),
            limits: PageLimits::default(),
        }
    }

    async fn seeded_state() -> AppState {
        let store = Arc::new(InMemoryBlogStore::new());
        let author = store.add_user("ferris").await;
        let reader = store.add_user("reader").await;

        let post = store
            .add_post(
                NewPost::new(
                    author.id,
                    "Borrowing explained",
                    "borrowing",
                    "References let you use a value without taking ownership.",
                    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
                )
                .with_image("covers/borrow.png"),
            )
            .await
            .unwrap();
        store
            .add_post(NewPost::new(
                author.id,
                "Untagged notes",
                "notes",
                "Nothing to see here.",
                Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
            ))
            .await
            .unwrap();

        let tag = store.add_tag("rust").await;
        store.tag_post(post, tag).await.unwrap();
        store.add_like(post, reader.id).await.unwrap();
        store
            .add_comment(
                post,
                reader.id,
                "Finally it clicks",
                Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap(),
            )
            .await
            .unwrap();

        let config = config();
        let templates = Templates::load(&config.templates_glob()).unwrap();
        AppState::with_repositories(&config, store.clone(), store, templates)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .wrap(RequestIdMiddleware)
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    async fn get_body(path: &str) -> (StatusCode, String) {
        let app = app!(seeded_state().await);
        let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn test_index_lists_posts_and_tags() {
        let (status, body) = get_body("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Borrowing explained"));
        assert!(body.contains("Untagged notes"));
        assert!(body.contains("/tag/rust"));
        assert!(body.contains("&#x2F;media&#x2F;covers&#x2F;borrow.png"));
    }

    #[actix_web::test]
    async fn test_post_detail_page() {
        let (status, body) = get_body("/post/borrowing").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("References let you use a value without taking ownership."));
        assert!(body.contains("Finally it clicks"));
        assert!(body.contains("reader"));
    }

    #[actix_web::test]
    async fn test_missing_post_is_404() {
        let (status, body) = get_body("/post/missing-slug").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let problem: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(problem["status"], 404);
        assert_eq!(problem["detail"], "post 'missing-slug' not found");
    }

    #[actix_web::test]
    async fn test_tag_page() {
        let (status, body) = get_body("/tag/rust").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Borrowing explained"));
    }

    #[actix_web::test]
    async fn test_missing_tag_is_404() {
        let (status, _) = get_body("/tag/missing-tag").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_contacts_page() {
        let (status, body) = get_body("/contacts").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Contacts"));
    }

    #[actix_web::test]
    async fn test_health_check() {
        let (status, body) = get_body("/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let health: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(health["status"], "ok");
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let app = app!(seeded_state().await);
        let req = test::TestRequest::get()
            .uri("/contacts")
            .insert_header(("X-Request-ID", "req-42"))
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
    }

    #[actix_web::test]
    async fn test_request_id_is_generated() {
        let app = app!(seeded_state().await);
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let id = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
