#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use blog_core::domain::TagStat;
    use blog_core::error::RepoError;
    use blog_core::ports::{PostRepository, TagRepository};
    use sea_orm::prelude::DateTimeWithTimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    use crate::database::entity::tag;
    use crate::database::postgres_repo::PostgresBlogRepository;

    type Row = BTreeMap<&'static str, Value>;

    fn published(day: u32) -> DateTimeWithTimeZone {
        DateTimeWithTimeZone::parse_from_rfc3339(&format!("2024-05-{day:02}T10:00:00+00:00"))
            .unwrap()
    }

    fn post_row(id: i64, slug: &str, likes: i64, image: Option<&str>) -> Row {
        BTreeMap::from([
            ("id", id.into()),
            ("title", format!("Post {id}").into()),
            ("text", "t".repeat(250).into()),
            ("slug", slug.into()),
            ("image", image.map(str::to_string).into()),
            ("published_at", published(id as u32).into()),
            ("author", "alice".into()),
            ("likes_count", likes.into()),
        ])
    }

    fn count_row(key: &'static str, id: i64, total: i64) -> Row {
        BTreeMap::from([(key, id.into()), ("total", total.into())])
    }

    fn pair_row(post_id: i64, tag_id: i64, title: &str) -> Row {
        BTreeMap::from([
            ("post_id", post_id.into()),
            ("tag_id", tag_id.into()),
            ("title", title.into()),
        ])
    }

    #[tokio::test]
    async fn test_popular_posts_attach_relations_in_batches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                post_row(1, "one", 5, Some("covers/one.png")),
                post_row(2, "two", 5, None),
                post_row(3, "three", 1, None),
            ]])
            .append_query_results(vec![vec![count_row("post_id", 1, 2)]])
            .append_query_results(vec![vec![
                pair_row(1, 10, "beta"),
                pair_row(1, 11, "alpha"),
                pair_row(1, 10, "beta"),
                pair_row(2, 11, "alpha"),
            ]])
            .append_query_results(vec![vec![
                count_row("tag_id", 10, 1),
                count_row("tag_id", 11, 2),
            ]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let cards = repo.fetch_popular_posts(3).await.unwrap();

        let slugs: Vec<&str> = cards.iter().map(|c| c.post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one", "two", "three"]);

        let comments: Vec<u64> = cards.iter().map(|c| c.comments_count).collect();
        assert_eq!(comments, vec![2, 0, 0]);

        let first_tags: Vec<TagStat> = cards[0].tags.iter().cloned().collect();
        assert_eq!(
            first_tags,
            vec![TagStat::new("alpha", 2), TagStat::new("beta", 1)]
        );
        assert_eq!(cards[1].tags.first_title(), Some("alpha"));
        assert!(cards[2].tags.is_empty());
        assert_eq!(cards[0].post.likes_count, 5);
        assert_eq!(cards[0].post.image.as_deref(), Some("covers/one.png"));

        // posts, comment counts, tag pairs, tag counts - regardless of row count
        assert_eq!(repo.into_inner().into_transaction_log().len(), 4);
    }

    #[tokio::test]
    async fn test_popular_posts_empty_skips_batches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Row>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let cards = repo.fetch_popular_posts(5).await.unwrap();

        assert!(cards.is_empty());
        assert_eq!(repo.into_inner().into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_post_detail() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_row(7, "ownership", 3, None)]])
            .append_query_results(vec![vec![
                BTreeMap::from([
                    ("text", Value::from("First!")),
                    ("published_at", published(8).into()),
                    ("author", "bob".into()),
                ]),
                BTreeMap::from([
                    ("text", Value::from("Thanks")),
                    ("published_at", published(9).into()),
                    ("author", "alice".into()),
                ]),
            ]])
            .append_query_results(vec![vec![pair_row(7, 3, "rust")]])
            .append_query_results(vec![vec![count_row("tag_id", 3, 12)]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let detail = repo.fetch_post_detail("ownership").await.unwrap();

        assert_eq!(detail.post.text.len(), 250);
        assert_eq!(detail.post.likes_count, 3);
        let comments: Vec<(&str, &str)> = detail
            .comments
            .iter()
            .map(|c| (c.text.as_str(), c.author.as_str()))
            .collect();
        assert_eq!(comments, vec![("First!", "bob"), ("Thanks", "alice")]);
        assert_eq!(
            detail.tags.iter().cloned().collect::<Vec<_>>(),
            vec![TagStat::new("rust", 12)]
        );
        assert_eq!(repo.into_inner().into_transaction_log().len(), 4);
    }

    #[tokio::test]
    async fn test_post_detail_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Row>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let err = repo.fetch_post_detail("missing-slug").await.unwrap_err();

        assert!(matches!(
            err,
            RepoError::NotFound { entity_type: "post", ref key } if key == "missing-slug"
        ));
        assert_eq!(repo.into_inner().into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_posts_by_tag() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tag::Model {
                id: 4,
                title: "rust".to_owned(),
            }]])
            .append_query_results(vec![vec![
                post_row(9, "newest", 0, None),
                post_row(2, "older", 2, None),
            ]])
            .append_query_results(vec![vec![
                count_row("post_id", 9, 1),
                count_row("post_id", 2, 4),
            ]])
            .append_query_results(vec![vec![pair_row(2, 4, "rust"), pair_row(9, 4, "rust")]])
            .append_query_results(vec![vec![count_row("tag_id", 4, 2)]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let cards = repo.fetch_posts_by_tag("rust").await.unwrap();

        let summary: Vec<(&str, u64)> = cards
            .iter()
            .map(|c| (c.post.slug.as_str(), c.comments_count))
            .collect();
        assert_eq!(summary, vec![("newest", 1), ("older", 4)]);
        assert!(
            cards
                .iter()
                .all(|c| c.tags.iter().cloned().collect::<Vec<_>>() == vec![TagStat::new("rust", 2)])
        );
        assert_eq!(repo.into_inner().into_transaction_log().len(), 5);
    }

    #[tokio::test]
    async fn test_posts_by_unknown_tag() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let err = repo.fetch_posts_by_tag("missing-tag").await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound { entity_type: "tag", .. }));
        assert_eq!(repo.into_inner().into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_popular_tags() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                BTreeMap::from([("title", Value::from("rust")), ("posts_count", 8i64.into())]),
                BTreeMap::from([("title", Value::from("async")), ("posts_count", 3i64.into())]),
            ]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let tags = repo.fetch_popular_tags(5).await.unwrap();

        assert_eq!(
            tags,
            vec![TagStat::new("rust", 8), TagStat::new("async", 3)]
        );
        assert_eq!(repo.into_inner().into_transaction_log().len(), 1);
    }
}
