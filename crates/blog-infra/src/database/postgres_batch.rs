//! Row shapes and batch loaders shared by the PostgreSQL repositories.
//!
//! Every loader takes the ids of a whole result set and issues one query for
//! it. Counts come from their own grouped queries so that joins never
//! multiply them.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};

use blog_core::domain::{CommentEntry, PostCard, PostId, PostRecord, TagId, TagList, TagStat};
use blog_core::error::RepoError;

use super::entity::{comment, post, post_like, post_tag, tag, user};

/// Post columns plus author name and likes count.
#[derive(Debug, FromQueryResult)]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: Option<String>,
    pub published_at: DateTimeWithTimeZone,
    pub author: String,
    pub likes_count: i64,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            text: row.text,
            slug: row.slug,
            image: row.image,
            published_at: row.published_at.with_timezone(&Utc),
            author: row.author,
            likes_count: to_count(row.likes_count),
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct PostCountRow {
    post_id: i64,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
struct PostTagRow {
    post_id: i64,
    tag_id: i64,
    title: String,
}

#[derive(Debug, FromQueryResult)]
struct TagCountRow {
    tag_id: i64,
    total: i64,
}

#[derive(Debug, FromQueryResult)]
pub(crate) struct TagStatRow {
    pub title: String,
    pub posts_count: i64,
}

impl From<TagStatRow> for TagStat {
    fn from(row: TagStatRow) -> Self {
        TagStat::new(row.title, to_count(row.posts_count))
    }
}

#[derive(Debug, FromQueryResult)]
struct CommentRow {
    text: String,
    published_at: DateTimeWithTimeZone,
    author: String,
}

impl From<CommentRow> for CommentEntry {
    fn from(row: CommentRow) -> Self {
        Self {
            text: row.text,
            published_at: row.published_at.with_timezone(&Utc),
            author: row.author,
        }
    }
}

/// SQL COUNT is never negative.
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

pub(crate) fn db_error(err: DbErr) -> RepoError {
    match err {
        err @ (DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => {
            RepoError::Connection(err.to_string())
        }
        other => RepoError::Query(other.to_string()),
    }
}

/// Posts joined with their author and aggregated likes, one row per post.
///
/// Callers add filters, ordering and limits.
pub(crate) fn post_rows() -> Select<post::Entity> {
    post::Entity::find()
        .select_only()
        .columns([
            post::Column::Id,
            post::Column::Title,
            post::Column::Text,
            post::Column::Slug,
            post::Column::Image,
            post::Column::PublishedAt,
        ])
        .column_as(user::Column::Username, "author")
        .column_as(post_like::Column::UserId.count(), "likes_count")
        .join(JoinType::InnerJoin, post::Relation::Author.def())
        .join(JoinType::LeftJoin, post::Relation::Likes.def())
        .group_by(post::Column::Id)
        .group_by(user::Column::Username)
}

/// Number of comments per post. Posts without comments are absent.
async fn load_comment_counts(
    db: &DbConn,
    ids: &[PostId],
) -> Result<HashMap<PostId, u64>, RepoError> {
    let rows = comment::Entity::find()
        .select_only()
        .column(comment::Column::PostId)
        .column_as(comment::Column::Id.count(), "total")
        .filter(comment::Column::PostId.is_in(ids.iter().copied()))
        .group_by(comment::Column::PostId)
        .into_model::<PostCountRow>()
        .all(db)
        .await
        .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|row| (row.post_id, to_count(row.total)))
        .collect())
}

/// Tags per post, each annotated with its overall posts count.
///
/// One query for the (post, tag) pairs, one grouped query for the counts of
/// the tags seen. The second query is skipped when no post has tags.
pub(crate) async fn load_tags(
    db: &DbConn,
    ids: &[PostId],
) -> Result<HashMap<PostId, TagList>, RepoError> {
    let pairs = post_tag::Entity::find()
        .select_only()
        .column(post_tag::Column::PostId)
        .column(post_tag::Column::TagId)
        .column_as(tag::Column::Title, "title")
        .join(JoinType::InnerJoin, post_tag::Relation::Tag.def())
        .filter(post_tag::Column::PostId.is_in(ids.iter().copied()))
        .order_by_asc(post_tag::Column::PostId)
        .order_by_asc(tag::Column::Title)
        .into_model::<PostTagRow>()
        .all(db)
        .await
        .map_err(db_error)?;

    if pairs.is_empty() {
        return Ok(HashMap::new());
    }

    let mut tag_ids: Vec<TagId> = pairs.iter().map(|pair| pair.tag_id).collect();
    tag_ids.sort_unstable();
    tag_ids.dedup();

    let counts: HashMap<TagId, u64> = post_tag::Entity::find()
        .select_only()
        .column(post_tag::Column::TagId)
        .column_as(post_tag::Column::PostId.count(), "total")
        .filter(post_tag::Column::TagId.is_in(tag_ids))
        .group_by(post_tag::Column::TagId)
        .into_model::<TagCountRow>()
        .all(db)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(|row| (row.tag_id, to_count(row.total)))
        .collect();

    let mut grouped: HashMap<PostId, Vec<TagStat>> = HashMap::new();
    for pair in pairs {
        let posts_count = counts.get(&pair.tag_id).copied().unwrap_or_default();
        grouped
            .entry(pair.post_id)
            .or_default()
            .push(TagStat::new(pair.title, posts_count));
    }

    Ok(grouped
        .into_iter()
        .map(|(post_id, tags)| (post_id, TagList::new(tags)))
        .collect())
}

/// Comments of one post with author names, oldest first.
pub(crate) async fn load_comments(
    db: &DbConn,
    post_id: PostId,
) -> Result<Vec<CommentEntry>, RepoError> {
    let rows = comment::Entity::find()
        .select_only()
        .column(comment::Column::Text)
        .column(comment::Column::PublishedAt)
        .column_as(user::Column::Username, "author")
        .join(JoinType::InnerJoin, comment::Relation::Author.def())
        .filter(comment::Column::PostId.eq(post_id))
        .order_by_asc(comment::Column::PublishedAt)
        .order_by_asc(comment::Column::Id)
        .into_model::<CommentRow>()
        .all(db)
        .await
        .map_err(db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Attach comment counts and tags to a page of post rows, keeping row order.
pub(crate) async fn attach_cards(
    db: &DbConn,
    rows: Vec<PostRow>,
) -> Result<Vec<PostCard>, RepoError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<PostId> = rows.iter().map(|row| row.id).collect();
    let comment_counts = load_comment_counts(db, &ids).await?;
    let mut tags = load_tags(db, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            PostCard {
                comments_count: comment_counts.get(&id).copied().unwrap_or_default(),
                tags: tags.remove(&id).unwrap_or_default(),
                post: row.into(),
            }
        })
        .collect())
}
