use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::NewEntry;

/// The dashboard stays lightweight; older entries are simply not shown.
/// TODO: fetch further pages once an entry-archive page exists.
pub const DASHBOARD_LIMIT: i64 = 9;
pub const FAVORITES_LIMIT: i64 = 20;

/// A journal entry, owned by exactly one writer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub writer_id: String,
    pub title: String,
    pub date: Date,
    pub content: String,
    pub favorite: bool,
    pub created_at: OffsetDateTime,
}

impl Entry {
    pub async fn create(
        db: &PgPool,
        writer_id: &str,
        new_entry: &NewEntry,
    ) -> Result<Entry, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (writer_id, title, date, content, favorite)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, writer_id, title, date, content, favorite, created_at
            "#,
        )
        .bind(writer_id)
        .bind(&new_entry.title)
        .bind(new_entry.date)
        .bind(&new_entry.content)
        .bind(new_entry.favorite)
        .fetch_one(db)
        .await
    }

    /// The writer's most recent entries, newest first.
    pub async fn list_recent(db: &PgPool, writer_id: &str) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, writer_id, title, date, content, favorite, created_at
            FROM entries
            WHERE writer_id = $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(writer_id)
        .bind(DASHBOARD_LIMIT)
        .fetch_all(db)
        .await
    }

    /// The writer's favorite entries, newest first.
    pub async fn list_favorites(db: &PgPool, writer_id: &str) -> Result<Vec<Entry>, sqlx::Error> {
        sqlx::query_as::<_, Entry>(
            r#"
            SELECT id, writer_id, title, date, content, favorite, created_at
            FROM entries
            WHERE writer_id = $1 AND favorite
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(writer_id)
        .bind(FAVORITES_LIMIT)
        .fetch_all(db)
        .await
    }
}
