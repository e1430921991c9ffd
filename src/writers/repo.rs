use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A registered author. Keyed by the identity provider's opaque subject, so
/// one external identity maps to at most one writer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Writer {
    pub id: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl Writer {
    /// Look up the writer registered for an identity subject.
    pub async fn find(db: &PgPool, subject: &str) -> Result<Option<Writer>, sqlx::Error> {
        sqlx::query_as::<_, Writer>(
            r#"
            SELECT id, name, created_at
            FROM writers
            WHERE id = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(db)
        .await
    }

    /// Register a writer. The primary key rejects a second registration for
    /// the same subject; callers decide what a unique violation means.
    pub async fn create(db: &PgPool, subject: &str, name: &str) -> Result<Writer, sqlx::Error> {
        sqlx::query_as::<_, Writer>(
            r#"
            INSERT INTO writers (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(subject)
        .bind(name)
        .fetch_one(db)
        .await
    }
}
