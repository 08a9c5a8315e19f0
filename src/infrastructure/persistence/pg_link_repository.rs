//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::LinkRepository;

/// PostgreSQL repository for link storage and retrieval.
///
/// Token uniqueness is the `links_token_key` constraint; a lost insert race
/// surfaces as [`RepositoryError::UniqueViolation`]. Counter increments are a
/// single `UPDATE ... SET access_count = access_count + 1`, so concurrent
/// resolutions never lose updates.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    token: String,
    target_address: String,
    access_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.token,
            r.target_address,
            r.access_count,
            r.created_at,
            r.updated_at,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_address(&self, address: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, token, target_address, access_count, created_at, updated_at
            FROM links
            WHERE target_address = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(address)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, token, target_address, access_count, created_at, updated_at
            FROM links
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (token, target_address)
            VALUES ($1, $2)
            RETURNING id, token, target_address, access_count, created_at, updated_at
            "#,
        )
        .bind(&new_link.token)
        .bind(&new_link.target_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_access_count(&self, token: &str) -> Result<Link, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET access_count = access_count + 1,
                updated_at = NOW()
            WHERE token = $1
            RETURNING id, token, target_address, access_count, created_at, updated_at
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or(RepositoryError::NotFound)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
