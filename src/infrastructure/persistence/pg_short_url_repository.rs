//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    short_url: i64,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.short_url, row.original_url, row.created_at)
    }
}

/// PostgreSQL repository for the `short_urls` table.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    /// Number of applied migrations, or 0 when migrations never ran.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if either query fails.
    pub async fn applied_migrations(&self) -> Result<i64, AppError> {
        let tracked: bool =
            sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
                .fetch_one(self.pool.as_ref())
                .await?;

        if !tracked {
            return Ok(0);
        }

        let applied = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(applied)
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<ShortUrl>, AppError> {
        // md5() lets the planner use the unique digest index.
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT short_url, original_url, created_at
            FROM short_urls
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_short_url(&self, short_url: i64) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT short_url, original_url, created_at
            FROM short_urls
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_max_short_url(&self) -> Result<Option<i64>, AppError> {
        let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(short_url) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(max)
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (short_url, original_url)
            VALUES ($1, $2)
            RETURNING short_url, original_url, created_at
            "#,
        )
        .bind(new_short_url.short_url)
        .bind(new_short_url.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn next_short_url(&self) -> Result<i64, AppError> {
        let next = sqlx::query_scalar::<_, i64>("SELECT nextval('short_url_seq')")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(next)
    }

    async fn sync_sequence(&self) -> Result<(), AppError> {
        // On an empty table is_called=false makes the next nextval() return 1.
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT setval('short_url_seq', COALESCE(MAX(short_url), 1), MAX(short_url) IS NOT NULL)
            FROM short_urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
