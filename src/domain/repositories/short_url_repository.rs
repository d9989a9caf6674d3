//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short URL records.
///
/// Records are insert-only; there is no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds the record created for exactly this URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_short_url(&self, short_url: i64) -> Result<Option<ShortUrl>, AppError>;

    /// Returns the largest stored identifier, or `None` when the store is empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_max_short_url(&self) -> Result<Option<i64>, AppError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UniqueViolation`] if the identifier or the URL is
    /// already stored.
    ///
    /// Returns [`AppError::Storage`] on other database errors.
    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Draws the next value from the storage-side identifier sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn next_short_url(&self) -> Result<i64, AppError>;

    /// Moves the identifier sequence so that its next value is above every
    /// stored identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn sync_sequence(&self) -> Result<(), AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
