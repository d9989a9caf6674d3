//! Short URL creation and resolution service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl, parse_short_url_id};
use crate::domain::id_generator::IdGenerator;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::infrastructure::dns::HostResolver;
use crate::utils::url_validator::check_url_format;

/// Upper bound on identifier allocations for a single create request.
const MAX_INSERT_ATTEMPTS: usize = 5;

/// Service for creating and resolving short URLs.
///
/// Creation is idempotent per submitted URL: a URL that is already stored
/// returns its existing identifier and no new identifier is consumed.
pub struct ShortUrlService {
    repository: Arc<dyn ShortUrlRepository>,
    id_generator: Arc<dyn IdGenerator>,
    resolver: Arc<dyn HostResolver>,
}

impl ShortUrlService {
    /// Creates a new short URL service.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        id_generator: Arc<dyn IdGenerator>,
        resolver: Arc<dyn HostResolver>,
    ) -> Self {
        Self {
            repository,
            id_generator,
            resolver,
        }
    }

    /// Validates `input` and returns its short URL, creating one if needed.
    ///
    /// # Flow
    ///
    /// 1. Format check, then DNS check of the hostname
    /// 2. Reuse the record for this exact URL if one exists
    /// 3. Otherwise allocate an identifier and insert
    ///
    /// A unique violation on insert means another request won a race. The
    /// record for this URL is re-fetched; if there is none, the identifier was
    /// taken and a fresh one is allocated.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrlFormat`] / [`AppError::UnresolvableHostname`] on
    ///   validation failure, before any storage access
    /// - [`AppError::Storage`] on database errors or when every attempt collided
    pub async fn shorten(&self, input: &str) -> Result<ShortUrl, AppError> {
        let checked = check_url_format(input)?;

        if let Err(e) = self.resolver.resolve(&checked.hostname).await {
            debug!(hostname = %checked.hostname, error = %e, "Hostname rejected");
            return Err(AppError::UnresolvableHostname);
        }

        if let Some(existing) = self
            .repository
            .find_by_original_url(&checked.original)
            .await?
        {
            debug!(short_url = existing.short_url, "Reusing existing short URL");
            return Ok(existing);
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let short_url = self.id_generator.next().await?;

            let new_short_url = NewShortUrl {
                short_url,
                original_url: checked.original.clone(),
            };

            match self.repository.insert(new_short_url).await {
                Ok(created) => {
                    info!(short_url = created.short_url, "Short URL created");
                    return Ok(created);
                }
                Err(AppError::UniqueViolation { constraint }) => {
                    warn!(short_url, attempt, %constraint, "Insert collided");

                    if let Some(existing) = self
                        .repository
                        .find_by_original_url(&checked.original)
                        .await?
                    {
                        return Ok(existing);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Storage(format!(
            "identifier allocation collided {MAX_INSERT_ATTEMPTS} times"
        )))
    }

    /// Looks up the record for an identifier taken from a request path.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if `raw` is not a positive integer or no record
    ///   matches
    /// - [`AppError::Lookup`] on database errors
    pub async fn resolve(&self, raw: &str) -> Result<ShortUrl, AppError> {
        let short_url = parse_short_url_id(raw)?;

        self.repository
            .find_by_short_url(short_url)
            .await
            .map_err(AppError::into_lookup)?
            .ok_or(AppError::NotFound)
    }

    /// Returns the number of stored records. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] on database errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await.map_err(AppError::into_lookup)
    }
}
