//! Allocation of numeric short URL identifiers.
//!
//! Two strategies are available:
//!
//! - [`CounterIdGenerator`] - in-process atomic counter seeded from the
//!   largest stored identifier at startup
//! - [`SequenceIdGenerator`] - draws from the database sequence, so several
//!   service processes can share one store
//!
//! Both hand out strictly increasing values and never return the same value
//! twice. The unique index on `short_url` remains the final arbiter.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Source of new short URL identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdGenerator: Send + Sync {
    /// Returns the next unused identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the backing store cannot be reached.
    async fn next(&self) -> Result<i64, AppError>;
}

/// Atomic in-memory counter.
///
/// No storage round trip happens per call after seeding.
#[derive(Debug)]
pub struct CounterIdGenerator {
    current: AtomicI64,
}

impl CounterIdGenerator {
    /// Creates a counter whose first [`IdGenerator::next`] returns `start + 1`.
    pub fn new(start: i64) -> Self {
        Self {
            current: AtomicI64::new(start),
        }
    }

    /// Seeds the counter from the largest stored identifier (0 when empty).
    ///
    /// # Errors
    ///
    /// Propagates the repository error; the service must not start without a
    /// seeded counter.
    pub async fn seeded(repository: &dyn ShortUrlRepository) -> Result<Self, AppError> {
        let max = repository.find_max_short_url().await?.unwrap_or(0);
        tracing::info!(seed = max, "Identifier counter seeded");
        Ok(Self::new(max))
    }

    /// Returns the last value handed out (or the seed).
    pub fn current(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdGenerator for CounterIdGenerator {
    async fn next(&self) -> Result<i64, AppError> {
        Ok(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Identifier allocation delegated to the storage sequence.
pub struct SequenceIdGenerator {
    repository: Arc<dyn ShortUrlRepository>,
}

impl SequenceIdGenerator {
    /// Aligns the sequence with the stored maximum and returns the generator.
    ///
    /// # Errors
    ///
    /// Propagates the repository error from the alignment step.
    pub async fn init(repository: Arc<dyn ShortUrlRepository>) -> Result<Self, AppError> {
        repository.sync_sequence().await?;
        tracing::info!("Identifier sequence synchronized");
        Ok(Self { repository })
    }
}

#[async_trait]
impl IdGenerator for SequenceIdGenerator {
    async fn next(&self) -> Result<i64, AppError> {
        self.repository.next_short_url().await
    }
}

/// Which [`IdGenerator`] the server runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Sequence,
    Counter,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequence" => Ok(Self::Sequence),
            "counter" => Ok(Self::Counter),
            other => Err(format!(
                "ID_STRATEGY must be 'sequence' or 'counter', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

/// Builds and initializes the generator for the chosen strategy.
///
/// # Errors
///
/// Returns the repository error if seeding or sequence alignment fails.
pub async fn build_id_generator(
    strategy: IdStrategy,
    repository: Arc<dyn ShortUrlRepository>,
) -> Result<Arc<dyn IdGenerator>, AppError> {
    let generator: Arc<dyn IdGenerator> = match strategy {
        IdStrategy::Counter => Arc::new(CounterIdGenerator::seeded(repository.as_ref()).await?),
        IdStrategy::Sequence => Arc::new(SequenceIdGenerator::init(repository).await?),
    };

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_counter_starts_after_seed() {
        let generator = CounterIdGenerator::new(41);

        assert_eq!(generator.next().await.unwrap(), 42);
        assert_eq!(generator.next().await.unwrap(), 43);
        assert_eq!(generator.current(), 43);
    }

    #[tokio::test]
    async fn test_counter_seeded_from_empty_store() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_max_short_url()
            .times(1)
            .returning(|| Ok(None));

        let generator = CounterIdGenerator::seeded(&repo).await.unwrap();

        assert_eq!(generator.next().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_counter_seeded_from_stored_max() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_max_short_url()
            .times(1)
            .returning(|| Ok(Some(17)));

        let generator = CounterIdGenerator::seeded(&repo).await.unwrap();

        assert_eq!(generator.next().await.unwrap(), 18);
    }

    #[tokio::test]
    async fn test_counter_seed_failure_propagates() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_max_short_url()
            .times(1)
            .returning(|| Err(AppError::Storage("connection refused".to_string())));

        let result = CounterIdGenerator::seeded(&repo).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_counter_concurrent_values_are_distinct() {
        let generator = Arc::new(CounterIdGenerator::new(0));
        let mut tasks = tokio::task::JoinSet::new();

        for _ in 0..64 {
            let generator = generator.clone();
            tasks.spawn(async move {
                let mut values = Vec::with_capacity(50);
                for _ in 0..50 {
                    values.push(generator.next().await.unwrap());
                }
                values
            });
        }

        let mut seen = HashSet::new();
        while let Some(values) = tasks.join_next().await {
            for value in values.unwrap() {
                assert!(seen.insert(value), "duplicate identifier {value}");
            }
        }

        assert_eq!(seen.len(), 64 * 50);
        assert_eq!(seen.iter().copied().max(), Some(64 * 50));
    }

    #[tokio::test]
    async fn test_sequence_generator_syncs_then_draws() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_sync_sequence().times(1).returning(|| Ok(()));
        repo.expect_next_short_url().times(1).returning(|| Ok(5));

        let generator = SequenceIdGenerator::init(Arc::new(repo)).await.unwrap();

        assert_eq!(generator.next().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_sequence_sync_failure_propagates() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_sync_sequence()
            .times(1)
            .returning(|| Err(AppError::Storage("relation does not exist".to_string())));

        let result = SequenceIdGenerator::init(Arc::new(repo)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_build_counter_strategy() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_max_short_url()
            .times(1)
            .returning(|| Ok(Some(3)));
        repo.expect_sync_sequence().times(0);

        let generator = build_id_generator(IdStrategy::Counter, Arc::new(repo))
            .await
            .unwrap();

        assert_eq!(generator.next().await.unwrap(), 4);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("sequence".parse::<IdStrategy>(), Ok(IdStrategy::Sequence));
        assert_eq!("COUNTER".parse::<IdStrategy>(), Ok(IdStrategy::Counter));
        assert!("uuid".parse::<IdStrategy>().is_err());
        assert_eq!(IdStrategy::default(), IdStrategy::Sequence);
        assert_eq!(IdStrategy::Counter.to_string(), "counter");
    }
}
