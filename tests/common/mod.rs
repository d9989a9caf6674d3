#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use shorturl::application::services::ShortUrlService;
use shorturl::domain::entities::{NewShortUrl, ShortUrl};
use shorturl::domain::id_generator::{CounterIdGenerator, IdGenerator};
use shorturl::domain::repositories::ShortUrlRepository;
use shorturl::error::AppError;
use shorturl::infrastructure::dns::{HostResolver, ResolveError};
use shorturl::routes::build_router;
use shorturl::state::AppState;

#[derive(Default)]
struct Store {
    by_id: HashMap<i64, ShortUrl>,
    by_url: HashMap<String, i64>,
    sequence: i64,
}

/// Repository backed by a mutex-guarded map, enforcing the same unique
/// constraints as the database schema.
#[derive(Default)]
pub struct InMemoryShortUrlRepository {
    store: Mutex<Store>,
    fail: Mutex<bool>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().by_id.len()
    }

    fn check(&self) -> Result<(), AppError> {
        if *self.fail.lock().unwrap() {
            return Err(AppError::Storage("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<ShortUrl>, AppError> {
        self.check()?;
        let store = self.store.lock().unwrap();
        Ok(store
            .by_url
            .get(original_url)
            .and_then(|id| store.by_id.get(id))
            .cloned())
    }

    async fn find_by_short_url(&self, short_url: i64) -> Result<Option<ShortUrl>, AppError> {
        self.check()?;
        Ok(self.store.lock().unwrap().by_id.get(&short_url).cloned())
    }

    async fn find_max_short_url(&self) -> Result<Option<i64>, AppError> {
        self.check()?;
        Ok(self.store.lock().unwrap().by_id.keys().copied().max())
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        self.check()?;
        let mut store = self.store.lock().unwrap();

        if store.by_id.contains_key(&new_short_url.short_url) {
            return Err(AppError::UniqueViolation {
                constraint: "short_urls_pkey".to_string(),
            });
        }
        if store.by_url.contains_key(&new_short_url.original_url) {
            return Err(AppError::UniqueViolation {
                constraint: "short_urls_original_url_md5_key".to_string(),
            });
        }

        let record = ShortUrl::new(
            new_short_url.short_url,
            new_short_url.original_url.clone(),
            Utc::now(),
        );
        store
            .by_url
            .insert(new_short_url.original_url, new_short_url.short_url);
        store.by_id.insert(new_short_url.short_url, record.clone());

        Ok(record)
    }

    async fn next_short_url(&self) -> Result<i64, AppError> {
        self.check()?;
        let mut store = self.store.lock().unwrap();
        store.sequence += 1;
        Ok(store.sequence)
    }

    async fn sync_sequence(&self) -> Result<(), AppError> {
        self.check()?;
        let mut store = self.store.lock().unwrap();
        store.sequence = store.by_id.keys().copied().max().unwrap_or(0);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.store.lock().unwrap().by_id.len() as i64)
    }
}

/// Resolver that accepts every host except those under `.invalid`.
pub struct StubResolver;

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        if host.ends_with(".invalid") {
            Err(ResolveError::Lookup(format!("{host}: Name or service not known")))
        } else {
            Ok(())
        }
    }
}

pub fn create_service(
    repository: Arc<InMemoryShortUrlRepository>,
    id_generator: Arc<dyn IdGenerator>,
) -> Arc<ShortUrlService> {
    Arc::new(ShortUrlService::new(
        repository,
        id_generator,
        Arc::new(StubResolver),
    ))
}

pub fn create_test_state(repository: Arc<InMemoryShortUrlRepository>) -> AppState {
    let service = create_service(repository, Arc::new(CounterIdGenerator::new(0)));
    AppState::new(service, true)
}

pub fn create_test_app(state: AppState) -> Router {
    build_router(state, Path::new("public"), Duration::from_secs(5))
}
