//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with SQLx bind parameters, so the crate
//! compiles without a live database.

pub mod pg_short_url_repository;

pub use pg_short_url_repository::PgShortUrlRepository;
