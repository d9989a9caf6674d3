//! Domain layer containing the stored record and identifier allocation.
//!
//! Nothing here depends on HTTP or on a concrete database driver.
//!
//! # Modules
//!
//! - [`entities`] - The short URL record and identifier parsing
//! - [`repositories`] - Storage contract implemented by the infrastructure layer
//! - [`id_generator`] - Allocation of new numeric identifiers
//!
//! # Creation Flow
//!
//! 1. The submitted URL is validated (format, then DNS)
//! 2. An existing record for the same URL is reused if present
//! 3. Otherwise [`id_generator::IdGenerator::next`] allocates an identifier
//! 4. The record is inserted via [`repositories::ShortUrlRepository::insert`]

pub mod entities;
pub mod id_generator;
pub mod repositories;
