//! Database module for store and menu data.
//!
//! This module provides abstractions for data access via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs)                      │
//! │  StoreRepository / CategoryRepository /                 │
//! │  ItemRepository / SpecialItemRepository                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! A SQL-backed repository is deliberately absent (persistence is outside
//! this service's scope); the traits are the seam where one would attach.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod error;
pub mod repositories;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    CategoryPatch, CategoryRepository, FullRepository, ItemPatch, ItemQuery, ItemRepository,
    NewCategory, NewItem, NewSpecialItem, Paged, SpecialItemPatch, SpecialItemQuery,
    SpecialItemRepository, StorePatch, StoreRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton. Later calls are no-ops.
pub fn init_repository(repo: Arc<dyn FullRepository>) -> Result<()> {
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
