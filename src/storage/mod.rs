//! Persistence gateways.
//!
//! `Storage` is opened once at startup and hands out the repository handles
//! that modules receive at construction.

mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

use std::sync::Arc;

use anyhow::Context;
use shelf_kernel::{
    settings::{DatabaseSettings, SeedAuthor, StorageBackend},
    TableDef,
};
use uuid::Uuid;

pub use error::{RepositoryError, Result};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::modules::authors::models::NewAuthor;
use crate::modules::authors::repository::AuthorRepository;
use crate::modules::books::repository::BookRepository;

/// Opaque ids are UUIDs in every backend; anything else names no row.
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Shared handles to the configured backend.
#[derive(Clone)]
pub struct Storage {
    pub books: Arc<dyn BookRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    postgres: Option<PgStore>,
}

impl Storage {
    /// Open the backend selected by `settings.backend`.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        match settings.backend {
            StorageBackend::Postgres => {
                if !settings.seed_authors.is_empty() {
                    tracing::warn!(
                        count = settings.seed_authors.len(),
                        "database.seed_authors only applies to the memory backend; ignoring"
                    );
                }
                let pool = shelf_db::connect(settings).await?;
                Ok(Self::postgres(PgStore::new(pool)))
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; data will not survive a restart");
                Self::in_memory_seeded(&settings.seed_authors).await
            }
        }
    }

    pub fn postgres(store: PgStore) -> Self {
        Self {
            books: Arc::new(store.clone()),
            authors: Arc::new(store.clone()),
            postgres: Some(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::memory(MemoryStore::new())
    }

    /// In-memory storage preloaded with `seeds`, so books can reference them.
    pub async fn in_memory_seeded(seeds: &[SeedAuthor]) -> anyhow::Result<Self> {
        let store = MemoryStore::new();
        for seed in seeds {
            let id = seed
                .id
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()
                .with_context(|| format!("seed author '{}' has an invalid id", seed.email))?;
            let author = NewAuthor::new(
                seed.first_name.clone(),
                seed.last_name.clone(),
                seed.email.clone(),
            )
            .with_context(|| format!("seed author '{}' is invalid", seed.email))?;

            let id = store
                .insert_author(id, author)
                .await
                .with_context(|| format!("failed to seed author '{}'", seed.email))?;
            tracing::info!(author_id = %id, email = %seed.email, "seeded author");
        }
        Ok(Self::memory(store))
    }

    fn memory(store: MemoryStore) -> Self {
        Self {
            books: Arc::new(store.clone()),
            authors: Arc::new(store),
            postgres: None,
        }
    }

    /// Create missing tables. The in-memory backend has nothing to create.
    pub async fn ensure_schema(&self, tables: &[(&'static str, TableDef)]) -> anyhow::Result<()> {
        match &self.postgres {
            Some(store) => shelf_db::ensure_schema(store.pool(), tables).await,
            None => Ok(()),
        }
    }
}
