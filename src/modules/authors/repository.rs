use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Author, NewAuthor};
use crate::storage::Result;

/// Persistence gateway for authors.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Inserts an author and returns the id the store generated for it.
    async fn create_author(&self, author: NewAuthor) -> Result<Uuid>;

    /// Gets an author by id.
    async fn get_author(&self, id: Uuid) -> Result<Option<Author>>;
}
