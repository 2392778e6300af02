use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Book, NewBook};
use crate::storage::Result;

/// Persistence gateway for books.
///
/// Ids are opaque strings at this boundary: an id that cannot name a stored
/// row simply matches nothing.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists books, optionally only those whose title contains `search`
    /// case-insensitively. Order is whatever the store returns.
    async fn list_books(&self, search: Option<&str>) -> Result<Vec<Book>>;

    /// Gets a book by its id.
    async fn get_book(&self, id: &str) -> Result<Option<Book>>;

    /// Inserts a book and returns the id the store generated for it.
    async fn create_book(&self, book: NewBook) -> Result<Uuid>;

    /// Deletes a book by its id and returns the number of rows removed.
    async fn delete_book(&self, id: &str) -> Result<u64>;
}
