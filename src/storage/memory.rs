//! In-memory gateway.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{RepositoryError, Result};
use super::parse_id;
use crate::modules::authors::models::{Author, NewAuthor};
use crate::modules::authors::repository::AuthorRepository;
use crate::modules::books::models::{Book, NewBook};
use crate::modules::books::repository::BookRepository;

/// In-memory storage backend.
///
/// Enforces the same invariants as the relational schema: store-generated
/// ids, books referencing an existing author, and unique author emails.
/// Rows keep insertion order. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    authors: Arc<RwLock<Vec<Author>>>,
    books: Arc<RwLock<Vec<Book>>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list_books(&self, search: Option<&str>) -> Result<Vec<Book>> {
        let books = self.books.read().await;
        let Some(search) = search else {
            return Ok(books.clone());
        };

        let needle = search.to_lowercase();
        Ok(books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_book(&self, id: &str) -> Result<Option<Book>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn create_book(&self, book: NewBook) -> Result<Uuid> {
        // Hold the authors lock across the insert, like a FK check would.
        let authors = self.authors.read().await;
        if !authors.iter().any(|author| author.id == book.author_id) {
            return Err(RepositoryError::ForeignKeyViolation {
                entity_type: "Book",
                referenced: "Author",
                id: book.author_id.to_string(),
            });
        }

        let id = Uuid::new_v4();
        self.books.write().await.push(Book {
            id,
            title: book.title,
            description: book.description,
            author_id: book.author_id,
        });
        Ok(id)
    }

    async fn delete_book(&self, id: &str) -> Result<u64> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };

        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|book| book.id != id);
        Ok((before - books.len()) as u64)
    }
}

#[async_trait]
impl AuthorRepository for MemoryStore {
    async fn create_author(&self, author: NewAuthor) -> Result<Uuid> {
        self.insert_author(None, author).await
    }

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>> {
        let authors = self.authors.read().await;
        Ok(authors.iter().find(|author| author.id == id).cloned())
    }
}

impl MemoryStore {
    /// Inserts an author under `id`, or a generated id when `None`.
    pub async fn insert_author(&self, id: Option<Uuid>, author: NewAuthor) -> Result<Uuid> {
        let mut authors = self.authors.write().await;
        if authors.iter().any(|existing| existing.email == author.email) {
            return Err(RepositoryError::UniqueViolation {
                entity_type: "Author",
                field: "email",
                value: author.email,
            });
        }
        if let Some(id) = id.filter(|id| authors.iter().any(|existing| existing.id == *id)) {
            return Err(RepositoryError::UniqueViolation {
                entity_type: "Author",
                field: "id",
                value: id.to_string(),
            });
        }

        let id = id.unwrap_or_else(Uuid::new_v4);
        authors.push(Author {
            id,
            first_name: author.first_name,
            last_name: author.last_name,
            email: author.email,
        });
        Ok(id)
    }
}
