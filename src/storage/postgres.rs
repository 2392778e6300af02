//! PostgreSQL gateway built on a shared `sqlx` pool.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use super::error::{RepositoryError, Result};
use super::{parse_id, schema};
use crate::modules::authors::models::{Author, NewAuthor};
use crate::modules::authors::repository::AuthorRepository;
use crate::modules::books::models::{Book, NewBook};
use crate::modules::books::repository::BookRepository;

/// Repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Builds an `ILIKE` pattern matching `search` anywhere, with wildcard
/// characters in the input taken literally.
pub(crate) fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl BookRepository for PgStore {
    async fn list_books(&self, search: Option<&str>) -> Result<Vec<Book>> {
        let books = match search {
            Some(search) => {
                sqlx::query_as::<_, Book>(schema::SELECT_BOOKS_BY_TITLE)
                    .bind(contains_pattern(search))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, Book>(schema::SELECT_BOOKS)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(books)
    }

    async fn get_book(&self, id: &str) -> Result<Option<Book>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let book = sqlx::query_as::<_, Book>(schema::SELECT_BOOK_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create_book(&self, book: NewBook) -> Result<Uuid> {
        let author_id = book.author_id;

        sqlx::query_scalar::<_, Uuid>(schema::INSERT_BOOK)
            .bind(book.title)
            .bind(book.description)
            .bind(book.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    RepositoryError::ForeignKeyViolation {
                        entity_type: "Book",
                        referenced: "Author",
                        id: author_id.to_string(),
                    }
                }
                other => RepositoryError::Database(other),
            })
    }

    async fn delete_book(&self, id: &str) -> Result<u64> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };

        let result = sqlx::query(schema::DELETE_BOOK)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AuthorRepository for PgStore {
    async fn create_author(&self, author: NewAuthor) -> Result<Uuid> {
        let email = author.email.clone();

        sqlx::query_scalar::<_, Uuid>(schema::INSERT_AUTHOR)
            .bind(author.first_name)
            .bind(author.last_name)
            .bind(author.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    RepositoryError::UniqueViolation {
                        entity_type: "Author",
                        field: "email",
                        value: email,
                    }
                }
                other => RepositoryError::Database(other),
            })
    }

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(schema::SELECT_AUTHOR_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }
}
