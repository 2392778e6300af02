//! PostgreSQL table definitions and query constants.

/// Authors table. `email` is unique across all authors.
pub const CREATE_AUTHORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    first_name VARCHAR(55) NOT NULL,
    last_name VARCHAR(55),
    email VARCHAR(255) NOT NULL UNIQUE
);
"#;

/// Books table. Every book references exactly one existing author.
pub const CREATE_BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(100) NOT NULL,
    description TEXT,
    author_id UUID NOT NULL REFERENCES authors(id)
);
CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);
"#;

// Author queries
pub const INSERT_AUTHOR: &str = r#"
INSERT INTO authors (first_name, last_name, email)
VALUES ($1, $2, $3)
RETURNING id
"#;

pub const SELECT_AUTHOR_BY_ID: &str = r#"
SELECT id, first_name, last_name, email
FROM authors
WHERE id = $1
"#;

// Book queries
pub const SELECT_BOOKS: &str = r#"
SELECT id, title, description, author_id
FROM books
"#;

pub const SELECT_BOOKS_BY_TITLE: &str = r#"
SELECT id, title, description, author_id
FROM books
WHERE title ILIKE $1
"#;

pub const SELECT_BOOK_BY_ID: &str = r#"
SELECT id, title, description, author_id
FROM books
WHERE id = $1
"#;

pub const INSERT_BOOK: &str = r#"
INSERT INTO books (title, description, author_id)
VALUES ($1, $2, $3)
RETURNING id
"#;

pub const DELETE_BOOK: &str = r#"
DELETE FROM books
WHERE id = $1
"#;
