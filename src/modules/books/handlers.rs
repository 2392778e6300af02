//! HTTP handlers for the `/books` resource.
//!
//! Each handler validates its input, makes at most one store call, and maps
//! the outcome to a status code and JSON body.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use shelf_http::error::AppError;

use super::models::{Book, BookCreated, BookDeleted, CreateBookPayload, ListBooksQuery};
use super::repository::BookRepository;

pub type BookStore = Arc<dyn BookRepository>;

fn book_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Book with id {id} does not exist!"))
}

/// `GET /books[?search=]`
pub async fn list_books(
    State(store): State<BookStore>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let books = store
        .list_books(query.term())
        .await
        .map_err(|e| AppError::internal("Failed to fetch books", e))?;

    Ok(Json(books))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let book = store
        .get_book(&id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch book", e))?;

    book.map(Json).ok_or_else(|| book_not_found(&id))
}

/// `POST /books`
pub async fn create_book(
    State(store): State<BookStore>,
    payload: Result<Json<CreateBookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<BookCreated>), AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let new_book = payload
        .validate()
        .map_err(|e| AppError::validation(e.field(), e.to_string()))?;

    let id = store
        .create_book(new_book)
        .await
        .map_err(|e| AppError::internal("Failed to create book", e))?;

    tracing::info!(book_id = %id, "book created");
    Ok((
        StatusCode::CREATED,
        Json(BookCreated {
            message: "Book is created successfully",
            id,
        }),
    ))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(store): State<BookStore>,
    Path(id): Path<String>,
) -> Result<Json<BookDeleted>, AppError> {
    let deleted = store
        .delete_book(&id)
        .await
        .map_err(|e| AppError::internal("Failed to delete book", e))?;

    if deleted == 0 {
        return Err(book_not_found(&id));
    }

    tracing::info!(book_id = %id, "book deleted");
    Ok(Json(BookDeleted {
        message: "Book Deleted",
    }))
}
