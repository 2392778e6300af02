use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Longest title the `books.title` column accepts.
pub const TITLE_MAX_CHARS: usize = 100;

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-generated identifier
    pub id: Uuid,
    /// Title of the book
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Author the book belongs to
    pub author_id: Uuid,
}

/// Validated command for inserting a book. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Raw create-book request body. Every field is optional here so that a
/// missing field surfaces as a validation error naming it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookPayload {
    pub title: Option<String>,
    pub author_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("title must be at most 100 characters")]
    TitleTooLong,
    #[error("authorId is required")]
    AuthorIdRequired,
    #[error("authorId must be a valid UUID")]
    AuthorIdInvalid,
}

impl BookValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::AuthorIdRequired | Self::AuthorIdInvalid => "authorId",
        }
    }
}

impl CreateBookPayload {
    /// Check fields in order (title, then authorId) and build the insert command.
    pub fn validate(self) -> Result<NewBook, BookValidationError> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(BookValidationError::TitleRequired),
        };
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(BookValidationError::TitleTooLong);
        }

        let author_id = match self.author_id.as_deref() {
            Some(raw) if !raw.is_empty() => {
                Uuid::parse_str(raw).map_err(|_| BookValidationError::AuthorIdInvalid)?
            }
            _ => return Err(BookValidationError::AuthorIdRequired),
        };

        Ok(NewBook {
            title,
            description: self.description,
            author_id,
        })
    }
}

/// Query string accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksQuery {
    pub search: Option<String>,
}

impl ListBooksQuery {
    /// The search term, or `None` when absent or empty.
    pub fn term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body returned after a successful insert.
#[derive(Debug, Clone, Serialize)]
pub struct BookCreated {
    pub message: &'static str,
    pub id: Uuid,
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, Serialize)]
pub struct BookDeleted {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AUTHOR: &str = "0b6f2a7e-5d0c-4f43-9a51-1b2a3c4d5e6f";

    fn payload(value: serde_json::Value) -> CreateBookPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn book_serializes_author_id_in_camel_case() {
        let book = Book {
            id: Uuid::nil(),
            title: "Dune".to_string(),
            description: None,
            author_id: Uuid::parse_str(AUTHOR).unwrap(),
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["authorId"], AUTHOR);
        assert_eq!(value["title"], "Dune");
        assert!(value["description"].is_null());
        assert!(value.get("author_id").is_none());
    }

    #[test]
    fn valid_payload_becomes_command() {
        let command = payload(json!({
            "title": "Dune",
            "authorId": AUTHOR,
            "description": "Spice"
        }))
        .validate()
        .unwrap();

        assert_eq!(command.title, "Dune");
        assert_eq!(command.author_id.to_string(), AUTHOR);
        assert_eq!(command.description.as_deref(), Some("Spice"));
    }

    #[test]
    fn title_is_checked_before_author_id() {
        let err = payload(json!({})).validate().unwrap_err();
        assert_eq!(err, BookValidationError::TitleRequired);
        assert_eq!(err.field(), "title");
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = payload(json!({ "title": "", "authorId": AUTHOR }))
            .validate()
            .unwrap_err();
        assert_eq!(err, BookValidationError::TitleRequired);
    }

    #[test]
    fn whitespace_title_is_kept_as_given() {
        let command = payload(json!({ "title": "   ", "authorId": AUTHOR }))
            .validate()
            .unwrap();
        assert_eq!(command.title, "   ");
    }

    #[test]
    fn overlong_title_is_rejected() {
        let title = "x".repeat(TITLE_MAX_CHARS + 1);
        let err = payload(json!({ "title": title, "authorId": AUTHOR }))
            .validate()
            .unwrap_err();
        assert_eq!(err, BookValidationError::TitleTooLong);

        let title = "é".repeat(TITLE_MAX_CHARS);
        assert!(payload(json!({ "title": title, "authorId": AUTHOR }))
            .validate()
            .is_ok());
    }

    #[test]
    fn missing_or_null_author_id_is_rejected() {
        for body in [
            json!({ "title": "Dune" }),
            json!({ "title": "Dune", "authorId": null }),
            json!({ "title": "Dune", "authorId": "" }),
        ] {
            let err = payload(body).validate().unwrap_err();
            assert_eq!(err, BookValidationError::AuthorIdRequired);
            assert_eq!(err.to_string(), "authorId is required");
        }
    }

    #[test]
    fn malformed_author_id_is_rejected() {
        let err = payload(json!({ "title": "Dune", "authorId": "42" }))
            .validate()
            .unwrap_err();
        assert_eq!(err, BookValidationError::AuthorIdInvalid);
        assert_eq!(err.field(), "authorId");
    }

    #[test]
    fn empty_search_means_no_filter() {
        let query = ListBooksQuery {
            search: Some(String::new()),
        };
        assert_eq!(query.term(), None);

        let query = ListBooksQuery {
            search: Some("harry".to_string()),
        };
        assert_eq!(query.term(), Some("harry"));
    }
}
