use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const NAME_MAX_CHARS: usize = 55;
pub const EMAIL_MAX_CHARS: usize = 255;

/// A persisted author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

/// Validated command for inserting an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl NewAuthor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: Option<String>,
        email: impl Into<String>,
    ) -> Result<Self, AuthorValidationError> {
        let first_name = first_name.into();
        let email = email.into();

        if first_name.is_empty() {
            return Err(AuthorValidationError::Required("first_name"));
        }
        check_len("first_name", &first_name, NAME_MAX_CHARS)?;
        if let Some(last_name) = &last_name {
            check_len("last_name", last_name, NAME_MAX_CHARS)?;
        }
        if email.is_empty() {
            return Err(AuthorValidationError::Required("email"));
        }
        check_len("email", &email, EMAIL_MAX_CHARS)?;

        Ok(Self {
            first_name,
            last_name: last_name.filter(|name| !name.is_empty()),
            email,
        })
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), AuthorValidationError> {
    if value.chars().count() > max {
        return Err(AuthorValidationError::TooLong { field, max });
    }
    Ok(())
}
