use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity_type} references a missing {referenced}: {id}")]
    ForeignKeyViolation {
        entity_type: &'static str,
        referenced: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists with {field} {value}")]
    UniqueViolation {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
