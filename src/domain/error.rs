use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid {field} format: {value}. Use ISO 8601.")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("integrity: {0}")]
    Integrity(String),
}
