use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Malformed record: {message}")]
    Parse { message: String },

    #[error("Record not found: {id}")]
    NotFound { id: String },
}

impl Error {
    /// Builds a `Parse` error for an unknown token in a closed vocabulary.
    pub fn unknown_token(field: &str, value: &str) -> Self {
        Self::Parse {
            message: format!("unknown {field}: {value:?}"),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
