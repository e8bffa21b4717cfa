//! Error type shared by the indexer's RPC, storage and config layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Transport failure or an undecodable HTTP body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON-RPC error object the indexer will not retry.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The RPC answered without an error but with nothing usable in it.
    #[error("Event parse error: {0}")]
    EventParse(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
