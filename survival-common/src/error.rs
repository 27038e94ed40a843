//! Errors raised by the record store and configuration layers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Record table query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database directory or config file access failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable TOML, bad env override or unsafe table name
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
