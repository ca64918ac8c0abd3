//! Error types for SolarCart

use thiserror::Error;

/// Main error type for cart operations
#[derive(Error, Debug)]
pub enum CartError {
    /// Index passed to increase/decrease/remove does not address an item
    #[error("Cart index {index} out of range (cart has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// Price is negative or not a finite number
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Remote cart endpoint failed or answered with a non-success status
    #[error("Sync error: {0}")]
    Sync(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CartError::Sync(format!("request timed out: {}", err))
        } else {
            CartError::Sync(err.to_string())
        }
    }
}

/// Result type alias using CartError
pub type CartResult<T> = Result<T, CartError>;
