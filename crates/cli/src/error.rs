// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use sl_core::BackendError;
use thiserror::Error;

/// All possible errors that can occur in the shoplist library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'shoplist init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("list not found: {0}")]
    ListNotFound(String),

    #[error("item not found: {item_id} in list {list_id}")]
    ItemNotFound { list_id: String, item_id: String },

    #[error("ambiguous {kind} ID '{prefix}' matches: {}", matches.join(", "))]
    AmbiguousId {
        kind: &'static str,
        prefix: String,
        matches: Vec<String>,
    },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{0}")]
    InvalidInput(String),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("{action} requires a connection\n  hint: drop --offline or configure a remote")]
    Offline { action: &'static str },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for shoplist operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<sl_core::Error> for Error {
    fn from(e: sl_core::Error) -> Self {
        match e {
            sl_core::Error::ListNotFound(id) => Error::ListNotFound(id),
            sl_core::Error::ItemNotFound { list_id, item_id } => {
                Error::ItemNotFound { list_id, item_id }
            }
            sl_core::Error::InvalidInput(s) => Error::InvalidInput(s),
            sl_core::Error::Backend(e) => Error::Backend(e),
            sl_core::Error::Storage(e) => Error::Storage(e.to_string()),
            sl_core::Error::Io(e) => Error::Io(e),
            sl_core::Error::Json(e) => Error::Json(e),
            sl_core::Error::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
