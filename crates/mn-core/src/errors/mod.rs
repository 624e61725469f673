//! Backend error taxonomy and the user-facing message mapping.

mod user_facing;

pub use user_facing::{user_facing_message, GENERIC_FAILURE_MESSAGE};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by the hosted backend (auth service or row store).
///
/// Backend errors are propagated to the caller unmodified; screens turn them
/// into alert text with [`user_facing_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BackendError {
    /// Authentication endpoint rejected the request.
    #[error("auth error: {message}")]
    Auth {
        code: Option<String>,
        message: String,
    },

    /// Row query or write failed.
    #[error("query error: {message}")]
    Query {
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// Anything the adapter could not classify.
    #[error("unexpected backend error: {0}")]
    Unexpected(String),
}

impl BackendError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            code: None,
            message: message.into(),
        }
    }

    pub fn query(code: Option<String>, message: impl Into<String>) -> Self {
        Self::Query {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Backend error code, when the service sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } | Self::Query { code, .. } => code.as_deref(),
            Self::Network(_) | Self::Unexpected(_) => None,
        }
    }

    /// Raw backend message.
    pub fn message(&self) -> &str {
        match self {
            Self::Auth { message, .. } | Self::Query { message, .. } => message,
            Self::Network(message) | Self::Unexpected(message) => message,
        }
    }
}
