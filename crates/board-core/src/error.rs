//! Error Types
//!
//! `ApiError` classifies every remote failure; `BoardError` adds the
//! rejections controllers make locally before touching the network.

use serde::{Deserialize, Serialize};

use crate::models::CommentId;

/// Status classification of a failed remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// Missing or expired credential
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    /// Duplicate action, e.g. liking twice
    #[error("conflict")]
    Conflict,
    /// Input rejected server-side
    #[error("validation failed")]
    ValidationFailed,
    /// Transport-level failure, including timeouts
    #[error("network error")]
    NetworkError,
    #[error("server error")]
    ServerError,
}

impl ErrorKind {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            500..=599 => ErrorKind::ServerError,
            400..=499 => ErrorKind::ValidationFailed,
            // 1xx/3xx never reach the decoder as failures unless the server misbehaves
            _ => ErrorKind::ServerError,
        }
    }
}

/// A failed remote operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Build from an HTTP status and the server's message, if it sent one
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = message.unwrap_or_else(|| format!("HTTP {}", status));
        Self { kind, message }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            ErrorKind::ServerError
        } else {
            ErrorKind::NetworkError
        };
        Self::new(kind, err.to_string())
    }
}

/// Errors surfaced by controllers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("content must not be empty")]
    EmptyContent,

    #[error("nickname is required")]
    NicknameRequired,

    #[error("nickname must be at most {max} characters")]
    NicknameTooLong { max: usize },

    #[error("nickname is already taken")]
    NicknameTaken,

    #[error("no post is loaded")]
    NoPostLoaded,

    #[error("comment {0} is not in the loaded list")]
    CommentNotFound(CommentId),

    /// The controller was torn down while a request was in flight
    #[error("controller was disposed")]
    Disposed,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type BoardResult<T> = Result<T, BoardError>;

impl BoardError {
    /// Remote classification, if this error came from the gateway
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            BoardError::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.api_kind() == Some(ErrorKind::Unauthorized)
    }
}
