//! Error types for launchdash-server.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type alias for launchdash-server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running the server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from launchdash-core.
    #[error("Core error: {0}")]
    Core(#[from] launchdash_core::Error),

    /// Listener could not be bound or the server loop failed.
    #[error("Server I/O error on {addr}: {source}")]
    Serve {
        /// Address being served.
        addr: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Error returned from an HTTP handler.
///
/// Serialized as `{"error": {"category": ..., "message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    category: &'static str,
    message: String,
}

impl ApiError {
    /// A 400 with a message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            category: "invalid_request",
            message: message.into(),
        }
    }

    /// A 500 for a broken server-side invariant.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(error = %message, "Request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            category: "internal",
            message,
        }
    }

    /// HTTP status of the error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<launchdash_core::Error> for ApiError {
    fn from(err: launchdash_core::Error) -> Self {
        use launchdash_core::Error as Core;

        let (status, category) = match &err {
            Core::UnknownSite(_) | Core::UnknownOutput(_) => (StatusCode::NOT_FOUND, "not_found"),
            e if e.is_client_error() => (StatusCode::BAD_REQUEST, "invalid_request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "Request failed");
        } else {
            tracing::debug!(error = %err, status = status.as_u16(), "Rejected request");
        }
        Self {
            status,
            category,
            message: err.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        Self::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "category": self.category,
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}
