//! Client error types.

use kisti_shared::AppError;
use thiserror::Error;

/// Errors from the backend API boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL is not a URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, for the logs.
        body: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("Undecodable response: {0}")]
    Decode(String),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ClientError::Status {
            code: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 502: bad gateway");
    }

    #[test]
    fn test_converts_to_app_error() {
        let err = ClientError::InvalidBaseUrl("nope".to_string());
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "EXTERNAL_SERVICE_ERROR");
    }
}
