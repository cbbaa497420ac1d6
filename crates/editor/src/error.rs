//! Client and editor errors

use homestretch_core::{SectionId, SiteError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the server sends with every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

// ============================================================================
// ClientError
// ============================================================================

/// Failure of one API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the request timeout
    #[error("Request timed out")]
    Timeout,

    /// 401: the token is missing, wrong or revoked
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400 or 422: the server rejected the request content
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 409: the section changed since it was loaded
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other error status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body did not decode
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Local file access (token file, upload source)
    #[error("IO error: {0}")]
    Io(String),
}

impl ClientError {
    /// Classify an error response
    pub fn from_status(status: u16, body: Option<ApiErrorBody>) -> Self {
        let message = body
            .as_ref()
            .map(|b| b.message.clone())
            .unwrap_or_else(|| format!("Server returned status {status}"));

        match status {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            409 => Self::Conflict(message),
            _ => Self::Api {
                status,
                code: body.map_or_else(|| "unknown".to_string(), |b| b.error),
                message,
            },
        }
    }

    /// Transport failures, worth retrying for idempotent reads
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Text suitable for a notification
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Unable to connect to the server. Please check your connection.".to_string()
            }
            Self::Timeout => "Request timed out. Please try again.".to_string(),
            Self::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            Self::NotFound(message) | Self::Validation(message) => message.clone(),
            Self::Conflict(_) => {
                "This section was changed elsewhere. Reload to get the latest version.".to_string()
            }
            Self::Api { message, .. } => message.clone(),
            Self::Parse(_) => "Received an unexpected response from the server.".to_string(),
            Self::Io(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Local checks reuse the model's validation
impl From<SiteError> for ClientError {
    fn from(err: SiteError) -> Self {
        if err.is_validation() {
            Self::Validation(err.to_string())
        } else if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Io(err.to_string())
        }
    }
}

// ============================================================================
// EditorError
// ============================================================================

/// Why an editor operation could not run or did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("No section with id {0} in the editor")]
    UnknownSection(SectionId),

    /// The card is not in a phase that allows the operation
    #[error("Section {id} is {phase}, cannot {action}")]
    InvalidPhase {
        id: SectionId,
        phase: &'static str,
        action: &'static str,
    },

    /// Another operation of the same kind is still in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Rejected locally before any request was sent
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// The request failed; local state has been restored
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<SiteError> for EditorError {
    fn from(err: SiteError) -> Self {
        Self::Invalid(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str) -> Option<ApiErrorBody> {
        Some(ApiErrorBody {
            error: "x".to_string(),
            message: message.to_string(),
        })
    }

    #[test]
    fn test_from_status() {
        assert!(ClientError::from_status(401, body("no")).is_unauthorized());
        assert!(ClientError::from_status(404, body("gone")).is_not_found());
        assert!(ClientError::from_status(422, body("bad")).is_validation());
        assert!(ClientError::from_status(400, None).is_validation());
        assert!(ClientError::from_status(409, None).is_conflict());

        match ClientError::from_status(500, None) {
            ClientError::Api { status, code, message } => {
                assert_eq!(status, 500);
                assert_eq!(code, "unknown");
                assert!(message.contains("500"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            ClientError::Validation("name must not be empty".into()).user_message(),
            "name must not be empty"
        );
        assert!(ClientError::Timeout.user_message().contains("timed out"));
        assert!(ClientError::Conflict(String::new()).user_message().contains("Reload"));
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Timeout.is_transport());
        assert!(ClientError::Network("refused".into()).is_transport());
        assert!(!ClientError::NotFound("x".into()).is_transport());
    }
}
