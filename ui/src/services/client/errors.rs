use thiserror::Error;

use super::types::ErrorBody;

/// Client-side operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Transport failure before a status code was available
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server rejected the access token (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Refresh failed or no tokens are stored; the user must sign in again
    #[error("Session expired")]
    SessionExpired,

    /// The submitted value collides with existing data (HTTP 409)
    #[error("Conflict: {message}")]
    Conflict {
        field: Option<String>,
        message: String,
    },

    /// Any other non-success status
    #[error("Request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Invalid response format: expected {expected}, got {got}")]
    InvalidResponse { expected: String, got: String },
}

impl ClientError {
    /// Classify a non-success response by status and (optional JSON) body
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|error| error.message.clone())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            401 => ClientError::Unauthorized,
            409 => ClientError::Conflict {
                field: parsed.and_then(|error| error.field),
                message,
            },
            _ => ClientError::Api { status, message },
        }
    }

    /// Errors that mean the stored credentials can no longer be used
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::SessionExpired)
    }

    /// Message suitable for a form-level banner
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network { .. } => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ClientError::Unauthorized | ClientError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Conflict { message, .. } => message.clone(),
            ClientError::Api { message, .. } => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ClientError::from_status(401, ""), ClientError::Unauthorized);
        assert_eq!(
            ClientError::from_status(409, r#"{"message":"Email already in use","field":"email"}"#),
            ClientError::Conflict {
                field: Some("email".to_string()),
                message: "Email already in use".to_string()
            }
        );
        assert_eq!(
            ClientError::from_status(500, "boom"),
            ClientError::Api {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(
            ClientError::from_status(502, ""),
            ClientError::Api {
                status: 502,
                message: "HTTP 502".to_string()
            }
        );
    }

    #[test]
    fn test_auth_failures() {
        assert!(ClientError::Unauthorized.is_auth_failure());
        assert!(ClientError::SessionExpired.is_auth_failure());
        assert!(!ClientError::from_status(409, "").is_auth_failure());
    }
}
