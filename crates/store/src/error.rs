//! Store error taxonomy and authorization-denial classification.
//!
//! The original front end classified permission errors by grepping the
//! backend's message for "row level security". Here the structured
//! signals come first (HTTP status, PostgreSQL error code); the text
//! match is kept only as a compatibility fallback.

/// PostgreSQL error code for `insufficient_privilege`, which PostgREST
/// returns for row-level-security denials.
pub const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Fallback marker text for backends that do not surface an error code.
const RLS_MARKER: &str = "row level security";

/// Errors from the backend store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx status.
    #[error("Backend API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Structured error code from the response body, when present
        /// (PostgREST surfaces PostgreSQL SQLSTATE codes here).
        code: Option<String>,
        /// Message text from the response body.
        message: String,
    },

    /// The auth endpoint rejected the credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl StoreError {
    /// Whether this error is an authorization/row-level-security denial.
    ///
    /// Checked in order: HTTP 401/403, PostgreSQL code `42501`, and
    /// finally the legacy message-text match.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            StoreError::Api {
                status,
                code,
                message,
            } => {
                if matches!(status, 401 | 403) {
                    return true;
                }
                if code.as_deref() == Some(PG_INSUFFICIENT_PRIVILEGE) {
                    return true;
                }
                message.to_lowercase().contains(RLS_MARKER)
            }
            _ => false,
        }
    }

    /// The backend's own message text, for surfacing to the operator.
    pub fn backend_message(&self) -> String {
        match self {
            StoreError::Api { message, .. } => message.clone(),
            StoreError::Auth(message) => message.clone(),
            StoreError::Http(e) => e.to_string(),
        }
    }
}
