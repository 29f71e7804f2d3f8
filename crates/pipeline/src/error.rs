//! Pipeline error kinds.
//!
//! Every variant here is recoverable: the panel translates it into a
//! feedback message and waits for the operator to re-trigger the action.

/// Why the session gate refused an operation.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// No authenticated session (or the backend no longer recognizes it).
    #[error("Not authenticated")]
    Unauthenticated,

    /// No backend handle: URL or key is missing from the configuration.
    #[error("Backend connection is not configured")]
    NotConfigured,

    /// The gate's own backend check failed for a non-auth reason.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Failures of the incident submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Backend connection is not configured")]
    NotConfigured,

    /// No evidence file was supplied, or its reported size is zero.
    #[error("No evidence image was supplied")]
    MissingEvidence,

    /// The evidence file exceeds the 5 MiB source-size limit.
    #[error("Evidence image exceeds the size limit")]
    EvidenceTooLarge,

    /// Reading/encoding the evidence file failed.
    #[error("Failed to encode evidence image: {0}")]
    EncodingFailed(String),

    /// Authenticated, but backend policy refused the write.
    #[error("Authenticated but not permitted to register incidents")]
    PermissionDenied,

    /// Any other backend failure; carries the backend's own message.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Failures of the history search pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Backend connection is not configured")]
    NotConfigured,

    /// Authenticated, but backend policy refused the read.
    #[error("Authenticated but not permitted to read the history")]
    PermissionDenied,

    /// Any other backend failure; carries the backend's own message.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Failures of the login operation.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Email (or, with real auth, password) was left blank.
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Backend connection is not configured")]
    NotConfigured,

    /// The backend rejected the credentials (or the auth call failed).
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl From<GateError> for SubmitError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Unauthenticated => SubmitError::Unauthenticated,
            GateError::NotConfigured => SubmitError::NotConfigured,
            GateError::Backend(msg) => SubmitError::Backend(msg),
        }
    }
}

impl From<GateError> for SearchError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Unauthenticated => SearchError::Unauthenticated,
            GateError::NotConfigured => SearchError::NotConfigured,
            GateError::Backend(msg) => SearchError::Backend(msg),
        }
    }
}
