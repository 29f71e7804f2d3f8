//! Request/response types for the backend's auth (GoTrue) endpoints.

use serde::{Deserialize, Serialize};

/// The authenticated identity as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub email: String,
}

/// A successful password-grant sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent auth'd calls.
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Body for `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Error body shape returned by GoTrue.
///
/// Older deployments use `error`/`error_description`, newer ones `msg`;
/// all fields are optional and the best available one wins.
#[derive(Debug, Deserialize)]
pub struct AuthErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl AuthErrorBody {
    /// Pick the most descriptive message out of the body, falling back
    /// to `fallback` when the body carried nothing usable.
    pub fn message(self, fallback: &str) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_wins_over_error_slug() {
        let body: AuthErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(body.message("fallback"), "Invalid login credentials");
    }

    #[test]
    fn msg_field_is_used_when_present() {
        let body: AuthErrorBody = serde_json::from_str(r#"{"msg":"Email not confirmed"}"#).unwrap();
        assert_eq!(body.message("fallback"), "Email not confirmed");
    }

    #[test]
    fn empty_body_falls_back() {
        let body: AuthErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message("status 400"), "status 400");
    }
}
