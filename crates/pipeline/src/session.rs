//! Session gate: who is allowed to touch the incident store.
//!
//! The gate owns the backend handle and the authentication state.
//! State machine: `Unauthenticated -> Authenticating -> Authenticated ->
//! Unauthenticated` (explicit logout, or the backend reporting the
//! identity as no longer valid). No other states.

use std::sync::Arc;

use incnoc_store::IncidentStore;

use crate::error::{GateError, LoginError};

/// How identities are established, selected at startup configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Real backend authentication: password-grant login, and the
    /// backend is re-asked for the current user before every operation.
    RealAuth,
    /// Any submitted login email is accepted as the identity with no
    /// server-side verification; row access is enforced by backend
    /// policy alone.
    TrustOnSubmit,
}

/// An authenticated (or trusted) identity plus its bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    email: String,
    token: Option<String>,
}

impl Session {
    /// The identity used as `responsavel` on submitted records.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Bearer token for backend calls; `None` under trust-on-submit.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Authentication state of the panel.
#[derive(Debug, Clone)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
}

/// Gate in front of every incident store operation.
pub struct SessionGate {
    strategy: AuthStrategy,
    store: Option<Arc<dyn IncidentStore>>,
    state: SessionState,
}

impl SessionGate {
    /// Build a gate. `store` is `None` when the backend credentials are
    /// missing; every operation then short-circuits as "not configured".
    pub fn new(strategy: AuthStrategy, store: Option<Arc<dyn IncidentStore>>) -> Self {
        Self {
            strategy,
            store,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn strategy(&self) -> AuthStrategy {
        self.strategy
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a backend handle exists at all.
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// The active session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Establish a session (the session's constructor).
    ///
    /// With [`AuthStrategy::RealAuth`] the credentials go to the
    /// backend's password-grant endpoint; with
    /// [`AuthStrategy::TrustOnSubmit`] a non-empty email is accepted
    /// as-is.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), LoginError> {
        let email = email.trim();
        let password = password.trim();

        if email.is_empty() || (self.strategy == AuthStrategy::RealAuth && password.is_empty()) {
            return Err(LoginError::MissingCredentials);
        }
        let Some(store) = self.store.clone() else {
            return Err(LoginError::NotConfigured);
        };

        self.state = SessionState::Authenticating;

        let session = match self.strategy {
            AuthStrategy::RealAuth => match store.sign_in(email, password).await {
                Ok(auth) => Session {
                    email: auth.user.email,
                    token: Some(auth.access_token),
                },
                Err(e) => {
                    self.state = SessionState::Unauthenticated;
                    return Err(LoginError::Auth(e.backend_message()));
                }
            },
            AuthStrategy::TrustOnSubmit => Session {
                email: email.to_string(),
                token: None,
            },
        };

        tracing::info!(email = %session.email, strategy = ?self.strategy, "Session established");
        self.state = SessionState::Authenticated(session);
        Ok(())
    }

    /// Destroy the session (its destructor).
    ///
    /// Under real auth the backend sign-out is best-effort: a failure is
    /// logged but the local session is dropped regardless.
    pub async fn logout(&mut self) {
        if let SessionState::Authenticated(session) = &self.state {
            if let (Some(store), Some(token)) = (&self.store, session.token()) {
                if let Err(e) = store.sign_out(token).await {
                    tracing::warn!(error = %e, "Backend sign-out failed");
                }
            }
            tracing::info!(email = %session.email, "Session destroyed");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Confirm the caller may perform a read or write.
    ///
    /// Under real auth the backend is asked for the current user; if it
    /// no longer recognizes the identity, the session is destroyed and
    /// the caller is sent back to the login state.
    pub(crate) async fn authorize(&mut self) -> Result<(Arc<dyn IncidentStore>, Session), GateError> {
        let Some(store) = self.store.clone() else {
            return Err(GateError::NotConfigured);
        };
        let SessionState::Authenticated(session) = &self.state else {
            return Err(GateError::Unauthenticated);
        };
        let session = session.clone();

        if self.strategy == AuthStrategy::RealAuth {
            match store.current_user(session.token()).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    tracing::warn!(email = %session.email, "Backend no longer recognizes session");
                    self.state = SessionState::Unauthenticated;
                    return Err(GateError::Unauthenticated);
                }
                Err(e) => return Err(GateError::Backend(e.backend_message())),
            }
        }

        Ok((store, session))
    }
}
