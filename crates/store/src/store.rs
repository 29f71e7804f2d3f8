//! The [`IncidentStore`] trait: the pipelines' view of the backend.
//!
//! [`RestStore`](crate::rest::RestStore) is the production
//! implementation; tests substitute in-memory ones.

use async_trait::async_trait;
use incnoc_core::incident::{IncidentRecord, StoredIncident};

use crate::auth::{AuthSession, AuthUser};
use crate::error::StoreError;

/// Operations the incident pipelines perform against the backend.
///
/// `token` is the bearer token of an authenticated session; `None`
/// means the call is made with the anon key only (trust-on-submit
/// deployments, where row access is governed purely by backend policy).
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Authenticate with email + password (password grant).
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError>;

    /// Ask the backend who the bearer of `token` is.
    ///
    /// `Ok(None)` means the backend no longer recognizes the identity
    /// (expired/revoked session), which callers treat as a gate failure
    /// rather than an error.
    async fn current_user(&self, token: Option<&str>) -> Result<Option<AuthUser>, StoreError>;

    /// Invalidate the session behind `token`.
    async fn sign_out(&self, token: &str) -> Result<(), StoreError>;

    /// Insert one incident record. A single atomic insert; there is no
    /// multi-step transaction to coordinate.
    async fn insert(&self, token: Option<&str>, record: &IncidentRecord) -> Result<(), StoreError>;

    /// Fetch incident records ordered by `criado_em` descending.
    ///
    /// A non-empty `term` restricts results to records whose
    /// `palavras_chave` contains it as a case-insensitive substring.
    async fn list(
        &self,
        token: Option<&str>,
        term: Option<&str>,
    ) -> Result<Vec<StoredIncident>, StoreError>;
}
