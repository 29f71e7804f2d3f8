//! REST client for the Supabase backend (GoTrue + PostgREST).
//!
//! One [`RestStore`] wraps a single project: auth calls go to
//! `/auth/v1/...`, data calls to `/rest/v1/incidentes`. All requests
//! share a pooled [`reqwest::Client`] with the configured timeout.

use incnoc_core::incident::{IncidentRecord, StoredIncident};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::auth::{AuthErrorBody, AuthSession, AuthUser, SignInRequest};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::IncidentStore;

/// Backend table holding incident records.
pub const TABLE_INCIDENTES: &str = "incidentes";

/// Column the search filter matches against.
pub const COLUMN_PALAVRAS_CHAVE: &str = "palavras_chave";

/// Column search results are ordered by (descending).
pub const COLUMN_CRIADO_EM: &str = "criado_em";

/// HTTP client for one Supabase project.
pub struct RestStore {
    client: reqwest::Client,
    config: StoreConfig,
}

/// Error body shape returned by PostgREST.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestStore {
    /// Build a client for the given project config.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Project base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn table_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, TABLE_INCIDENTES)
    }

    /// Bearer value for data calls: the session token when one exists,
    /// the anon key otherwise.
    fn bearer<'a>(&'a self, token: Option<&'a str>) -> &'a str {
        token.unwrap_or(&self.config.anon_key)
    }

    /// Query parameters for a list call.
    ///
    /// PostgREST syntax: `order=criado_em.desc` plus, for a non-empty
    /// term, `palavras_chave=ilike.*<term>*` (`*` is the wildcard).
    fn list_query(term: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", format!("{COLUMN_CRIADO_EM}.desc")),
        ];
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            params.push((COLUMN_PALAVRAS_CHAVE, format!("ilike.*{term}*")));
        }
        params
    }

    // ---- response handling ----

    /// Ensure a data-API response has a success status. On failure,
    /// extract the PostgREST error code and message into
    /// [`StoreError::Api`].
    async fn ensure_rest_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let parsed: Option<RestErrorBody> = serde_json::from_str(&body).ok();
        let (code, message) = match parsed {
            Some(RestErrorBody { code, message }) => (code, message.unwrap_or(body)),
            None => (None, body),
        };
        Err(StoreError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Extract the best available error message from a failed auth call.
    async fn auth_failure(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let fallback = format!("auth request failed with status {status}");
        let message = match response.json::<AuthErrorBody>().await {
            Ok(body) => body.message(&fallback),
            Err(_) => fallback,
        };
        StoreError::Auth(message)
    }
}

#[async_trait::async_trait]
impl IncidentStore for RestStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, email, "Signing in to backend");

        let response = self
            .client
            .post(self.auth_endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&SignInRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_failure(response).await);
        }
        Ok(response.json::<AuthSession>().await?)
    }

    async fn current_user(&self, token: Option<&str>) -> Result<Option<AuthUser>, StoreError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "Checking current user");

        let response = self
            .client
            .get(self.auth_endpoint("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(Some(response.json::<AuthUser>().await?));
        }
        // 401/403 mean the backend no longer recognizes this identity.
        if matches!(status.as_u16(), 401 | 403) {
            return Ok(None);
        }
        Err(Self::auth_failure(response).await)
    }

    async fn sign_out(&self, token: &str) -> Result<(), StoreError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "Signing out of backend");

        let response = self
            .client
            .post(self.auth_endpoint("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_failure(response).await);
        }
        Ok(())
    }

    async fn insert(&self, token: Option<&str>, record: &IncidentRecord) -> Result<(), StoreError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, id_incidente = %record.id_incidente, "Inserting incident");

        let response = self
            .client
            .post(self.table_endpoint())
            .header("apikey", &self.config.anon_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer(token))
            .json(record)
            .send()
            .await?;

        Self::ensure_rest_success(response).await?;
        Ok(())
    }

    async fn list(
        &self,
        token: Option<&str>,
        term: Option<&str>,
    ) -> Result<Vec<StoredIncident>, StoreError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, term = term.unwrap_or(""), "Listing incidents");

        let response = self
            .client
            .get(self.table_endpoint())
            .query(&Self::list_query(term))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer(token))
            .send()
            .await?;

        let response = Self::ensure_rest_success(response).await?;
        Ok(response.json::<Vec<StoredIncident>>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_orders_by_creation_descending() {
        let params = RestStore::list_query(None);
        assert_eq!(
            params,
            vec![
                ("select", "*".to_string()),
                ("order", "criado_em.desc".to_string()),
            ]
        );
    }

    #[test]
    fn non_empty_term_adds_ilike_filter() {
        let params = RestStore::list_query(Some("rede"));
        assert!(params.contains(&("palavras_chave", "ilike.*rede*".to_string())));
    }

    #[test]
    fn empty_term_adds_no_filter() {
        let params = RestStore::list_query(Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn endpoints_are_rooted_at_the_project_url() {
        let store = RestStore::new(StoreConfig::new("https://x.supabase.co", "anon"))
            .expect("client should build");
        assert_eq!(store.auth_endpoint("user"), "https://x.supabase.co/auth/v1/user");
        assert_eq!(
            store.table_endpoint(),
            "https://x.supabase.co/rest/v1/incidentes"
        );
    }

    #[test]
    fn bearer_falls_back_to_anon_key() {
        let store = RestStore::new(StoreConfig::new("https://x.supabase.co", "anon"))
            .expect("client should build");
        assert_eq!(store.bearer(Some("tok")), "tok");
        assert_eq!(store.bearer(None), "anon");
    }
}
