//! In-memory [`IncidentStore`] used by the pipeline tests.
//!
//! Mimics the backend's query contract (case-insensitive substring
//! filter on `palavras_chave`, `criado_em` descending) and records
//! every insert so tests can assert on assembled payloads. Errors are
//! scripted per call via `Option<StoreError>` slots.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use incnoc_core::incident::{IncidentRecord, StoredIncident};
use incnoc_pipeline::{AuthStrategy, SessionGate};
use incnoc_store::{AuthSession, AuthUser, IncidentStore, StoreError};

pub struct FakeStore {
    /// Pre-seeded rows, returned (filtered + sorted) by `list`.
    pub rows: Mutex<Vec<StoredIncident>>,
    /// Every record passed to `insert`.
    pub inserted: Mutex<Vec<IncidentRecord>>,
    /// One-shot scripted failure for the next `insert`.
    pub insert_error: Mutex<Option<StoreError>>,
    /// One-shot scripted failure for the next `list`.
    pub list_error: Mutex<Option<StoreError>>,
    /// Email the backend still recognizes; `None` simulates an expired
    /// or revoked identity.
    pub known_user: Mutex<Option<String>>,
    pub insert_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
            insert_error: Mutex::new(None),
            list_error: Mutex::new(None),
            known_user: Mutex::new(Some("op@noc.example".to_string())),
            insert_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn seeded(rows: Vec<StoredIncident>) -> Self {
        let store = Self::new();
        *store.rows.lock().unwrap() = rows;
        store
    }

    pub fn insert_count(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IncidentStore for FakeStore {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession, StoreError> {
        Ok(AuthSession {
            access_token: "tok-1".to_string(),
            refresh_token: None,
            user: AuthUser {
                email: email.to_string(),
            },
        })
    }

    async fn current_user(&self, token: Option<&str>) -> Result<Option<AuthUser>, StoreError> {
        if token.is_none() {
            return Ok(None);
        }
        Ok(self
            .known_user
            .lock()
            .unwrap()
            .as_ref()
            .map(|email| AuthUser {
                email: email.clone(),
            }))
    }

    async fn sign_out(&self, _token: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, _token: Option<&str>, record: &IncidentRecord) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.insert_error.lock().unwrap().take() {
            return Err(err);
        }
        self.inserted.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list(
        &self,
        _token: Option<&str>,
        term: Option<&str>,
    ) -> Result<Vec<StoredIncident>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_error.lock().unwrap().take() {
            return Err(err);
        }

        let mut rows: Vec<StoredIncident> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| match term {
                Some(term) => row
                    .palavras_chave
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&term.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.criado_em.cmp(&a.criado_em));
        Ok(rows)
    }
}

/// A seeded row with the given id, keywords, and creation time.
pub fn row(id_incidente: &str, palavras_chave: &str, criado_em: DateTime<Utc>) -> StoredIncident {
    StoredIncident {
        evidencia: None,
        empresa: None,
        sistema: None,
        parte: None,
        data: None,
        hora: None,
        afetados: None,
        impacto: None,
        id_incidente: Some(id_incidente.to_string()),
        detalhes: None,
        responsavel: None,
        palavras_chave: Some(palavras_chave.to_string()),
        criado_em: Some(criado_em),
    }
}

/// A scripted backend API failure.
pub fn api_error(status: u16, code: Option<&str>, message: &str) -> StoreError {
    StoreError::Api {
        status,
        code: code.map(String::from),
        message: message.to_string(),
    }
}

/// A gate over `store`, already logged in as `op@noc.example`.
pub async fn authenticated_gate(store: Arc<FakeStore>, strategy: AuthStrategy) -> SessionGate {
    let mut gate = SessionGate::new(strategy, Some(store));
    gate.login("op@noc.example", "senha-forte")
        .await
        .expect("login should succeed");
    gate
}
