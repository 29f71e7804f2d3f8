//! Backend store client for the incnoc incident log.
//!
//! The backend is a managed Supabase project: GoTrue for authentication
//! and PostgREST for the `incidentes` table. [`RestStore`] wraps both
//! behind the [`IncidentStore`] trait that the pipelines depend on, so
//! tests can substitute an in-memory store.

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;
pub mod store;

pub use auth::{AuthSession, AuthUser};
pub use config::{StoreConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::{StoreError, PG_INSUFFICIENT_PRIVILEGE};
pub use rest::RestStore;
pub use store::IncidentStore;
