//! Incident submission and history search pipelines.
//!
//! The [`session::SessionGate`] decides whether a caller may touch the
//! backend at all; [`submit::submit`] and [`search::search`] run the two
//! operations against whatever [`IncidentStore`](incnoc_store::IncidentStore)
//! handle the gate holds. All errors are recovered at the caller's
//! boundary and turned into user-visible feedback; nothing here retries
//! or panics.

pub mod error;
pub mod search;
pub mod session;
pub mod submit;

pub use error::{LoginError, SearchError, SubmitError};
pub use search::{search, SearchOutcome, SearchSequencer};
pub use session::{AuthStrategy, Session, SessionGate, SessionState};
pub use submit::submit;
