//! History search pipeline.

use incnoc_core::incident::StoredIncident;

use crate::error::SearchError;
use crate::session::SessionGate;

/// Result of a search that reached the backend.
///
/// Zero matches is a distinct, non-error outcome so the caller can show
/// "no incidents found" rather than a failure.
#[derive(Debug)]
pub enum SearchOutcome {
    NoMatches,
    Matches(Vec<StoredIncident>),
}

impl SearchOutcome {
    pub fn records(&self) -> &[StoredIncident] {
        match self {
            SearchOutcome::NoMatches => &[],
            SearchOutcome::Matches(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoMatches)
    }
}

/// Fetch incident records, newest first.
///
/// A non-empty (trimmed) term restricts results to records whose
/// `palavras_chave` contains it as a case-insensitive substring; the
/// filtering and ordering are done by the backend query.
pub async fn search(gate: &mut SessionGate, term: &str) -> Result<SearchOutcome, SearchError> {
    let (store, session) = gate.authorize().await?;

    let term = term.trim();
    let term = (!term.is_empty()).then_some(term);

    match store.list(session.token(), term).await {
        Ok(records) if records.is_empty() => Ok(SearchOutcome::NoMatches),
        Ok(records) => Ok(SearchOutcome::Matches(records)),
        Err(e) if e.is_permission_denied() => {
            tracing::warn!(email = %session.email(), "History read denied by policy");
            Err(SearchError::PermissionDenied)
        }
        Err(e) => Err(SearchError::Backend(e.backend_message())),
    }
}

// ---------------------------------------------------------------------------
// Staleness tickets
// ---------------------------------------------------------------------------

/// Hands out monotonically increasing tickets for search calls.
///
/// A caller that kicks off a new search before an older one resolves
/// can compare tickets and drop the late result instead of rendering it.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    issued: u64,
}

impl SearchSequencer {
    /// Start a new search, invalidating all earlier tickets.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether `ticket` still identifies the most recent search.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older_one() {
        let mut seq = SearchSequencer::default();
        let first = seq.begin();
        let second = seq.begin();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn outcome_exposes_count_and_emptiness() {
        let outcome = SearchOutcome::NoMatches;
        assert!(outcome.is_empty());
        assert_eq!(outcome.len(), 0);
        assert!(outcome.records().is_empty());
    }
}
