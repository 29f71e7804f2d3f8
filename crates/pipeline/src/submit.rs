//! Incident submission pipeline.

use chrono::Utc;
use incnoc_core::evidence::{self, EvidenceError, EvidenceSource};
use incnoc_core::incident::{assemble_record, IncidentDraft};

use crate::error::SubmitError;
use crate::session::SessionGate;

/// Validate, assemble, and insert one incident record.
///
/// Checks run in a fixed order: session gate, evidence presence,
/// evidence size (before any read), encoding, then the single atomic
/// insert. On success the caller clears the form.
pub async fn submit(
    gate: &mut SessionGate,
    draft: &IncidentDraft,
    evidence: Option<&dyn EvidenceSource>,
) -> Result<(), SubmitError> {
    let (store, session) = gate.authorize().await?;

    let evidence = match evidence {
        Some(source) if !source.is_empty() => source,
        _ => return Err(SubmitError::MissingEvidence),
    };
    evidence::check_size(evidence.len()).map_err(|_| SubmitError::EvidenceTooLarge)?;

    let encoded = evidence::encode_data_uri(evidence).map_err(|e| match e {
        EvidenceError::TooLarge { .. } => SubmitError::EvidenceTooLarge,
        EvidenceError::Read(err) => SubmitError::EncodingFailed(err.to_string()),
    })?;

    let record = assemble_record(draft, encoded, session.email(), Utc::now());

    match store.insert(session.token(), &record).await {
        Ok(()) => {
            tracing::info!(
                id_incidente = %record.id_incidente,
                responsavel = %record.responsavel,
                "Incident registered",
            );
            Ok(())
        }
        Err(e) if e.is_permission_denied() => {
            tracing::warn!(responsavel = %record.responsavel, "Incident insert denied by policy");
            Err(SubmitError::PermissionDenied)
        }
        Err(e) => Err(SubmitError::Backend(e.backend_message())),
    }
}
