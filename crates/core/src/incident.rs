//! Incident record model, form validation, and keyword derivation.
//!
//! Serialized field names are the wire contract with the backend table
//! `incidentes` and must not change independently of it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum length for the free-text `detalhes` field (characters).
pub const MAX_DETALHES_LENGTH: usize = 10_000;

/// Separator used when joining keyword fragments into `palavras_chave`.
pub const KEYWORD_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A fully assembled incident record, ready to be inserted.
///
/// Built exclusively by [`assemble_record`]; `palavras_chave` and
/// `criado_em` are derived there and never set by hand.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentRecord {
    /// Encoded evidence image (data URI).
    pub evidencia: String,
    pub empresa: String,
    pub sistema: String,
    pub parte: String,
    pub data: String,
    pub hora: String,
    pub afetados: Option<u32>,
    pub impacto: String,
    pub id_incidente: String,
    pub detalhes: String,
    /// Identity of the operator who filed the report, taken from the
    /// active session, never from arbitrary form input.
    pub responsavel: String,
    /// Derived substring-search field; see [`derive_keywords`].
    pub palavras_chave: String,
    /// Assigned once, at submission time.
    pub criado_em: Timestamp,
}

/// An incident record as read back from the backend.
///
/// Rows written by older front-end variants may leave any column null,
/// so every field is optional here; the renderer substitutes
/// placeholders for missing values.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredIncident {
    pub evidencia: Option<String>,
    pub empresa: Option<String>,
    pub sistema: Option<String>,
    pub parte: Option<String>,
    pub data: Option<String>,
    pub hora: Option<String>,
    pub afetados: Option<u32>,
    pub impacto: Option<String>,
    pub id_incidente: Option<String>,
    pub detalhes: Option<String>,
    pub responsavel: Option<String>,
    pub palavras_chave: Option<String>,
    pub criado_em: Option<Timestamp>,
}

/// Validated form input for a new incident.
///
/// Carries everything the operator types except the evidence image,
/// which is supplied separately as a file. `afetados` is already
/// coerced per [`coerce_afetados`].
#[derive(Debug, Clone, Default)]
pub struct IncidentDraft {
    pub empresa: String,
    pub sistema: String,
    pub parte: String,
    pub data: String,
    pub hora: String,
    pub afetados: Option<u32>,
    pub impacto: String,
    pub id_incidente: String,
    pub detalhes: String,
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derive the `palavras_chave` search field.
///
/// Joins {empresa, sistema, parte, detalhes} with `", "`, omitting empty
/// fields. Recomputed on every submission; the stored value is never
/// edited directly.
pub fn derive_keywords(empresa: &str, sistema: &str, parte: &str, detalhes: &str) -> String {
    [empresa, sistema, parte, detalhes]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(KEYWORD_SEPARATOR)
}

/// Assemble an insertable [`IncidentRecord`] from a validated draft.
///
/// * `evidencia`   - encoded evidence data URI.
/// * `responsavel` - identity resolved from the active session.
/// * `now`         - the submission moment; becomes `criado_em`.
pub fn assemble_record(
    draft: &IncidentDraft,
    evidencia: String,
    responsavel: &str,
    now: Timestamp,
) -> IncidentRecord {
    IncidentRecord {
        evidencia,
        empresa: draft.empresa.clone(),
        sistema: draft.sistema.clone(),
        parte: draft.parte.clone(),
        data: draft.data.clone(),
        hora: draft.hora.clone(),
        afetados: draft.afetados,
        impacto: draft.impacto.clone(),
        id_incidente: draft.id_incidente.clone(),
        detalhes: draft.detalhes.clone(),
        responsavel: responsavel.to_string(),
        palavras_chave: derive_keywords(
            &draft.empresa,
            &draft.sistema,
            &draft.parte,
            &draft.detalhes,
        ),
        criado_em: now,
    }
}

// ---------------------------------------------------------------------------
// Validation / coercion
// ---------------------------------------------------------------------------

/// Coerce the raw `afetados` form value into the canonical representation.
///
/// The source variants disagree on whether the affected count is text or
/// a number; the canonical representation here is an optional
/// non-negative integer. An empty value means "not informed"; anything
/// else must parse as a base-10 unsigned integer.
pub fn coerce_afetados(raw: &str) -> Result<Option<u32>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<u32>().map(Some).map_err(|_| {
        CoreError::Validation(format!(
            "Affected count must be a non-negative integer (got '{trimmed}')"
        ))
    })
}

/// Validate the free-text details length.
pub fn validate_detalhes(detalhes: &str) -> Result<(), CoreError> {
    if detalhes.len() > MAX_DETALHES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Details exceed maximum length of {} characters (got {})",
            MAX_DETALHES_LENGTH,
            detalhes.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
