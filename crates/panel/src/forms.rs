//! Form-input coercion.
//!
//! The panel collects every field as typed text; this module trims and
//! coerces that input into a validated [`IncidentDraft`] before the
//! pipeline runs, so coercion problems never become pipeline errors.

use incnoc_core::error::CoreError;
use incnoc_core::incident::{coerce_afetados, validate_detalhes, IncidentDraft};

/// Raw answers from the incident form, one string per field.
#[derive(Debug, Clone, Default)]
pub struct IncidentFormInput {
    pub empresa: String,
    pub sistema: String,
    pub parte: String,
    pub data: String,
    pub hora: String,
    pub afetados: String,
    pub impacto: String,
    pub id_incidente: String,
    pub detalhes: String,
}

/// Trim and coerce raw form input into a draft.
pub fn draft_from_input(input: &IncidentFormInput) -> Result<IncidentDraft, CoreError> {
    let detalhes = input.detalhes.trim().to_string();
    validate_detalhes(&detalhes)?;
    let afetados = coerce_afetados(&input.afetados)?;

    Ok(IncidentDraft {
        empresa: input.empresa.trim().to_string(),
        sistema: input.sistema.trim().to_string(),
        parte: input.parte.trim().to_string(),
        data: input.data.trim().to_string(),
        hora: input.hora.trim().to_string(),
        afetados,
        impacto: input.impacto.trim().to_string(),
        id_incidente: input.id_incidente.trim().to_string(),
        detalhes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed_and_afetados_coerced() {
        let input = IncidentFormInput {
            empresa: "  Empresa X ".into(),
            afetados: " 12 ".into(),
            detalhes: " Queda total ".into(),
            ..Default::default()
        };

        let draft = draft_from_input(&input).expect("coercion should succeed");
        assert_eq!(draft.empresa, "Empresa X");
        assert_eq!(draft.afetados, Some(12));
        assert_eq!(draft.detalhes, "Queda total");
    }

    #[test]
    fn empty_afetados_is_not_informed() {
        let input = IncidentFormInput::default();
        let draft = draft_from_input(&input).expect("coercion should succeed");
        assert_eq!(draft.afetados, None);
    }

    #[test]
    fn non_numeric_afetados_is_rejected_before_the_pipeline() {
        let input = IncidentFormInput {
            afetados: "muitos".into(),
            ..Default::default()
        };
        assert!(draft_from_input(&input).is_err());
    }
}
