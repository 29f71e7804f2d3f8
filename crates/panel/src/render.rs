//! Result rendering.
//!
//! Projects stored incident records into text cards, one per record,
//! substituting placeholders for absent values.

use incnoc_core::incident::StoredIncident;

const PLACEHOLDER_ID: &str = "Sem ID";
const PLACEHOLDER_SISTEMA: &str = "Sistema";
const PLACEHOLDER_DETALHES: &str = "Sem descrição";
const PLACEHOLDER_META: &str = "-";

/// Result-count line shown above the cards.
pub fn render_count(count: usize) -> String {
    if count == 0 {
        "Nenhum incidente encontrado.".to_string()
    } else {
        format!("{count} incidente(s) encontrado(s)")
    }
}

/// One display card for a record.
pub fn render_card(item: &StoredIncident) -> String {
    let id = item.id_incidente.as_deref().filter(|s| !s.is_empty());
    let sistema = item.sistema.as_deref().filter(|s| !s.is_empty());
    let detalhes = item.detalhes.as_deref().filter(|s| !s.is_empty());

    let mut card = format!(
        "{} - {}\n  {}\n",
        id.unwrap_or(PLACEHOLDER_ID),
        sistema.unwrap_or(PLACEHOLDER_SISTEMA),
        detalhes.unwrap_or(PLACEHOLDER_DETALHES),
    );
    if item.evidencia.is_some() {
        card.push_str("  [evidência anexada]\n");
    }
    card.push_str(&format!(
        "  Empresa: {} | Data: {} | Hora: {} | Afetados: {}",
        meta(item.empresa.as_deref()),
        meta(item.data.as_deref()),
        meta(item.hora.as_deref()),
        item.afetados
            .map(|n| n.to_string())
            .unwrap_or_else(|| PLACEHOLDER_META.to_string()),
    ));
    card
}

fn meta(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(PLACEHOLDER_META)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
