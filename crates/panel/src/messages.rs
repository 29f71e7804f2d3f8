//! User-facing feedback messages (Portuguese, matching the original UI).
//!
//! Every pipeline error is recovered here into a message for the
//! feedback area; nothing is fatal and nothing retries on its own.

use incnoc_core::error::CoreError;
use incnoc_pipeline::{LoginError, SearchError, SubmitError};

pub const SUBMIT_SUCCESS: &str = "Incidente salvo com sucesso!";

pub const STATUS_IDLE: &str = "Conectado ao Supabase. Faça login para usar o painel.";
pub const STATUS_NOT_CONFIGURED: &str =
    "Supabase não configurado. Informe a URL e a chave do projeto nas configurações.";

const NOT_CONFIGURED: &str =
    "Configure a URL e a chave do Supabase antes de usar o painel.";
const SESSION_EXPIRED: &str =
    "Sessão expirada ou usuário não autenticado. Faça login novamente.";

/// Status line once a session exists.
pub fn connected_as(email: &str) -> String {
    format!("Conectado como {email}")
}

/// Feedback for a failed login.
pub fn login_feedback(error: &LoginError) -> String {
    match error {
        LoginError::MissingCredentials => "Preencha e-mail e senha.".to_string(),
        LoginError::NotConfigured => NOT_CONFIGURED.to_string(),
        LoginError::Auth(msg) => format!("Falha no login: {msg}"),
    }
}

/// Feedback for a failed submission.
pub fn submit_feedback(error: &SubmitError) -> String {
    match error {
        SubmitError::Unauthenticated => SESSION_EXPIRED.to_string(),
        SubmitError::NotConfigured => NOT_CONFIGURED.to_string(),
        SubmitError::MissingEvidence => {
            "Envie ao menos uma imagem de evidência.".to_string()
        }
        SubmitError::EvidenceTooLarge => {
            "A imagem deve ter no máximo 5MB para evitar erros.".to_string()
        }
        SubmitError::EncodingFailed(_) => {
            "Não foi possível ler a imagem de evidência. Tente novamente.".to_string()
        }
        SubmitError::PermissionDenied => {
            "Você está autenticado, mas não tem permissão para registrar incidentes. \
             Verifique se seu e-mail está cadastrado no NOC."
                .to_string()
        }
        SubmitError::Backend(msg) => format!("Erro ao salvar: {msg}"),
    }
}

/// Feedback for a failed search.
pub fn search_feedback(error: &SearchError) -> String {
    match error {
        SearchError::Unauthenticated => "Sessão expirada. Faça login novamente.".to_string(),
        SearchError::NotConfigured => NOT_CONFIGURED.to_string(),
        SearchError::PermissionDenied => {
            "Você está autenticado, mas não tem permissão para ver o histórico. \
             Verifique se seu e-mail está cadastrado no NOC."
                .to_string()
        }
        SearchError::Backend(msg) => format!("Erro na busca: {msg}"),
    }
}

/// Feedback for form input that failed local validation.
pub fn form_invalid(error: &CoreError) -> String {
    match error {
        CoreError::Validation(msg) => format!("Dados do formulário inválidos: {msg}"),
    }
}
