//! `incnoc-panel` -- terminal panel for the NOC incident log.
//!
//! Operators log in, register incidents (with an evidence image), and
//! search the shared history. All persistence and authentication is
//! delegated to the configured Supabase project.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                              |
//! |------------------------|----------|-------------------------|------------------------------------------|
//! | `SUPABASE_URL`         | no       | from settings file      | Project URL, e.g. `https://x.supabase.co`|
//! | `SUPABASE_ANON_KEY`    | no       | from settings file      | Project anon key                         |
//! | `INCNOC_AUTH_MODE`     | no       | `real`                  | `real` (backend auth) or `trust`         |
//! | `INCNOC_SETTINGS_PATH` | no       | `incnoc-settings.json`  | Settings file location                   |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | Per-request HTTP timeout                 |

use std::io::{self, Write};
use std::sync::Arc;

use incnoc_core::evidence::{EvidenceSource, FileEvidence};
use incnoc_core::incident::StoredIncident;
use incnoc_panel::forms::{draft_from_input, IncidentFormInput};
use incnoc_panel::{messages, render};
use incnoc_panel::settings::{Settings, SettingsStore};
use incnoc_pipeline::{
    search, submit, AuthStrategy, SearchSequencer, SessionGate,
};
use incnoc_store::{IncidentStore, RestStore, StoreConfig, DEFAULT_REQUEST_TIMEOUT_SECS};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "incnoc_panel=info,incnoc_pipeline=info,incnoc_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let strategy = auth_strategy_from_env();
    let settings_store = SettingsStore::from_env();
    let mut settings = settings_store.load()?;

    let mut gate = SessionGate::new(strategy, build_store(&settings)?);

    tracing::info!(
        strategy = ?strategy,
        configured = gate.is_configured(),
        settings_path = %settings_store.path().display(),
        "Starting incnoc-panel",
    );

    let mut results: Vec<StoredIncident> = Vec::new();
    let mut sequencer = SearchSequencer::default();

    loop {
        if gate.session().is_none() {
            if !run_login_screen(&mut gate, &settings_store, &mut settings).await? {
                break;
            }
        } else if !run_panel_screen(
            &mut gate,
            &settings_store,
            &mut settings,
            &mut results,
            &mut sequencer,
        )
        .await?
        {
            break;
        }
    }

    gate.logout().await;
    Ok(())
}

/// Auth strategy from `INCNOC_AUTH_MODE` (default: real backend auth).
fn auth_strategy_from_env() -> AuthStrategy {
    match std::env::var("INCNOC_AUTH_MODE").as_deref() {
        Ok("trust") => AuthStrategy::TrustOnSubmit,
        Ok("real") | Err(_) => AuthStrategy::RealAuth,
        Ok(other) => {
            tracing::warn!(mode = other, "Unknown INCNOC_AUTH_MODE, using real auth");
            AuthStrategy::RealAuth
        }
    }
}

/// Build the backend handle, or `None` when URL/key are missing.
///
/// Environment variables take precedence over the settings file so a
/// deployment can pin the project without touching operator state.
fn build_store(settings: &Settings) -> anyhow::Result<Option<Arc<dyn IncidentStore>>> {
    let url = std::env::var("SUPABASE_URL")
        .ok()
        .or_else(|| settings.supabase_url.clone());
    let key = std::env::var("SUPABASE_ANON_KEY")
        .ok()
        .or_else(|| settings.supabase_key.clone());

    let Some(config) = StoreConfig::from_parts(url.as_deref(), key.as_deref()) else {
        return Ok(None);
    };

    let timeout: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    let store = RestStore::new(config.with_timeout_secs(timeout))?;
    Ok(Some(Arc::new(store)))
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Login screen. Returns `false` when the operator chose to quit.
async fn run_login_screen(
    gate: &mut SessionGate,
    settings_store: &SettingsStore,
    settings: &mut Settings,
) -> anyhow::Result<bool> {
    if gate.is_configured() {
        println!("\n{}", messages::STATUS_IDLE);
    } else {
        println!("\n{}", messages::STATUS_NOT_CONFIGURED);
    }
    println!("[1] Entrar  [2] Configurar backend  [0] Encerrar");

    match prompt("Opção")?.as_str() {
        "1" => {
            let email = prompt("E-mail")?;
            let senha = prompt("Senha")?;
            match gate.login(&email, &senha).await {
                Ok(()) => {
                    let identity = gate.session().map(|s| s.email()).unwrap_or(email.as_str());
                    println!("{}", messages::connected_as(identity));
                }
                Err(e) => println!("{}", messages::login_feedback(&e)),
            }
        }
        "2" => {
            settings.supabase_url = non_empty(prompt("URL do projeto Supabase")?);
            settings.supabase_key = non_empty(prompt("Chave anon do projeto")?);
            settings_store.save(settings)?;
            *gate = SessionGate::new(gate.strategy(), build_store(settings)?);
            println!(
                "Configuração salva em {}.",
                settings_store.path().display()
            );
        }
        "0" => return Ok(false),
        _ => {}
    }
    Ok(true)
}

/// Panel screen. Returns `false` when the operator chose to quit.
async fn run_panel_screen(
    gate: &mut SessionGate,
    settings_store: &SettingsStore,
    settings: &mut Settings,
    results: &mut Vec<StoredIncident>,
    sequencer: &mut SearchSequencer,
) -> anyhow::Result<bool> {
    println!("\n[1] Registrar incidente  [2] Buscar histórico  [3] Alternar tema  [4] Sair da conta  [0] Encerrar");

    match prompt("Opção")?.as_str() {
        "1" => run_submit_form(gate).await?,
        "2" => run_search(gate, results, sequencer).await?,
        "3" => {
            let theme = settings.toggle_theme().to_string();
            settings_store.save(settings)?;
            println!("Tema: {}", if theme == "claro" { "Claro" } else { "Escuro" });
        }
        "4" => {
            gate.logout().await;
            results.clear();
            println!("{}", messages::STATUS_IDLE);
        }
        "0" => return Ok(false),
        _ => {}
    }
    Ok(true)
}

/// Prompt the incident form, then run the submission pipeline.
async fn run_submit_form(gate: &mut SessionGate) -> anyhow::Result<()> {
    let input = IncidentFormInput {
        empresa: prompt("Empresa")?,
        sistema: prompt("Sistema")?,
        parte: prompt("Parte afetada")?,
        data: prompt("Data (AAAA-MM-DD)")?,
        hora: prompt("Hora (HH:MM)")?,
        afetados: prompt("Quantidade de afetados")?,
        impacto: prompt("Impacto")?,
        id_incidente: prompt("ID do incidente")?,
        detalhes: prompt("Detalhes")?,
    };

    let draft = match draft_from_input(&input) {
        Ok(draft) => draft,
        Err(e) => {
            println!("{}", messages::form_invalid(&e));
            return Ok(());
        }
    };

    let evidence_path = prompt("Caminho da imagem de evidência")?;
    let evidence = match evidence_path.as_str() {
        "" => None,
        path => match FileEvidence::open(path) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!(error = %e, path, "Could not stat evidence file");
                println!("Não foi possível ler a imagem de evidência. Tente novamente.");
                return Ok(());
            }
        },
    };

    match submit(
        gate,
        &draft,
        evidence.as_ref().map(|f| f as &dyn EvidenceSource),
    )
    .await
    {
        Ok(()) => println!("{}", messages::SUBMIT_SUCCESS),
        Err(e) => println!("{}", messages::submit_feedback(&e)),
    }
    Ok(())
}

/// Prompt for a term, run the search pipeline, render the results.
async fn run_search(
    gate: &mut SessionGate,
    results: &mut Vec<StoredIncident>,
    sequencer: &mut SearchSequencer,
) -> anyhow::Result<()> {
    let term = prompt("Termo de busca (vazio lista tudo)")?;

    let ticket = sequencer.begin();
    match search(gate, &term).await {
        Ok(outcome) => {
            // A newer search may have been issued meanwhile; only the
            // most recent one is allowed to replace the result list.
            if !sequencer.is_current(ticket) {
                return Ok(());
            }
            *results = outcome.records().to_vec();
            println!("{}", render::render_count(results.len()));
            for record in results.iter() {
                println!("{}", render::render_card(record));
            }
        }
        Err(e) => {
            results.clear();
            println!("{}", messages::search_feedback(&e));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Read one trimmed line of input under a label.
fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
