//! # Handlers HTTP
//!
//! | Handler | Método | Rota | Retorno |
//! |---------|--------|------|---------|
//! | [`index`] | GET | `/` | HTML completo |
//! | [`diagnose_form`] | POST | `/diagnose` | HTMX fragment (ou página, sem HTMX) |
//! | [`api_choices`] | GET | `/api/choices` | JSON |
//! | [`api_diagnose`] | POST | `/api/diagnose` | JSON |
//! | [`status`] | GET | `/status` | JSON |
//! | [`reload_knowledge`] | POST | `/knowledge/reload` | JSON |
//!
//! Todos os handlers pegam o snapshot atual via [`AppState::snapshot()`]
//! e não seguram lock durante a inferência.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use axum_extra::extract::Form;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{AppState, Snapshot};
use super::templates;
use crate::catalog::{SymptomChoice, UNAVAILABLE_ID};
use crate::inference::{Diagnosis, InferenceEngine};
use crate::persistence::LoadStatus;

/// Campos do formulário de diagnóstico (`symptoms=A1&symptoms=B2`).
#[derive(Debug, Default, Deserialize)]
pub struct DiagnoseForm {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Corpo de `POST /api/diagnose`.
#[derive(Debug, Default, Deserialize)]
pub struct DiagnoseRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Resposta de `POST /api/diagnose`. Lista vazia = nenhum diagnóstico.
#[derive(Serialize)]
pub struct DiagnoseResponse {
    pub diagnoses: Vec<Diagnosis>,
    pub generated_at: DateTime<Utc>,
}

/// Resposta de `/status` e `/knowledge/reload`.
#[derive(Serialize)]
pub struct StatusResponse {
    /// `true` quando a última carga teve sucesso.
    pub loaded: bool,
    pub load_status: LoadStatus,
    pub diseases: usize,
    pub rules: usize,
    pub symptoms: usize,
    pub loaded_at: DateTime<Utc>,
}

impl StatusResponse {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            loaded: snapshot.status.is_loaded(),
            load_status: snapshot.status,
            diseases: snapshot.kb.disease_count(),
            rules: snapshot.kb.rule_count(),
            symptoms: snapshot.kb.symptom_count(),
            loaded_at: snapshot.loaded_at,
        }
    }
}

fn markup_to_html(m: maud::Markup) -> Html<String> {
    Html(m.into_string())
}

/// Remove o id sentinela e entradas em branco da seleção.
fn selected_ids(symptoms: Vec<String>) -> Vec<String> {
    symptoms
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != UNAVAILABLE_ID)
        .collect()
}

/// GET `/` — Página principal com o catálogo de sintomas.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.snapshot();
    markup_to_html(templates::full_page(&snapshot, &[], None))
}

/// POST `/diagnose` — Diagnóstico a partir do formulário.
///
/// ## Fluxo
///
/// ```text
/// 1. Lê os campos "symptoms" repetidos do form
/// 2. Seleção vazia → tabela só com cabeçalho (sem rodar o motor)
/// 3. Roda InferenceEngine::diagnose no snapshot atual
/// 4. Com header HX-Request → fragment da tabela
///    Sem HTMX → página completa com a seleção preservada
/// ```
pub async fn diagnose_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DiagnoseForm>,
) -> Html<String> {
    let snapshot = state.snapshot();
    let selected = selected_ids(form.symptoms);

    let results = if selected.is_empty() {
        None
    } else {
        Some(InferenceEngine::diagnose(&snapshot.kb, selected.as_slice()))
    };
    if let Some(results) = &results {
        tracing::info!(
            selected = selected.len(),
            matched = results.len(),
            "Diagnóstico via formulário"
        );
    }

    if headers.contains_key("hx-request") {
        markup_to_html(templates::results_table(results.as_deref()))
    } else {
        markup_to_html(templates::full_page(
            &snapshot,
            &selected,
            results.as_deref(),
        ))
    }
}

/// GET `/api/choices` — Catálogo de sintomas em JSON.
pub async fn api_choices(State(state): State<AppState>) -> Json<Vec<SymptomChoice>> {
    Json(state.snapshot().choices.clone())
}

/// POST `/api/diagnose` — Diagnóstico em JSON.
pub async fn api_diagnose(
    State(state): State<AppState>,
    Json(request): Json<DiagnoseRequest>,
) -> Json<DiagnoseResponse> {
    let snapshot = state.snapshot();
    let selected = selected_ids(request.symptoms);
    let diagnoses = InferenceEngine::diagnose(&snapshot.kb, selected.as_slice());
    tracing::info!(
        selected = selected.len(),
        matched = diagnoses.len(),
        "Diagnóstico via API"
    );
    Json(DiagnoseResponse {
        diagnoses,
        generated_at: Utc::now(),
    })
}

/// GET `/status` — Estado da base de conhecimento carregada.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::from_snapshot(&state.snapshot()))
}

/// POST `/knowledge/reload` — Relê o arquivo e troca o snapshot.
///
/// Uma falha instala a KB vazia, igual a uma falha na inicialização.
pub async fn reload_knowledge(State(state): State<AppState>) -> Json<StatusResponse> {
    let reload_state = state.clone();
    let snapshot = match tokio::task::spawn_blocking(move || reload_state.reload()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Tarefa de reload falhou, mantendo snapshot atual");
            state.snapshot()
        }
    };
    tracing::info!(status = ?snapshot.status, rules = snapshot.kb.rule_count(), "KB recarregada");
    Json(StatusResponse::from_snapshot(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_drops_sentinel_and_blanks() {
        let ids = selected_ids(vec![
            "A1".into(),
            " ".into(),
            "NONE".into(),
            " B2 ".into(),
        ]);
        assert_eq!(ids, vec!["A1", "B2"]);
    }
}
