//! # Módulo Web — Adaptador de Apresentação
//!
//! Camada HTTP construída com **Axum** + **Maud** (+ HTMX opcional no
//! navegador). Não contém lógica de diagnóstico: só traduz formulários e
//! JSON para chamadas ao [`InferenceEngine`](crate::inference::InferenceEngine).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Axum Router                                             │
//! │  ├── GET  /                  → página principal         │
//! │  ├── POST /diagnose          → HTMX fragment / página   │
//! │  ├── GET  /api/choices       → JSON catálogo            │
//! │  ├── POST /api/diagnose      → JSON diagnóstico         │
//! │  ├── GET  /status            → JSON estado da KB        │
//! │  └── POST /knowledge/reload  → JSON após reload         │
//! ├─────────────────────────────────────────────────────────┤
//! │ Static Assets (tower_http::ServeDir → /assets/)         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
///
/// As rotas `/api/*` aceitam CORS de qualquer origem, para que outros
/// front-ends consumam o motor diretamente.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/choices", get(handlers::api_choices))
        .route("/api/diagnose", post(handlers::api_diagnose))
        .layer(CorsLayer::permissive());

    Router::new()
        // ── Páginas HTML ──────────────────────────────────────
        .route("/", get(handlers::index))
        .route("/diagnose", post(handlers::diagnose_form))
        // ── API JSON ──────────────────────────────────────────
        .merge(api)
        .route("/status", get(handlers::status))
        .route("/knowledge/reload", post(handlers::reload_knowledge))
        // ── Arquivos estáticos ────────────────────────────────
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::{parse_kb, LoadOutcome, LoadStatus};

    const KB_JSON: &str = r#"{
        "diseases": { "R1": "Blast", "R2": "Tungro" },
        "rules": {
            "R1": { "symptoms": ["A1", "B2"], "cf_rule": 0.8 },
            "R2": { "symptoms": ["A1"], "cf_rule": 0.5 }
        },
        "symptoms": {
            "descriptions": { "A1": "Bercak belah ketupat", "B2": "Leher malai busuk" },
            "certainty_factors": { "A1": 0.9, "B2": 0.6 }
        }
    }"#;

    fn state_with(json: &str) -> AppState {
        AppState::new(
            LoadOutcome {
                kb: parse_kb(json).unwrap(),
                status: LoadStatus::Loaded,
            },
            PathBuf::from("unused.json"),
        )
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_request(body: &str, htmx: bool) -> Request<Body> {
        let mut builder = Request::post("/diagnose")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn index_lists_symptom_choices() {
        let app = create_router(state_with(KB_JSON));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("A1: Bercak belah ketupat"));
        assert!(html.contains("B2: Leher malai busuk"));
    }

    #[tokio::test]
    async fn htmx_diagnose_returns_ranked_fragment() {
        let app = create_router(state_with(KB_JSON));
        let response = app
            .oneshot(form_request("symptoms=A1&symptoms=B2", true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(!html.contains("<html"));
        // Blast: min(0.9, 0.6) × 0.8 = 0.48 ; Tungro: 0.9 × 0.5 = 0.45
        let blast = html.find("48.00 %").unwrap();
        let tungro = html.find("45.00 %").unwrap();
        assert!(blast < tungro);
    }

    #[tokio::test]
    async fn plain_form_post_returns_full_page() {
        let app = create_router(state_with(KB_JSON));
        let response = app
            .oneshot(form_request("symptoms=A1", false))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("<html"));
        assert!(html.contains("Tungro"));
        assert!(!html.contains("Blast</td>"));
    }

    #[tokio::test]
    async fn unmatched_selection_renders_no_match_row() {
        let app = create_router(state_with(KB_JSON));
        let response = app
            .oneshot(form_request("symptoms=B2&symptoms=ZZ", true))
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains("Tidak ada diagnosis yang cocok"));
        assert!(html.contains("0.00 %"));
    }

    #[tokio::test]
    async fn api_diagnose_returns_json() {
        let app = create_router(state_with(KB_JSON));
        let request = Request::post("/api/diagnose")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "symptoms": ["A1", "B2"] }).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        let diagnoses = body["diagnoses"].as_array().unwrap();
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(diagnoses[0]["disease_name"], "Blast");
        assert_eq!(diagnoses[0]["rule_id"], "R1");
        let cf = diagnoses[0]["confidence"].as_f64().unwrap();
        assert!((cf - 0.48).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_kb_serves_sentinel_choice() {
        let state = AppState::new(
            LoadOutcome {
                kb: crate::core::KnowledgeBase::new(),
                status: LoadStatus::NotFound,
            },
            PathBuf::from("unused.json"),
        );
        let app = create_router(state);
        let response = app
            .oneshot(Request::get("/api/choices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!([{ "label": "Error: Gagal memuat knowledge_base.json", "id": "NONE" }]));
    }

    /// Os atalhos da página precisam produzir diagnóstico com a base padrão
    #[test]
    fn example_selections_match_bundled_kb() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(crate::persistence::DEFAULT_KB_PATH);
        let kb = crate::persistence::load_kb(&path).unwrap();
        for example in templates::EXAMPLE_SELECTIONS {
            let results = crate::inference::InferenceEngine::diagnose(&kb, *example);
            assert!(!results.is_empty(), "exemplo {example:?} sem diagnóstico");
        }

        let results = crate::inference::InferenceEngine::diagnose(&kb, &["A10", "B10"]);
        assert_eq!(results[0].rule_id, "R9");
        assert!((results[0].confidence.value() - 0.72).abs() < 1e-9);
    }

    #[tokio::test]
    async fn reload_picks_up_new_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KB_JSON.as_bytes()).unwrap();

        let state = AppState::new(
            LoadOutcome {
                kb: crate::core::KnowledgeBase::new(),
                status: LoadStatus::NotFound,
            },
            file.path().to_path_buf(),
        );
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let before: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(before["loaded"], false);
        assert_eq!(before["load_status"], "not_found");

        let response = app
            .oneshot(Request::post("/knowledge/reload").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let after: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(after["loaded"], true);
        assert_eq!(after["rules"], 2);
        assert_eq!(state.snapshot().kb.rule_count(), 2);
    }

    /// `{}` é JSON válido, mas status e catálogo precisam concordar que não há base
    #[tokio::test]
    async fn empty_document_is_reported_as_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        let state = AppState::new(
            crate::persistence::load_or_empty(file.path()),
            file.path().to_path_buf(),
        );
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(status["loaded"], false);
        assert_eq!(status["load_status"], "empty");

        let response = app
            .oneshot(Request::get("/api/choices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let choices: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(choices[0]["id"], "NONE");
    }
}
