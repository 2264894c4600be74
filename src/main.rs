//! # Sistem Pakar Padi — Diagnóstico de Pragas e Doenças do Arroz
//!
//! **Ponto de entrada principal** do sistema especialista.
//!
//! O motor usa **encadeamento progressivo** (forward chaining) com
//! **certainty factors**: cada regra exige uma conjunção de sintomas e, ao
//! disparar, produz `min(cf dos sintomas) × cf da regra`.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Lê Config (PADI_KB_PATH, PADI_BIND_ADDR)
//!   ├── Carrega KB do disco (ou usa KB vazia se falhar)
//!   ├── Monta AppState (snapshot imutável + catálogo) e Router
//!   └── Inicia servidor TCP
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Logs detalhados, incluindo cada regra disparada
//! RUST_LOG=debug cargo run
//!
//! # Outra base de conhecimento
//! PADI_KB_PATH=/srv/padi/kb.json cargo run
//! ```

/// Módulo `catalog` — lista de sintomas selecionáveis.
mod catalog;

/// Módulo `config` — variáveis de ambiente e defaults.
mod config;

/// Módulo `core` — modelo da base de conhecimento.
mod core;

/// Módulo `inference` — motor de diagnóstico.
mod inference;

/// Módulo `persistence` — leitura do JSON da base.
mod persistence;

/// Módulo `web` — servidor axum, handlers e templates.
mod web;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Aceita RUST_LOG para configurar o nível. Ex: RUST_LOG=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🌾 Sistem Pakar Padi — Starting...");

    let config = Config::from_env();

    // Falha de carga não derruba o processo: a KB vazia faz a interface
    // mostrar a entrada sentinela e o motor devolver listas vazias.
    let outcome = persistence::load_or_empty(&config.kb_path);
    if !outcome.status.is_loaded() {
        tracing::warn!(
            status = ?outcome.status,
            path = %config.kb_path.display(),
            "Servindo com base de conhecimento vazia"
        );
    }

    let state = AppState::new(outcome, config.kb_path.clone());
    let app = web::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao fazer bind em {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "🚀 Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
