//! # Estado da Aplicação Web
//!
//! A base de conhecimento é servida como **snapshot imutável**:
//!
//! ```text
//! AppState
//!  ├── snapshot: RwLock<Arc<Snapshot>>   ← trocado inteiro no reload
//!  │     ├── kb: KnowledgeBase
//!  │     ├── choices: Vec<SymptomChoice> (derivado uma vez)
//!  │     ├── status: LoadStatus
//!  │     └── loaded_at
//!  └── kb_path                            ← origem usada no reload
//! ```
//!
//! Cada requisição clona o `Arc` sob um read lock curto e diagnostica sem
//! segurar lock nenhum. O reload instala um `Arc` novo; requisições em
//! andamento continuam com o snapshot antigo.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::catalog::{build_choices, SymptomChoice};
use crate::core::KnowledgeBase;
use crate::persistence::{self, LoadOutcome, LoadStatus};

/// Versão carregada da base, com o catálogo já derivado.
#[derive(Debug)]
pub struct Snapshot {
    pub kb: KnowledgeBase,
    pub choices: Vec<SymptomChoice>,
    pub status: LoadStatus,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(outcome: LoadOutcome) -> Self {
        let choices = build_choices(&outcome.kb);
        Self {
            kb: outcome.kb,
            choices,
            status: outcome.status,
            loaded_at: Utc::now(),
        }
    }
}

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<Arc<Snapshot>>>,
    /// Arquivo de onde a KB é (re)carregada.
    pub kb_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(outcome: LoadOutcome, kb_path: PathBuf) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(Snapshot::new(outcome)))),
            kb_path: Arc::new(kb_path),
        }
    }

    /// Snapshot atual. O lock é liberado antes de retornar.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    /// Instala um novo snapshot atomicamente e o retorna.
    pub fn install(&self, outcome: LoadOutcome) -> Arc<Snapshot> {
        let next = Arc::new(Snapshot::new(outcome));
        *self.snapshot.write() = next.clone();
        next
    }

    /// Relê `kb_path` e instala o resultado (KB vazia se falhar).
    pub fn reload(&self) -> Arc<Snapshot> {
        let outcome = persistence::load_or_empty(&self.kb_path);
        self.install(outcome)
    }
}
