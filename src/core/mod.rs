//! # Módulo Core — Modelo da Base de Conhecimento
//!
//! Tipos fundamentais do sistema especialista de diagnóstico de arroz:
//!
//! - [`CertaintyFactor`] — grau de certeza em `[0, 1]` e suas regras de combinação
//! - [`Symptom`] — sintoma observável com descrição e CF
//! - [`Disease`] — doença/praga diagnosticável
//! - [`Rule`] — regra de produção (conjunção de sintomas + peso)
//! - [`KnowledgeBase`] — contêiner imutável com consultas tolerantes
//!
//! Nada aqui faz I/O. O carregamento do JSON fica em
//! [`persistence`](crate::persistence).

/// Sub-módulo com [`CertaintyFactor`].
pub mod certainty;

/// Sub-módulo com [`Symptom`].
pub mod symptom;

/// Sub-módulo com [`Disease`] e [`Rule`].
pub mod rule;

/// Sub-módulo com [`KnowledgeBase`].
pub mod knowledge_base;

pub use certainty::CertaintyFactor;
pub use knowledge_base::KnowledgeBase;
pub use rule::{Disease, Rule};
pub use symptom::Symptom;
