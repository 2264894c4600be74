//! # Módulo Inference — Motor de Diagnóstico
//!
//! Encadeamento progressivo (forward chaining) sobre a
//! [`KnowledgeBase`](crate::core::KnowledgeBase), com combinação de
//! certainty factors:
//!
//! | Etapa | Regra | Resultado |
//! |-------|-------|-----------|
//! | **Disparo** | sintomas da regra ⊆ observados | regra ativa |
//! | **Conjunção** | `min(cf(sintoma))` | CF paralelo |
//! | **Peso** | `cf_paralelo × cf_regra` | CF final |
//!
//! Veja [`InferenceEngine`] para detalhes.

/// Sub-módulo com o motor e o tipo [`Diagnosis`].
pub mod rules;

pub use rules::{Diagnosis, InferenceEngine};
