//! # Encadeamento Progressivo com Certainty Factors
//!
//! O [`InferenceEngine`] parte dos sintomas observados (fatos) e dispara
//! toda regra cujo antecedente esteja inteiramente satisfeito. Não há
//! busca orientada a objetivo nem encadeamento de conclusões: cada regra
//! conclui diretamente uma doença.
//!
//! ## Cálculo da Confiança
//!
//! ```text
//! Regra R1: A1 ∧ B2 ⇒ Blas          cf_regra = 0.8
//! Observado: { A1, B2, B9 }          (B9 é ignorado por R1)
//! ─────────────────────────────────────────────────
//! cf_paralelo = min(cf(A1), cf(B2)) = min(0.9, 0.6) = 0.6
//! cf_final    = cf_paralelo × cf_regra = 0.6 × 0.8  = 0.48
//! ```
//!
//! Uma regra sem sintomas dispara sempre, mas com `cf_final = 0.0`.
//!
//! ## Ordenação
//!
//! Os resultados saem em ordem decrescente de `cf_final`. Empates mantêm a
//! ordem de iteração das regras (id crescente), mas isso não faz parte do
//! contrato.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::{CertaintyFactor, KnowledgeBase, Rule};

/// Um diagnóstico: doença concluída por uma regra e a confiança final.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Nome de exibição da doença/praga.
    pub disease_name: String,
    /// `cf_paralelo × cf_regra`, em `[0, 1]`.
    pub confidence: CertaintyFactor,
    /// Id da regra que disparou (também o id da doença).
    pub rule_id: String,
}

/// Motor de inferência — struct sem estado.
///
/// Recebe a KB por referência a cada chamada, então várias requisições
/// podem diagnosticar em paralelo sobre o mesmo snapshot sem locks.
///
/// ## Uso
///
/// ```rust
/// let diagnoses = InferenceEngine::diagnose(&kb, &["A1", "B2"]);
/// for d in &diagnoses {
///     println!("{} — {}", d.disease_name, d.confidence);
/// }
/// ```
pub struct InferenceEngine;

impl InferenceEngine {
    /// Diagnostica a partir dos sintomas observados.
    ///
    /// Ids desconhecidos são ignorados. Retorna lista vazia quando a KB está
    /// vazia ou nenhuma regra dispara; a lista vazia é o sinal de
    /// "nenhum diagnóstico".
    pub fn diagnose<S: AsRef<str>>(kb: &KnowledgeBase, observed: &[S]) -> Vec<Diagnosis> {
        if kb.is_empty() {
            tracing::debug!("KB vazia, nenhum diagnóstico possível");
            return Vec::new();
        }

        let observed: HashSet<&str> = observed.iter().map(|s| s.as_ref()).collect();
        tracing::debug!(observed = observed.len(), "Iniciando diagnóstico");

        let mut results: Vec<Diagnosis> = kb
            .rules()
            .filter(|rule| rule.is_satisfied_by(&observed))
            .map(|rule| {
                let parallel = parallel_cf(kb, rule);
                let confidence = parallel.weighted(rule.cf_rule);
                tracing::debug!(
                    rule = %rule.id,
                    parallel_cf = %parallel,
                    cf_rule = %rule.cf_rule,
                    final_cf = %confidence,
                    "Regra disparada"
                );
                Diagnosis {
                    disease_name: kb.disease_name(&rule.id).into_owned(),
                    confidence,
                    rule_id: rule.id.clone(),
                }
            })
            .collect();

        if results.is_empty() {
            tracing::debug!("Nenhuma regra disparou");
        }

        // sort_by é estável: empates mantêm a ordem das regras
        results.sort_by(|a, b| b.confidence.value().total_cmp(&a.confidence.value()));
        results
    }
}

/// CF da conjunção dos sintomas exigidos pela regra (mínimo; `0.0` se vazia).
pub fn parallel_cf(kb: &KnowledgeBase, rule: &Rule) -> CertaintyFactor {
    CertaintyFactor::conjunction(rule.symptoms.iter().map(|s| kb.symptom_cf(s)))
}
