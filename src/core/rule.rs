//! # Disease e Rule — Conclusões e Regras de Produção
//!
//! Uma [`Rule`] é uma regra de produção do tipo
//!
//! ```text
//! SE A1 E B2 E B8 ENTÃO doença R1   (cf_regra = 0.8)
//! ```
//!
//! O antecedente é uma **conjunção pura** de sintomas: sem OU, sem negação.
//! O consequente é implícito — o `id` da regra é também a chave da doença
//! em [`KnowledgeBase`](super::KnowledgeBase). Por isso cada doença tem
//! no máximo uma regra.

use std::collections::HashSet;

use super::CertaintyFactor;

/// Doença ou praga que pode ser diagnosticada.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disease {
    pub id: String,
    /// Nome de exibição (ex: "Blas (Pyricularia oryzae)").
    pub name: String,
}

/// Placeholder para uma doença sem nome registrado.
pub fn placeholder_disease_name(id: &str) -> String {
    format!("Penyakit {id}")
}

/// Regra de produção: conjunção de sintomas exigidos + peso da regra.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// Identificador da regra — também identifica a doença concluída.
    pub id: String,
    /// Sintomas exigidos, na ordem em que a base os declara.
    pub symptoms: Vec<String>,
    /// Confiança do autor na própria regra.
    pub cf_rule: CertaintyFactor,
}

impl Rule {
    pub fn new(id: impl Into<String>, symptoms: Vec<String>, cf_rule: CertaintyFactor) -> Self {
        Self {
            id: id.into(),
            symptoms,
            cf_rule,
        }
    }

    /// A regra dispara se **todos** os sintomas exigidos foram observados.
    ///
    /// Sintomas observados que a regra não menciona são ignorados.
    /// Uma regra sem sintomas dispara sempre (subconjunto vazio).
    pub fn is_satisfied_by(&self, observed: &HashSet<&str>) -> bool {
        self.symptoms.iter().all(|s| observed.contains(s.as_str()))
    }
}
