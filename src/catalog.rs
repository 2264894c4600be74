//! # Catálogo de Sintomas
//!
//! Deriva da [`KnowledgeBase`] a lista de sintomas selecionáveis que a
//! interface exibe como checkboxes.
//!
//! - Ordem lexicográfica por id (estável entre chamadas)
//! - Label no formato `"{id}: {descrição}"`
//! - KB vazia → uma única entrada sentinela com id [`UNAVAILABLE_ID`]

use serde::Serialize;

use crate::core::KnowledgeBase;

/// Id reservado da entrada sentinela. Nunca é um sintoma real.
pub const UNAVAILABLE_ID: &str = "NONE";

/// Label da entrada sentinela quando a base não pôde ser carregada.
pub const UNAVAILABLE_LABEL: &str = "Error: Gagal memuat knowledge_base.json";

/// Opção selecionável: texto exibido + id enviado ao motor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymptomChoice {
    pub label: String,
    pub id: String,
}

impl SymptomChoice {
    pub fn is_sentinel(&self) -> bool {
        self.id == UNAVAILABLE_ID
    }
}

/// Monta o catálogo de sintomas.
pub fn build_choices(kb: &KnowledgeBase) -> Vec<SymptomChoice> {
    if kb.is_empty() {
        return vec![SymptomChoice {
            label: UNAVAILABLE_LABEL.to_string(),
            id: UNAVAILABLE_ID.to_string(),
        }];
    }

    // symptom_ids() já itera em ordem de id, sem repetição
    kb.symptom_ids()
        .map(|id| SymptomChoice {
            label: format!("{id}: {}", kb.symptom_description(id)),
            id: id.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::parse_kb;

    #[test]
    fn empty_kb_yields_single_sentinel() {
        let choices = build_choices(&KnowledgeBase::new());
        assert_eq!(choices.len(), 1);
        assert!(choices[0].is_sentinel());
        assert_eq!(choices[0].label, UNAVAILABLE_LABEL);
    }

    #[test]
    fn choices_are_sorted_and_labelled() {
        let kb = parse_kb(
            r#"{ "symptoms": {
                "descriptions": { "B2": "Daun menguning", "A1": "Bercak belah ketupat" },
                "certainty_factors": { "A1": 0.9, "A10": 0.4 }
            } }"#,
        )
        .unwrap();
        let choices = build_choices(&kb);
        let ids: Vec<_> = choices.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A10", "B2"]);
        assert_eq!(choices[0].label, "A1: Bercak belah ketupat");
        assert_eq!(choices[1].label, "A10: Gejala A10 (deskripsi tidak ada)");
        assert!(choices.iter().all(|c| !c.is_sentinel()));
    }

    #[test]
    fn catalog_is_deterministic() {
        let kb = parse_kb(r#"{ "symptoms": { "certainty_factors": { "C3": 0.1, "A1": 0.2 } } }"#)
            .unwrap();
        assert_eq!(build_choices(&kb), build_choices(&kb));
    }
}
