//! # KnowledgeBase — Base de Regras do Especialista
//!
//! A [`KnowledgeBase`] guarda as doenças, os sintomas (com seus CFs) e as
//! regras de produção. É montada uma única vez pelo carregador
//! ([`persistence::load_kb`](crate::persistence::load_kb)) e depois só é
//! lida — não existe API de mutação.
//!
//! ## Armazenamento
//!
//! - **Doenças**: `BTreeMap<String, Disease>` — id → nome de exibição
//! - **Regras**: `BTreeMap<String, Rule>` — id → antecedente + peso
//! - **Sintomas**: `BTreeMap<String, Symptom>` — união das chaves de
//!   `descriptions` e `certainty_factors`
//!
//! `BTreeMap` mantém as chaves ordenadas, então a iteração é
//! determinística entre execuções.
//!
//! ## Consultas Tolerantes
//!
//! Toda consulta por id aceita ids desconhecidos e devolve um default:
//!
//! | Consulta | Id ausente |
//! |----------|------------|
//! | [`disease_name()`](KnowledgeBase::disease_name) | `"Penyakit {id}"` |
//! | [`symptom_description()`](KnowledgeBase::symptom_description) | `"Gejala {id} (deskripsi tidak ada)"` |
//! | [`symptom_cf()`](KnowledgeBase::symptom_cf) | `0.0` |
//! | [`rule()`](KnowledgeBase::rule) | `None` |

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::rule::placeholder_disease_name;
use super::symptom::placeholder_description;
use super::{CertaintyFactor, Disease, Rule, Symptom};

/// Base de conhecimento imutável.
///
/// A KB vazia ([`KnowledgeBase::new()`]) é também o estado sentinela de
/// "falha ao carregar": todas as operações seguintes degradam para
/// resultados vazios em vez de falhar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnowledgeBase {
    diseases: BTreeMap<String, Disease>,
    rules: BTreeMap<String, Rule>,
    symptoms: BTreeMap<String, Symptom>,
}

impl KnowledgeBase {
    /// KB vazia — o mesmo valor usado quando o carregamento falha.
    pub fn new() -> Self {
        Self::default()
    }

    /// Monta a KB a partir de entidades já validadas.
    ///
    /// Ids repetidos: a última ocorrência vence.
    pub fn from_entities(
        diseases: impl IntoIterator<Item = Disease>,
        rules: impl IntoIterator<Item = Rule>,
        symptoms: impl IntoIterator<Item = Symptom>,
    ) -> Self {
        Self {
            diseases: diseases.into_iter().map(|d| (d.id.clone(), d)).collect(),
            rules: rules.into_iter().map(|r| (r.id.clone(), r)).collect(),
            symptoms: symptoms.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// `true` quando a KB não tem nenhuma doença, regra ou sintoma.
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty() && self.rules.is_empty() && self.symptoms.is_empty()
    }

    /// Nome de exibição da doença, ou `"Penyakit {id}"` se ausente.
    pub fn disease_name(&self, id: &str) -> Cow<'_, str> {
        match self.diseases.get(id) {
            Some(disease) => Cow::Borrowed(disease.name.as_str()),
            None => Cow::Owned(placeholder_disease_name(id)),
        }
    }

    /// Regra por id. O motor percorre [`rules()`](Self::rules); a consulta
    /// direta hoje só é usada pelos testes.
    #[allow(dead_code)]
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// Todas as regras, em ordem de id.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Descrição do sintoma, ou placeholder se a base não registra nenhuma.
    pub fn symptom_description(&self, id: &str) -> Cow<'_, str> {
        match self.symptoms.get(id) {
            Some(symptom) => symptom.description(),
            None => Cow::Owned(placeholder_description(id)),
        }
    }

    /// CF do sintoma; `0.0` para ids desconhecidos ou sem CF registrado.
    pub fn symptom_cf(&self, id: &str) -> CertaintyFactor {
        self.symptoms
            .get(id)
            .map(|s| s.certainty_factor)
            .unwrap_or(CertaintyFactor::ZERO)
    }

    /// União dos ids de sintomas (descrições ∪ CFs), ordenada e sem repetição.
    pub fn symptom_ids(&self) -> impl Iterator<Item = &str> {
        self.symptoms.keys().map(String::as_str)
    }

    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }
}
