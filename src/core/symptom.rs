//! # Symptom — Gejala Observável
//!
//! Um [`Symptom`] é um fato que o usuário pode observar na lavoura
//! (ex: "bercak berbentuk belah ketupat pada daun"). Cada sintoma carrega
//! seu próprio certainty factor, definido pelo especialista — o CF é do
//! **sintoma**, não da regra.

use std::borrow::Cow;

use super::CertaintyFactor;

/// Gejala observável com descrição opcional e CF próprio.
///
/// A descrição e o CF vêm de duas seções distintas da base
/// (`descriptions` e `certainty_factors`), que não precisam ter as mesmas
/// chaves. Um sintoma sem CF registrado fica com [`CertaintyFactor::ZERO`],
/// o que anula qualquer regra que o exija.
#[derive(Clone, Debug, PartialEq)]
pub struct Symptom {
    /// Identificador opaco (ex: `"A1"`, `"B12"`).
    pub id: String,
    /// Texto legível, quando a base define um.
    pub description: Option<String>,
    /// Confiança do especialista neste sintoma.
    pub certainty_factor: CertaintyFactor,
}

impl Symptom {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            certainty_factor: CertaintyFactor::ZERO,
        }
    }

    /// Descrição legível, ou o placeholder quando a base não define uma.
    pub fn description(&self) -> Cow<'_, str> {
        match &self.description {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Owned(placeholder_description(&self.id)),
        }
    }
}

/// Texto exibido para um sintoma sem descrição registrada.
pub fn placeholder_description(id: &str) -> String {
    format!("Gejala {id} (deskripsi tidak ada)")
}
