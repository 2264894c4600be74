//! # CertaintyFactor — Grau de Certeza do Especialista
//!
//! Um **certainty factor** (CF) é um número em `[0.0, 1.0]` que expressa
//! o quanto o especialista acredita numa evidência ou numa regra. Não é
//! probabilidade: dois CFs não precisam somar 1, e a combinação segue as
//! regras clássicas de sistemas especialistas.
//!
//! ## Regras de Combinação
//!
//! | Regra | Fórmula | Uso |
//! |-------|---------|-----|
//! | **Conjunção (AND)** | `min(cf₁, cf₂, …)` | Sintomas exigidos por uma regra |
//! | **Peso da regra** | `cf_evidência × cf_regra` | Confiança final do diagnóstico |
//!
//! A conjunção vazia vale `0.0` — sem evidência não há confiança.
//!
//! ## Exemplo
//!
//! ```text
//! cf(A1) = 0.9, cf(B2) = 0.6, cf_regra = 0.8
//! paralelo = min(0.9, 0.6) = 0.6
//! final    = 0.6 × 0.8     = 0.48
//! ```

use std::fmt;

use serde::Serialize;

/// Grau de certeza em `[0.0, 1.0]`.
///
/// O construtor sempre normaliza o valor: negativos viram `0.0`, valores
/// acima de `1.0` viram `1.0` e `NaN` vira `0.0`. Assim a ordenação por
/// confiança nunca encontra um valor incomparável.
///
/// Serializa como um `f64` simples.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f64")]
pub struct CertaintyFactor(f64);

impl CertaintyFactor {
    /// Certeza nula — default para campos ausentes.
    pub const ZERO: CertaintyFactor = CertaintyFactor(0.0);

    /// Certeza total.
    pub const ONE: CertaintyFactor = CertaintyFactor(1.0);

    /// Cria um CF a partir de um valor bruto, normalizando para `[0, 1]`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Retorna `true` se `value` já está dentro do intervalo válido.
    ///
    /// Usado pelo carregador para avisar quando um valor da base
    /// precisou ser corrigido.
    pub fn is_in_range(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    /// Valor numérico do CF.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Combinação paralela (AND): o mínimo dos CFs.
    ///
    /// A confiança numa conjunção é limitada pelo elo mais fraco.
    /// Retorna [`CertaintyFactor::ZERO`] quando não há nenhum CF.
    pub fn conjunction<I>(factors: I) -> Self
    where
        I: IntoIterator<Item = CertaintyFactor>,
    {
        factors
            .into_iter()
            .map(|cf| cf.0)
            .reduce(f64::min)
            .map(Self::new)
            .unwrap_or(Self::ZERO)
    }

    /// Aplica o peso de uma regra: `self × weight`.
    pub fn weighted(self, weight: CertaintyFactor) -> Self {
        Self::new(self.0 * weight.0)
    }
}

impl From<CertaintyFactor> for f64 {
    fn from(cf: CertaintyFactor) -> Self {
        cf.0
    }
}

impl fmt::Display for CertaintyFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
