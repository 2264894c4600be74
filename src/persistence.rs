//! # Persistência — Carregamento da Base de Conhecimento
//!
//! Lê a base de regras do especialista de um arquivo JSON
//! (`data/knowledge_base.json` por padrão) e a converte em uma
//! [`KnowledgeBase`] fortemente tipada.
//!
//! ## Formato do Arquivo
//!
//! ```json
//! {
//!   "diseases": { "R1": "Blas" },
//!   "rules":    { "R1": { "symptoms": ["A1", "B2"], "cf_rule": 0.8 } },
//!   "symptoms": {
//!     "descriptions":      { "A1": "Bercak belah ketupat" },
//!     "certainty_factors": { "A1": 0.9, "B2": 0.6 }
//!   }
//! }
//! ```
//!
//! Qualquer chave pode faltar — vira mapa vazio ou default (`0.0` para CFs,
//! placeholder para textos). Valores `null` contam como ausentes, em
//! qualquer nível: uma regra `null` é ignorada, uma seção `null` fica vazia.
//! CFs não numéricos viram `0.0` e CFs fora de `[0, 1]` são corrigidos;
//! os dois casos geram um `warn`.
//!
//! ## Falhas
//!
//! | Causa | Variante | Recuperação |
//! |-------|----------|-------------|
//! | Arquivo não existe | [`LoadError::NotFound`] | KB vazia |
//! | JSON inválido / raiz não-objeto / seção com tipo errado | [`LoadError::Malformed`] | KB vazia |
//! | Documento válido sem nada dentro | — ([`LoadStatus::Empty`]) | KB vazia |
//! | Outro erro de I/O | [`LoadError::Io`] | KB vazia |
//!
//! [`load_or_empty()`] aplica a recuperação e registra a causa no log.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::{CertaintyFactor, Disease, KnowledgeBase, Rule, Symptom};

/// Caminho padrão da base de conhecimento (relativo ao diretório de execução).
pub const DEFAULT_KB_PATH: &str = "data/knowledge_base.json";

/// Falha ao carregar a base de conhecimento.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("arquivo da base de conhecimento não encontrado: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("falha ao ler {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON da base de conhecimento malformado em {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Classificação da falha, sem os detalhes.
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadError::NotFound { .. } => LoadStatus::NotFound,
            LoadError::Io { .. } => LoadStatus::Unreadable,
            LoadError::Malformed { .. } => LoadStatus::Malformed,
        }
    }
}

/// Estado do último carregamento — exposto em `/status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded,
    /// O arquivo foi lido, mas não trouxe doenças, regras nem sintomas.
    Empty,
    NotFound,
    Unreadable,
    Malformed,
}

impl LoadStatus {
    /// `true` só quando há uma base utilizável.
    pub fn is_loaded(self) -> bool {
        self == LoadStatus::Loaded
    }
}

/// Resultado de [`load_or_empty()`]: a KB (talvez vazia) e como ela foi obtida.
#[derive(Debug)]
pub struct LoadOutcome {
    pub kb: KnowledgeBase,
    pub status: LoadStatus,
}

// ─── Esquema do arquivo JSON ─────────────────────────────────────
//
// Tudo abaixo da raiz é `Option`: `null` e chave ausente são a mesma
// coisa. CFs ficam como `Value` até `checked_cf`, que decide o default.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KnowledgeBaseSource {
    diseases: Option<BTreeMap<String, Option<String>>>,
    rules: Option<BTreeMap<String, Option<RuleSource>>>,
    symptoms: Option<SymptomSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleSource {
    symptoms: Option<Vec<String>>,
    cf_rule: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SymptomSection {
    descriptions: Option<BTreeMap<String, Option<String>>>,
    certainty_factors: Option<BTreeMap<String, Option<Value>>>,
}

impl KnowledgeBaseSource {
    fn into_knowledge_base(self) -> KnowledgeBase {
        let diseases = self
            .diseases
            .unwrap_or_default()
            .into_iter()
            .map(|(id, name)| {
                let name =
                    name.unwrap_or_else(|| crate::core::rule::placeholder_disease_name(&id));
                Disease { id, name }
            });

        let rules = self
            .rules
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, rule)| {
                let Some(rule) = rule else {
                    tracing::warn!(id = %id, "Regra nula ignorada");
                    return None;
                };
                let cf_rule = checked_cf("cf_rule", &id, rule.cf_rule);
                Some(Rule::new(id, rule.symptoms.unwrap_or_default(), cf_rule))
            });

        // Sintomas = união das duas seções, que não precisam coincidir.
        let SymptomSection {
            descriptions,
            certainty_factors,
        } = self.symptoms.unwrap_or_default();
        let mut symptoms: BTreeMap<String, Symptom> = BTreeMap::new();
        for (id, description) in descriptions.unwrap_or_default() {
            let entry = symptoms
                .entry(id.clone())
                .or_insert_with(|| Symptom::new(id));
            entry.description = description;
        }
        for (id, cf) in certainty_factors.unwrap_or_default() {
            let certainty_factor = checked_cf("certainty_factor", &id, cf);
            let entry = symptoms
                .entry(id.clone())
                .or_insert_with(|| Symptom::new(id));
            entry.certainty_factor = certainty_factor;
        }

        KnowledgeBase::from_entities(diseases, rules, symptoms.into_values())
    }
}

/// Converte um CF bruto, avisando quando o valor precisou ser corrigido.
///
/// Ausente → `0.0`. Não numérico → `0.0` com `warn`. Fora de `[0, 1]` →
/// ajustado com `warn`.
fn checked_cf(key: &str, id: &str, raw: Option<Value>) -> CertaintyFactor {
    let Some(raw) = raw else {
        return CertaintyFactor::ZERO;
    };
    let Some(value) = raw.as_f64() else {
        tracing::warn!(key, id, raw = %raw, "CF não numérico, usando 0.0");
        return CertaintyFactor::ZERO;
    };
    if !CertaintyFactor::is_in_range(value) {
        tracing::warn!(key, id, value, "CF fora de [0, 1], valor ajustado");
    }
    CertaintyFactor::new(value)
}

// ─── API pública ─────────────────────────────────────────────────

/// Converte um documento JSON em [`KnowledgeBase`].
///
/// # Erros
///
/// Retorna erro se o texto não for JSON válido, se a raiz não for um
/// objeto ou se uma seção tiver o tipo de contêiner errado (ex:
/// `"rules": []`). Valores nulos ou CFs não numéricos não são erro.
pub fn parse_kb(json: &str) -> Result<KnowledgeBase, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom(
            "a raiz da base de conhecimento deve ser um objeto JSON",
        ));
    }
    let source: KnowledgeBaseSource = serde_json::from_value(value)?;
    Ok(source.into_knowledge_base())
}

/// Carrega a base de conhecimento de `path`.
///
/// # Erros
///
/// - [`LoadError::NotFound`] se o arquivo não existir
/// - [`LoadError::Io`] para outras falhas de leitura
/// - [`LoadError::Malformed`] se o conteúdo não seguir o formato esperado
pub fn load_kb(path: &Path) -> Result<KnowledgeBase, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_kb(&json).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Carrega a KB ou, em caso de falha, devolve a KB vazia.
///
/// Nunca falha: a causa fica registrada no log e em [`LoadOutcome::status`].
pub fn load_or_empty(path: &Path) -> LoadOutcome {
    match load_kb(path) {
        Ok(kb) if kb.is_empty() => {
            tracing::warn!(path = %path.display(), "Base de conhecimento vazia");
            LoadOutcome {
                kb,
                status: LoadStatus::Empty,
            }
        }
        Ok(kb) => {
            tracing::info!(
                path = %path.display(),
                diseases = kb.disease_count(),
                rules = kb.rule_count(),
                symptoms = kb.symptom_count(),
                "Base de conhecimento carregada"
            );
            LoadOutcome {
                kb,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            match &e {
                LoadError::NotFound { .. } => {
                    tracing::error!(error = %e, "Arquivo não encontrado, iniciando com KB vazia");
                }
                LoadError::Io { source, .. } => {
                    tracing::error!(error = %e, cause = %source, "Falha de leitura, iniciando com KB vazia");
                }
                LoadError::Malformed { source, .. } => {
                    tracing::error!(error = %e, cause = %source, "JSON inválido, iniciando com KB vazia");
                }
            }
            LoadOutcome {
                kb: KnowledgeBase::new(),
                status: e.status(),
            }
        }
    }
}
