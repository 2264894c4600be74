//! # Configuração
//!
//! Valores fixos com override por variável de ambiente, lidos uma vez em
//! `main()`:
//!
//! | Variável | Default | Uso |
//! |----------|---------|-----|
//! | `PADI_KB_PATH` | `data/knowledge_base.json` | Arquivo da base de conhecimento |
//! | `PADI_BIND_ADDR` | `0.0.0.0:3000` | Endereço do servidor HTTP |
//! | `RUST_LOG` | `info` | Filtro do tracing (lido pelo `EnvFilter`) |

use std::path::PathBuf;

use crate::persistence::DEFAULT_KB_PATH;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub kb_path: PathBuf,
    pub bind_addr: String,
}

impl Config {
    /// Lê a configuração das variáveis de ambiente do processo.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de consulta.
    ///
    /// Valores vazios contam como ausentes.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            kb_path: get("PADI_KB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KB_PATH)),
            bind_addr: get("PADI_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.kb_path, PathBuf::from("data/knowledge_base.json"));
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn env_overrides_defaults() {
        let vars = HashMap::from([
            ("PADI_KB_PATH", "/srv/kb.json"),
            ("PADI_BIND_ADDR", "127.0.0.1:8080"),
        ]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.kb_path, PathBuf::from("/srv/kb.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }
}
