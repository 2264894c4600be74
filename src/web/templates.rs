//! # Templates Maud — HTML Server-Side Rendering
//!
//! Templates compilados com [`maud`](https://maud.lambda.xyz/).
//!
//! | Função | Tipo | Descrição |
//! |--------|------|-----------|
//! | [`full_page()`] | Página completa | Checkboxes de sintomas + tabela de resultado |
//! | [`results_table()`] | Fragment HTMX | Tabela "Penyakit / Hama" × "Tingkat Keyakinan" |
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────── header ─────────────────────┐
//! │ 🌾 Sistem Pakar Diagnosis Hama & Penyakit   │
//! ├──────────────────┬──────────────────────────┤
//! │ ☐ A1: ...        │  Hasil Diagnosis         │
//! │ ☐ A2: ...        │  ┌────────────┬────────┐ │
//! │ ...              │  │ Penyakit   │ 48.00 %│ │
//! │ [Diagnosis] [x]  │  └────────────┴────────┘ │
//! │ Contoh: ...      │                          │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! Sem JavaScript o formulário faz POST normal e recebe a página inteira;
//! com HTMX só a tabela é trocada.

use maud::{html, Markup, DOCTYPE};

use super::state::Snapshot;
use crate::core::CertaintyFactor;
use crate::inference::Diagnosis;

/// Conjuntos de sintomas oferecidos como atalho na página.
pub const EXAMPLE_SELECTIONS: &[&[&str]] = &[
    &["A1", "B2", "B8", "B11", "B17"],
    &["A6", "B1", "B8", "B12"],
    &["A10", "B10"],
];

pub const DISEASE_COLUMN: &str = "Penyakit / Hama";
pub const CONFIDENCE_COLUMN: &str = "Tingkat Keyakinan";
pub const NO_MATCH_LABEL: &str = "Tidak ada diagnosis yang cocok";

/// Confiança como porcentagem com duas casas: `0.48` → `"48.00 %"`.
pub fn format_confidence(cf: CertaintyFactor) -> String {
    format!("{:.2} %", cf.value() * 100.0)
}

/// Página principal.
///
/// `selected` marca os checkboxes já escolhidos; `results` é `None`
/// enquanto nenhum diagnóstico foi pedido.
pub fn full_page(snapshot: &Snapshot, selected: &[String], results: Option<&[Diagnosis]>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="id" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Sistem Pakar Diagnosis Hama dan Penyakit Padi" }
                link rel="stylesheet" href="/assets/style.css";
                script src="/assets/htmx.min.js" {}
            }
            body {
                main class="group" {
                    header {
                        h1 { "🌾 Sistem Pakar Diagnosis Hama dan Penyakit Padi" }
                        p { "Aplikasi ini menggunakan metode Forward Chaining dan Certainty Factor." }
                        @if !snapshot.status.is_loaded() {
                            p class="kb-warning" {
                                "Basis pengetahuan tidak dapat dimuat. Periksa log server."
                            }
                        }
                    }

                    div class="row" {
                        // Coluna de entrada
                        section class="column input-column" {
                            form id="diagnose-form" method="post" action="/diagnose"
                                hx-post="/diagnose" hx-target="#results" hx-swap="innerHTML" {
                                fieldset {
                                    legend { "Pilih Gejala yang Diamati" }
                                    p class="info" { "Pilih satu atau lebih gejala yang sesuai." }
                                    @for choice in &snapshot.choices {
                                        label class="symptom" {
                                            input type="checkbox" name="symptoms" value=(choice.id)
                                                disabled[choice.is_sentinel()]
                                                checked[selected.contains(&choice.id)];
                                            " " (choice.label)
                                        }
                                    }
                                }
                                button type="submit" class="primary" { "Diagnosis Sekarang" }
                                a href="/" class="button stop" { "Bersihkan Pilihan" }
                            }

                            div class="examples" {
                                h3 { "Contoh" }
                                @for example in EXAMPLE_SELECTIONS {
                                    form method="post" action="/diagnose"
                                        hx-post="/diagnose" hx-target="#results" hx-swap="innerHTML" {
                                        @for id in example.iter() {
                                            input type="hidden" name="symptoms" value=(id);
                                        }
                                        button type="submit" class="example" { (example.join(", ")) }
                                    }
                                }
                            }
                        }

                        // Coluna de saída
                        section class="column output-column" {
                            h2 { "Hasil Diagnosis" }
                            div id="results" {
                                (results_table(results))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Tabela de resultados.
///
/// - `None` → só o cabeçalho (nada selecionado)
/// - `Some([])` → linha "Tidak ada diagnosis yang cocok / 0.00 %"
/// - `Some(lista)` → uma linha por diagnóstico, na ordem recebida
pub fn results_table(results: Option<&[Diagnosis]>) -> Markup {
    html! {
        table class="diagnosis" {
            thead {
                tr {
                    th { (DISEASE_COLUMN) }
                    th { (CONFIDENCE_COLUMN) }
                }
            }
            tbody {
                @match results {
                    None => {}
                    Some([]) => {
                        tr class="no-match" {
                            td { (NO_MATCH_LABEL) }
                            td { (format_confidence(CertaintyFactor::ZERO)) }
                        }
                    }
                    Some(diagnoses) => {
                        @for d in diagnoses.iter() {
                            tr {
                                td { (d.disease_name) }
                                td { (format_confidence(d.confidence)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_formatted_as_percentage() {
        assert_eq!(format_confidence(CertaintyFactor::new(0.48)), "48.00 %");
        assert_eq!(format_confidence(CertaintyFactor::ZERO), "0.00 %");
        assert_eq!(format_confidence(CertaintyFactor::ONE), "100.00 %");
    }

    #[test]
    fn empty_results_render_no_match_row() {
        let html = results_table(Some(&[])).into_string();
        assert!(html.contains(NO_MATCH_LABEL));
        assert!(html.contains("0.00 %"));
    }

    #[test]
    fn no_selection_renders_header_only() {
        let html = results_table(None).into_string();
        assert!(html.contains(DISEASE_COLUMN));
        assert!(!html.contains(NO_MATCH_LABEL));
    }

    #[test]
    fn rows_follow_result_order() {
        let results = vec![
            Diagnosis {
                disease_name: "Tungro".into(),
                confidence: CertaintyFactor::new(0.7),
                rule_id: "R2".into(),
            },
            Diagnosis {
                disease_name: "Blast".into(),
                confidence: CertaintyFactor::new(0.45),
                rule_id: "R1".into(),
            },
        ];
        let html = results_table(Some(&results)).into_string();
        let tungro = html.find("Tungro").unwrap();
        let blast = html.find("Blast").unwrap();
        assert!(tungro < blast);
        assert!(html.contains("70.00 %"));
        assert!(html.contains("45.00 %"));
    }
}
