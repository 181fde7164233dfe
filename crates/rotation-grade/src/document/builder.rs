use super::model::{
    Block, Cell, ColumnSpec, Document, LogoImage, Paragraph, RowKind, Table, TextStyle, VAlign,
};
use crate::evaluation::domain::{format_optional, format_percent, NOT_APPLICABLE_LABEL};
use crate::evaluation::{Evaluation, EvaluationMetadata, Observations};
use crate::render::inches;
use chrono::NaiveDate;

pub const ITEM_COLUMN_WIDTH: f32 = 432.0;
pub const SCORE_COLUMN_WIDTH: f32 = 108.0;
pub const OBSERVATION_ROW_HEIGHT: f32 = 32.4;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_FILE_STEM: &str = "estudiante";

/// Everything printed on one report.
#[derive(Debug, Clone)]
pub struct DocumentInput<'a> {
    pub metadata: &'a EvaluationMetadata,
    pub evaluation: &'a Evaluation,
    pub observations: &'a Observations,
    pub logo: Option<LogoImage>,
}

/// Lays out the form in its fixed order. Sections and items keep the order
/// the instrument declares them in.
pub fn build_document(input: &DocumentInput<'_>, today: NaiveDate) -> Document {
    let evaluation = input.evaluation;
    let instrument = evaluation.instrument;
    let mut doc = Document::default();

    if let Some(logo) = &input.logo {
        doc.push(Block::Logo(logo.clone()));
        doc.push(Block::Spacer(6.0));
    }

    doc.push(Block::Paragraph(Paragraph::new(
        format!("{}\n{}", instrument.institution, instrument.faculty),
        TextStyle::HEADER,
    )));
    doc.push(Block::Paragraph(Paragraph::new(
        instrument.title,
        TextStyle::HEADER.bold(),
    )));
    doc.push(Block::Spacer(6.0));
    doc.push(Block::Paragraph(Paragraph::new(
        instrument.instructions,
        TextStyle::SMALL,
    )));
    doc.push(Block::Spacer(6.0));

    doc.push(Block::Table(metadata_table(input.metadata)));
    doc.push(Block::Spacer(8.0));

    for section in &evaluation.sections {
        doc.push(Block::Paragraph(Paragraph::new(
            section.section.title(),
            TextStyle::SECTION,
        )));

        let mut table = Table::new(vec![
            ColumnSpec::text(ITEM_COLUMN_WIDTH),
            ColumnSpec::numeric(SCORE_COLUMN_WIDTH),
        ])
        .row(
            RowKind::Header,
            vec![Cell::new("Parámetro"), Cell::new("Calificación (0–5)")],
        );
        for item in &section.items {
            table = table.row(
                RowKind::Body,
                vec![Cell::new(item.label), Cell::new(item.score.to_string())],
            );
        }
        table = table.row(
            RowKind::Footer,
            vec![
                Cell::new("PROMEDIO"),
                Cell::new(format_optional(section.average)),
            ],
        );
        doc.push(Block::Table(table));
        doc.push(Block::Spacer(8.0));
    }

    doc.push(Block::Paragraph(Paragraph::new(
        final_banner(evaluation),
        TextStyle::SECTION.bold(),
    )));
    doc.push(Block::Paragraph(Paragraph::new(
        legend(evaluation),
        TextStyle::SMALL,
    )));
    doc.push(Block::Spacer(10.0));

    doc.push(Block::Paragraph(Paragraph::new(
        "OBSERVACIONES:",
        TextStyle::SECTION,
    )));
    let mut observations = Table::new(vec![ColumnSpec::text(
        ITEM_COLUMN_WIDTH + SCORE_COLUMN_WIDTH,
    )])
    .min_row_height(OBSERVATION_ROW_HEIGHT);
    for line in input.observations.lines() {
        observations = observations.row(RowKind::Body, vec![Cell::new(line.as_str())]);
    }
    doc.push(Block::Table(observations));
    doc.push(Block::Spacer(12.0));

    doc.push(Block::Table(signature_table(input.metadata, today)));
    doc
}

pub fn final_banner(evaluation: &Evaluation) -> String {
    let result = &evaluation.final_result;
    format!(
        "NOTA FINAL: {} – Aprobado: {}",
        format_optional(result.final_score),
        result.pass_label()
    )
}

/// States the pass mark, the N/A rule, and the weights actually applied.
pub fn legend(evaluation: &Evaluation) -> String {
    let weights: Vec<String> = evaluation
        .sections
        .iter()
        .filter_map(|section| {
            evaluation
                .final_result
                .effective_weight(section)
                .map(|weight| {
                    format!("{} {}", section.section.name, format_percent(weight))
                })
        })
        .collect();
    let weights = if weights.is_empty() {
        NOT_APPLICABLE_LABEL.to_string()
    } else {
        weights.join(", ")
    };

    format!(
        "Nota: la nota mínima aprobatoria es {}. Ítems marcados como N/A no computan. \
Si una sección queda completamente N/A, su peso se redistribuye proporcionalmente \
entre las secciones activas (suma total 100%). Pesos aplicados: {}.",
        evaluation.instrument.pass_threshold, weights
    )
}

fn metadata_table(metadata: &EvaluationMetadata) -> Table {
    Table::new(vec![
        ColumnSpec::text(inches(1.6)),
        ColumnSpec::text(inches(3.0)),
        ColumnSpec::text(inches(1.0)),
        ColumnSpec::text(inches(1.9)),
    ])
    .valign(VAlign::Middle)
    .row(
        RowKind::Body,
        vec![
            Cell::new("NOMBRES Y APELLIDOS:"),
            Cell::spanning(metadata.student_name.as_str(), 3),
        ],
    )
    .row(
        RowKind::Body,
        vec![
            Cell::new("ROTACIÓN:"),
            Cell::new(metadata.rotation.as_str()),
            Cell::new("PERIODO:"),
            Cell::new(metadata.period.as_str()),
        ],
    )
    .row(
        RowKind::Body,
        vec![
            Cell::new("HOSPITAL:"),
            Cell::new(metadata.hospital.as_str()),
            Cell::new("PROGRAMA:"),
            Cell::new(metadata.program.as_str()),
        ],
    )
}

fn signature_table(metadata: &EvaluationMetadata, today: NaiveDate) -> Table {
    Table::new(vec![
        ColumnSpec::text(inches(2.5)),
        ColumnSpec::text(inches(2.4)),
        ColumnSpec::text(inches(0.8)),
        ColumnSpec::text(inches(1.8)),
    ])
    .valign(VAlign::Middle)
    .row(
        RowKind::Body,
        vec![
            Cell::new("NOMBRE DEL CALIFICADOR(ES):"),
            Cell::spanning(metadata.evaluator.as_str(), 3),
        ],
    )
    .row(
        RowKind::Body,
        vec![
            Cell::new("FIRMA:"),
            Cell::new(metadata.signature.as_str()),
            Cell::new("FECHA:"),
            Cell::new(report_date(metadata, today)),
        ],
    )
}

/// The submitted date verbatim, or `today` when it is absent or blank.
pub fn report_date(metadata: &EvaluationMetadata, today: NaiveDate) -> String {
    metadata
        .date
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| today.format(DATE_FORMAT).to_string())
}

/// `Calificacion_<student>.pdf` with spaces and path separators replaced.
pub fn suggested_file_name(student_name: &str) -> String {
    let name = student_name.trim();
    let stem = if name.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        name.replace([' ', '/', '\\'], "_")
    };
    format!("Calificacion_{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{aggregate, Instrument, Score, ScoreSheet};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
    }

    fn evaluation_with(score: Score) -> Evaluation {
        aggregate(&ScoreSheet::uniform(Instrument::rosario(), score))
    }

    fn build(evaluation: &Evaluation, metadata: &EvaluationMetadata) -> Document {
        let observations = Observations::from_lines(["Puntual"]).expect("observations");
        build_document(
            &DocumentInput {
                metadata,
                evaluation,
                observations: &observations,
                logo: None,
            },
            today(),
        )
    }

    fn has_paragraph(doc: &Document, text: &str) -> bool {
        doc.paragraphs().any(|paragraph| paragraph.text == text)
    }

    #[test]
    fn every_table_fills_the_usable_width() {
        let evaluation = evaluation_with(Score::graded(4.0));
        let doc = build(&evaluation, &EvaluationMetadata::default());
        for table in doc.tables() {
            assert!((table.width() - 540.0).abs() < 1e-3, "{}", table.width());
        }
    }

    #[test]
    fn section_tables_follow_instrument_order() {
        let evaluation = evaluation_with(Score::graded(4.0));
        let doc = build(&evaluation, &EvaluationMetadata::default());
        let tables: Vec<&Table> = doc.tables().collect();
        // metadata, three sections, observations, signature
        assert_eq!(tables.len(), 6);

        let second = tables[2];
        assert_eq!(second.rows.len(), 2 + 9);
        assert_eq!(second.rows[0].kind, RowKind::Header);
        assert_eq!(
            second.rows[1].cells[0].text,
            "2.1 Elaboración de historias clínicas"
        );
        assert_eq!(second.rows[1].cells[1].text, "4.00");
        let footer = second.rows.last().expect("footer");
        assert_eq!(footer.kind, RowKind::Footer);
        assert_eq!(footer.cells[0].text, "PROMEDIO");
        assert_eq!(footer.cells[1].text, "4.00");
    }

    #[test]
    fn banner_and_legend_report_the_result() {
        let evaluation = evaluation_with(Score::graded(4.0));
        let doc = build(&evaluation, &EvaluationMetadata::default());
        assert!(has_paragraph(&doc, "NOTA FINAL: 4.00 – Aprobado: Sí"));
        let legend = legend(&evaluation);
        assert!(legend.contains("3.00"));
        assert!(legend.contains("CONOCIMIENTOS 35.00%"));
        assert!(legend.contains("ACTITUDES Y VALORES 30.00%"));
    }

    #[test]
    fn all_not_applicable_prints_na_everywhere() {
        let evaluation = evaluation_with(Score::NotApplicable);
        let doc = build(&evaluation, &EvaluationMetadata::default());
        assert!(has_paragraph(&doc, "NOTA FINAL: N/A – Aprobado: N/A"));
        assert!(legend(&evaluation).ends_with("Pesos aplicados: N/A."));
        for table in doc.tables().skip(1).take(3) {
            assert!(table.rows[1..]
                .iter()
                .all(|row| row.cells[1].text == "N/A"));
        }
    }

    #[test]
    fn observations_always_have_three_rows() {
        let evaluation = evaluation_with(Score::graded(3.0));
        let doc = build(&evaluation, &EvaluationMetadata::default());
        let observations = doc.tables().nth(4).expect("observations table");
        assert_eq!(observations.rows.len(), 3);
        assert_eq!(observations.rows[0].cells[0].text, "Puntual");
        assert_eq!(observations.rows[2].cells[0].text, "");
        assert_eq!(observations.min_row_height, OBSERVATION_ROW_HEIGHT);
    }

    #[test]
    fn signature_date_defaults_to_today() {
        let evaluation = evaluation_with(Score::graded(3.0));
        let metadata = EvaluationMetadata {
            evaluator: "Dr. Gómez".into(),
            date: Some("  ".into()),
            ..EvaluationMetadata::default()
        };
        let doc = build(&evaluation, &metadata);
        let signature = doc.tables().last().expect("signature table");
        assert_eq!(signature.rows[0].cells[1].text, "Dr. Gómez");
        assert_eq!(signature.rows[1].cells[3].text, "2024-03-15");

        let dated = EvaluationMetadata {
            date: Some("12 de marzo".into()),
            ..metadata
        };
        assert_eq!(report_date(&dated, today()), "12 de marzo");
    }

    #[test]
    fn logo_leads_the_document_when_present() {
        let evaluation = evaluation_with(Score::graded(3.0));
        let metadata = EvaluationMetadata::default();
        let observations = Observations::default();
        let logo = LogoImage {
            width_px: 1,
            height_px: 1,
            rgb: vec![0, 0, 0],
        };
        let doc = build_document(
            &DocumentInput {
                metadata: &metadata,
                evaluation: &evaluation,
                observations: &observations,
                logo: Some(logo),
            },
            today(),
        );
        assert!(matches!(doc.blocks[0], Block::Logo(_)));
        assert!(!build(&evaluation, &metadata).has_logo());
    }

    #[test]
    fn file_name_uses_underscores_and_a_fallback() {
        assert_eq!(
            suggested_file_name("Ana María Pérez"),
            "Calificacion_Ana_María_Pérez.pdf"
        );
        assert_eq!(suggested_file_name("  "), "Calificacion_estudiante.pdf");
        assert_eq!(suggested_file_name("a/b"), "Calificacion_a_b.pdf");
    }
}
