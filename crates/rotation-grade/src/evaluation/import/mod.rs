mod parser;

pub use parser::write_csv_template;

use crate::evaluation::domain::Score;
use crate::evaluation::form::{EvaluationInput, EvaluationMetadata, Observations};
use crate::evaluation::instrument::Instrument;
use crate::evaluation::sheet::{ScoreSheet, ScoreSheetError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Builds score sheets from exported CSV files.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_csv_path<P: AsRef<Path>>(
        instrument: &'static Instrument,
        path: P,
    ) -> Result<ScoreSheet, ScoreSheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(instrument, file)
    }

    pub fn from_csv_reader<R: Read>(
        instrument: &'static Instrument,
        reader: R,
    ) -> Result<ScoreSheet, ScoreSheetError> {
        let records = parser::parse_records(reader)?;
        ScoreSheet::from_entries(
            instrument,
            records.into_iter().map(|record| (record.label, record.score)),
        )
    }
}

/// JSON shape of a submitted form.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationSubmission {
    #[serde(default)]
    pub metadata: EvaluationMetadata,
    pub scores: BTreeMap<String, Score>,
    #[serde(default)]
    pub observations: Vec<String>,
}

impl EvaluationSubmission {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ScoreSheetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoreSheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn into_input(
        self,
        instrument: &'static Instrument,
    ) -> Result<EvaluationInput, ScoreSheetError> {
        let sheet = ScoreSheet::from_entries(instrument, self.scores)?;
        let observations = Observations::from_lines(self.observations)?;
        Ok(EvaluationInput {
            metadata: self.metadata,
            sheet,
            observations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::Grade;
    use std::io::Cursor;

    fn csv_with(overrides: &[(&str, &str)]) -> String {
        let mut csv = String::from("section,item,score\n");
        for (section, item) in Instrument::rosario().items() {
            let score = overrides
                .iter()
                .find(|(label, _)| *label == item)
                .map(|(_, score)| *score)
                .unwrap_or("4.00");
            csv.push_str(&format!("\"{}\",\"{}\",{}\n", section.title(), item, score));
        }
        csv
    }

    #[test]
    fn csv_import_reads_scores_and_na() {
        let csv = csv_with(&[("3.8 Iniciativa", "N/A"), ("3.7 Cumplimiento", "")]);
        let sheet = ScoreSheetImporter::from_csv_reader(Instrument::rosario(), Cursor::new(csv))
            .expect("import succeeds");
        assert_eq!(sheet.score("3.8 Iniciativa"), Some(Score::NotApplicable));
        assert_eq!(sheet.score("3.7 Cumplimiento"), Some(Score::NotApplicable));
        assert_eq!(
            sheet.score("1.1 Conocimientos ciencias"),
            Some(Score::Graded(Grade::from_hundredths(400)))
        );
    }

    #[test]
    fn csv_import_accepts_spanish_headers() {
        let csv = "Ítem,Calificación\n1.1 Conocimientos ciencias,\"3,5\"\n";
        let error = ScoreSheetImporter::from_csv_reader(Instrument::rosario(), Cursor::new(csv))
            .expect_err("incomplete sheet");
        assert!(matches!(
            error,
            ScoreSheetError::MissingItem("1.2 Conocimientos clínicos generales")
        ));
    }

    #[test]
    fn csv_import_reports_invalid_scores() {
        let csv = csv_with(&[("2.1 Elaboración de historias clínicas", "bueno")]);
        match ScoreSheetImporter::from_csv_reader(Instrument::rosario(), Cursor::new(csv)) {
            Err(ScoreSheetError::InvalidScore { label, .. }) => {
                assert_eq!(label, "2.1 Elaboración de historias clínicas")
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn csv_import_from_missing_path_propagates_io_errors() {
        let error =
            ScoreSheetImporter::from_csv_path(Instrument::rosario(), "./does-not-exist.csv")
                .expect_err("expected io error");
        assert!(matches!(error, ScoreSheetError::Io(_)));
    }

    #[test]
    fn template_round_trips_through_importer_once_filled() {
        let mut buffer = Vec::new();
        write_csv_template(Instrument::rosario(), &mut buffer).expect("template writes");
        let template = String::from_utf8(buffer).expect("utf8");
        assert_eq!(template.lines().count(), 23);
        assert!(template.starts_with("section,item,score\n"));

        let sheet =
            ScoreSheetImporter::from_csv_reader(Instrument::rosario(), Cursor::new(&template))
                .expect("blank template imports as all N/A");
        assert_eq!(sheet.score("3.8 Iniciativa"), Some(Score::NotApplicable));
    }

    #[test]
    fn submission_builds_input_and_pads_observations() {
        let mut scores = serde_json::Map::new();
        for (_, item) in Instrument::rosario().items() {
            scores.insert(item.to_string(), serde_json::json!(4.5));
        }
        let body = serde_json::json!({
            "metadata": { "student_name": "Ana María Pérez", "rotation": "Cirugía" },
            "scores": scores,
            "observations": ["Excelente disposición"],
        });

        let submission = EvaluationSubmission::from_json_reader(Cursor::new(body.to_string()))
            .expect("json parses");
        let input = submission
            .into_input(Instrument::rosario())
            .expect("valid input");
        assert_eq!(input.metadata.student_name, "Ana María Pérez");
        assert_eq!(input.metadata.date, None);
        assert_eq!(input.observations.lines()[0], "Excelente disposición");
        assert_eq!(input.observations.lines()[2], "");
    }
}
