use crate::config::DocumentConfig;
use crate::document::{build_document, suggested_file_name, DocumentInput, LogoSource};
use crate::error::AppError;
use crate::evaluation::domain::format_optional;
use crate::evaluation::{aggregate, Evaluation, EvaluationInput};
use crate::render::{DocumentRenderer, PdfRenderer};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// A finished report: the PDF bytes and the numbers printed on it.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub file_name: String,
    pub pdf: Vec<u8>,
    pub evaluation: Evaluation,
}

impl GeneratedReport {
    /// Writes the PDF under its suggested name, creating `dir` if needed.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.pdf)?;
        Ok(path)
    }
}

/// Renders a report using the configured default logo.
pub fn generate_report(
    input: &EvaluationInput,
    config: &DocumentConfig,
    today: NaiveDate,
) -> Result<GeneratedReport, AppError> {
    let logo = LogoSource::default_path(&config.default_logo_path);
    generate_report_with(&PdfRenderer::default(), input, &logo, today)
}

pub fn generate_report_with<R: DocumentRenderer>(
    renderer: &R,
    input: &EvaluationInput,
    logo: &LogoSource,
    today: NaiveDate,
) -> Result<GeneratedReport, AppError> {
    let evaluation = aggregate(&input.sheet);
    let document = build_document(
        &DocumentInput {
            metadata: &input.metadata,
            evaluation: &evaluation,
            observations: &input.observations,
            logo: logo.resolve(),
        },
        today,
    );

    let pdf = renderer.render(&document)?;
    let file_name = suggested_file_name(&input.metadata.student_name);

    info!(
        %file_name,
        final_score = %format_optional(evaluation.final_result.final_score),
        passed = evaluation.final_result.pass_label(),
        bytes = pdf.len(),
        "generated evaluation report"
    );

    Ok(GeneratedReport {
        file_name,
        pdf,
        evaluation,
    })
}
