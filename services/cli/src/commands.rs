use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Args};
use rotation_grade::config::AppConfig;
use rotation_grade::document::{final_banner, LogoSource};
use rotation_grade::error::AppError;
use rotation_grade::evaluation::domain::{format_optional, format_percent, NOT_APPLICABLE_LABEL};
use rotation_grade::evaluation::{
    aggregate, write_csv_template, Evaluation, EvaluationInput, EvaluationMetadata,
    EvaluationSubmission, Instrument, Observations, ScoreSheetImporter,
};
use rotation_grade::generate_report_with;
use rotation_grade::render::PdfRenderer;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("source").required(true).args(["sheet", "scores"])))]
pub(crate) struct InputArgs {
    /// Submitted form as JSON with metadata, scores and observations
    #[arg(long)]
    pub(crate) sheet: Option<PathBuf>,
    /// Scores as CSV with item and score columns
    #[arg(long)]
    pub(crate) scores: Option<PathBuf>,
    /// Student full name
    #[arg(long)]
    pub(crate) student: Option<String>,
    #[arg(long)]
    pub(crate) rotation: Option<String>,
    #[arg(long)]
    pub(crate) period: Option<String>,
    #[arg(long)]
    pub(crate) hospital: Option<String>,
    #[arg(long)]
    pub(crate) program: Option<String>,
    /// Evaluator name(s)
    #[arg(long)]
    pub(crate) evaluator: Option<String>,
    /// Signature text printed on the form
    #[arg(long)]
    pub(crate) signature: Option<String>,
    /// Date printed on the form, verbatim (defaults to today)
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Observation line; repeat up to three times
    #[arg(long = "observation")]
    pub(crate) observations: Vec<String>,
}

impl InputArgs {
    /// Reads the selected source, then applies any flags on top of it.
    pub(crate) fn load(self) -> Result<EvaluationInput, AppError> {
        let instrument = Instrument::rosario();
        let mut input = match (&self.sheet, &self.scores) {
            (Some(path), _) => {
                EvaluationSubmission::from_json_path(path)?.into_input(instrument)?
            }
            (None, Some(path)) => EvaluationInput {
                metadata: EvaluationMetadata::default(),
                sheet: ScoreSheetImporter::from_csv_path(instrument, path)?,
                observations: Observations::default(),
            },
            (None, None) => {
                return Err(AppError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "either --sheet or --scores is required",
                )))
            }
        };

        let metadata = &mut input.metadata;
        override_field(&mut metadata.student_name, self.student);
        override_field(&mut metadata.rotation, self.rotation);
        override_field(&mut metadata.period, self.period);
        override_field(&mut metadata.hospital, self.hospital);
        override_field(&mut metadata.program, self.program);
        override_field(&mut metadata.evaluator, self.evaluator);
        override_field(&mut metadata.signature, self.signature);
        if self.date.is_some() {
            metadata.date = self.date;
        }
        if !self.observations.is_empty() {
            input.observations = Observations::from_lines(self.observations)?;
        }

        Ok(input)
    }
}

fn override_field(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Logo image (PNG or JPEG); replaces the configured default logo
    #[arg(long)]
    pub(crate) logo: Option<PathBuf>,
    /// Directory receiving the PDF (defaults to GRADE_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Date used when the form carries none (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Print the summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TemplateArgs {
    /// Write the template to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_render(args: RenderArgs, config: &AppConfig) -> Result<(), AppError> {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.document.output_dir.clone());
    let (path, evaluation) =
        render_to_dir(args, &config.document.default_logo_path, &output_dir)?;

    println!("Wrote {}", path.display());
    println!("{}", final_banner(&evaluation));
    Ok(())
}

pub(crate) fn render_to_dir(
    args: RenderArgs,
    default_logo: &Path,
    output_dir: &Path,
) -> Result<(PathBuf, Evaluation), AppError> {
    let RenderArgs {
        input, logo, today, ..
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let logo = logo_source(logo.as_deref(), default_logo);
    let input = input.load()?;

    let report = generate_report_with(&PdfRenderer::default(), &input, &logo, today)?;
    let path = report.write_to_dir(output_dir)?;
    Ok((path, report.evaluation))
}

/// An explicit logo that cannot be read is dropped, not replaced by the default.
fn logo_source(logo: Option<&Path>, default_logo: &Path) -> LogoSource {
    let Some(path) = logo else {
        return LogoSource::default_path(default_logo);
    };
    match std::fs::read(path) {
        Ok(bytes) => LogoSource::supplied(bytes),
        Err(error) => {
            warn!(path = %path.display(), %error, "logo could not be read; omitting it");
            LogoSource::default()
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = args.input.load()?;
    let evaluation = aggregate(&input.sheet);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let body =
            serde_json::to_string_pretty(&evaluation.summary()).map_err(io::Error::from)?;
        writeln!(out, "{body}")?;
    } else {
        write_score_summary(&evaluation, &mut out)?;
    }
    Ok(())
}

pub(crate) fn write_score_summary<W: Write>(
    evaluation: &Evaluation,
    out: &mut W,
) -> io::Result<()> {
    for section in &evaluation.sections {
        let weight = evaluation
            .final_result
            .effective_weight(section)
            .map(format_percent)
            .unwrap_or_else(|| NOT_APPLICABLE_LABEL.to_string());
        writeln!(
            out,
            "{}: promedio {}, peso aplicado {}",
            section.section.title(),
            format_optional(section.average),
            weight
        )?;
    }
    writeln!(out, "{}", final_banner(evaluation))
}

pub(crate) fn run_template(args: TemplateArgs) -> Result<(), AppError> {
    let instrument = Instrument::rosario();
    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            write_csv_template(instrument, file)?;
            println!("Wrote {}", path.display());
        }
        None => write_csv_template(instrument, io::stdout().lock())?,
    }
    Ok(())
}
