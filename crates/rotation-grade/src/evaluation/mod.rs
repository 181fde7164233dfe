//! Grading instrument, score intake, and reweighted aggregation.

mod aggregate;
pub mod domain;
mod form;
pub mod import;
mod instrument;
mod sheet;
pub mod views;

pub use aggregate::{
    aggregate, compute_final_score, compute_section_average, Evaluation, FinalResult, ItemResult,
    SectionResult,
};
pub use domain::{Grade, Score, ScoreParseError};
pub use form::{EvaluationInput, EvaluationMetadata, Observations, OBSERVATION_LINES};
pub use import::{write_csv_template, EvaluationSubmission, ScoreSheetImporter};
pub use instrument::{Instrument, SectionTemplate};
pub use sheet::{ScoreSheet, ScoreSheetError};
