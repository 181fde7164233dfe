//! Grading of clinical rotation evaluations and their printable report.

pub mod config;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod pipeline;
pub mod render;
pub mod telemetry;

pub use pipeline::{generate_report, generate_report_with, GeneratedReport};
