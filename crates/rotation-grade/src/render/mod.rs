//! Paginates the abstract document model and writes it out as PDF.

pub mod geometry;
pub mod layout;
mod metrics;
mod pdf;
mod wrap;

pub use geometry::{inches, PageGeometry};
pub use layout::{paginate, DrawOp, Layout, Page};
pub use metrics::{encode_win_ansi, Font};
pub use pdf::PdfRenderer;
pub use wrap::wrap_text;

use crate::document::model::Document;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("table is {width:.1}pt wide but only {available:.1}pt fit between the margins")]
    TableTooWide { width: f32, available: f32 },
    #[error("table has no rows")]
    EmptyTable,
    #[error("row {row} spans {spanned} columns but the table declares {columns}")]
    RowOverflow {
        row: usize,
        spanned: usize,
        columns: usize,
    },
    #[error("block is {height:.1}pt tall but a page holds {available:.1}pt")]
    BlockTooTall { height: f32, available: f32 },
    #[error("pdf serialization failed: {0}")]
    Pdf(String),
}

/// Turns a document into the bytes of a finished file.
pub trait DocumentRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError>;
}
