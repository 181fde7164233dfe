//! Abstract, renderer-independent description of the printed report.

mod builder;
mod logo;
pub mod model;

pub use builder::{
    build_document, final_banner, legend, report_date, suggested_file_name, DocumentInput,
    ITEM_COLUMN_WIDTH, OBSERVATION_ROW_HEIGHT, SCORE_COLUMN_WIDTH,
};
pub use logo::{decode_logo, LogoSource};
pub use model::{Block, Document, LogoImage};
