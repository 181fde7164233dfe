use super::geometry::PageGeometry;
use super::layout::{paginate, DrawOp, Layout, Page};
use super::metrics::{encode_win_ansi, Font};
use super::{DocumentRenderer, RenderError};
use crate::document::model::Document;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};
use tracing::debug;

const PRODUCER: &str = "rotation-grade";

/// Writes paginated documents as PDF 1.5 using the base-14 Helvetica faces.
/// Output carries no timestamps or file identifiers, so equal documents
/// produce equal bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    geometry: PageGeometry,
}

impl PdfRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let layout = paginate(document, &self.geometry)?;
        let bytes = write_pdf(&layout, &self.geometry)?;
        debug!(
            pages = layout.pages.len(),
            bytes = bytes.len(),
            "rendered pdf"
        );
        Ok(bytes)
    }
}

fn pdf_error(error: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(error.to_string())
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

pub(crate) fn write_pdf(
    layout: &Layout<'_>,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Regular));
    let bold_id = doc.add_object(font_dictionary(Font::Bold));
    let mut resources = dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    };

    let mut xobjects = Dictionary::new();
    for (index, image) in layout.images.iter().enumerate() {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(image.width_px),
                "Height" => i64::from(image.height_px),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            image.rgb.clone(),
        );
        let image_id = doc.add_object(stream);
        xobjects.set(image_name(index), image_id);
    }
    if !layout.images.is_empty() {
        resources.set("XObject", xobjects);
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            geometry.width.into(),
            geometry.height.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(pdf_error)?;
    Ok(bytes)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("g", vec![(*gray).into()]));
                operations.push(rectangle(*x, *y, *width, *height));
                operations.push(Operation::new("f", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new("G", vec![0.into()]));
                operations.push(Operation::new("w", vec![(*line_width).into()]));
                operations.push(rectangle(*x, *y, *width, *height));
                operations.push(Operation::new("S", vec![]));
                operations.push(Operation::new("Q", vec![]));
            }
            DrawOp::Image {
                x,
                y,
                width,
                height,
                index,
            } => {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![
                        (*width).into(),
                        0.into(),
                        0.into(),
                        (*height).into(),
                        (*x).into(),
                        (*y).into(),
                    ],
                ));
                operations.push(Operation::new(
                    "Do",
                    vec![Object::Name(image_name(*index).into_bytes())],
                ));
                operations.push(Operation::new("Q", vec![]));
            }
        }
    }
    operations
}

fn rectangle(x: f32, y: f32, width: f32, height: f32) -> Operation {
    Operation::new(
        "re",
        vec![x.into(), y.into(), width.into(), height.into()],
    )
}
