//! Flows document blocks into pages of positioned drawing operations.
//!
//! Blocks are placed top to bottom. A paragraph may break between lines and
//! a table between rows; a single row or logo is never split.

use super::geometry::PageGeometry;
use super::metrics::Font;
use super::wrap::wrap_text;
use super::RenderError;
use crate::document::model::{
    Block, Document, HAlign, LogoImage, Paragraph, Row, RowKind, Table, VAlign, LOGO_HEIGHT,
    LOGO_WIDTH,
};

pub const CELL_PADDING_X: f32 = 6.0;
pub const CELL_PADDING_Y: f32 = 3.0;
pub const GRID_LINE_WIDTH: f32 = 0.25;
pub const EMPHASIS_GRAY: f32 = 0.96;

const WIDTH_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    },
    /// `index` points into [`Layout::images`].
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub struct Layout<'a> {
    pub pages: Vec<Page>,
    pub images: Vec<&'a LogoImage>,
}

pub fn paginate<'a>(
    document: &'a Document,
    geometry: &PageGeometry,
) -> Result<Layout<'a>, RenderError> {
    let mut paginator = Paginator::new(*geometry);
    for block in &document.blocks {
        match block {
            Block::Logo(image) => paginator.place_logo(image)?,
            Block::Paragraph(paragraph) => paginator.place_paragraph(paragraph),
            Block::Table(table) => paginator.place_table(table)?,
            Block::Spacer(height) => paginator.advance(*height),
        }
    }
    Ok(paginator.finish())
}

/// Distance from the top of a line box to its baseline.
fn baseline_offset(size: f32, leading: f32) -> f32 {
    size * 0.8 + (leading - size) / 2.0
}

fn row_font(kind: RowKind) -> Font {
    if kind.is_emphasized() {
        Font::Bold
    } else {
        Font::Regular
    }
}

struct PlacedCell {
    x: f32,
    width: f32,
    align: HAlign,
    lines: Vec<String>,
}

struct Paginator<'a> {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    /// Height consumed on the current page, measured down from the top margin.
    cursor: f32,
    images: Vec<&'a LogoImage>,
}

impl<'a> Paginator<'a> {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: 0.0,
            images: Vec::new(),
        }
    }

    fn remaining(&self) -> f32 {
        self.geometry.content_height() - self.cursor
    }

    fn top(&self) -> f32 {
        self.geometry.content_top() - self.cursor
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        if !page.ops.is_empty() {
            self.pages.push(page);
        }
        self.cursor = 0.0;
    }

    /// Starts a new page unless `height` still fits on this one.
    fn ensure(&mut self, height: f32) {
        if self.cursor > 0.0 && height > self.remaining() {
            self.break_page();
        }
    }

    fn advance(&mut self, height: f32) {
        self.cursor = (self.cursor + height).min(self.geometry.content_height());
    }

    fn check_fits(&self, height: f32) -> Result<(), RenderError> {
        let available = self.geometry.content_height();
        if height > available {
            return Err(RenderError::BlockTooTall { height, available });
        }
        Ok(())
    }

    fn place_logo(&mut self, image: &'a LogoImage) -> Result<(), RenderError> {
        self.check_fits(LOGO_HEIGHT)?;
        self.ensure(LOGO_HEIGHT);

        let index = self.images.len();
        self.images.push(image);
        self.current.ops.push(DrawOp::Image {
            x: self.geometry.margin,
            y: self.top() - LOGO_HEIGHT,
            width: LOGO_WIDTH.min(self.geometry.usable_width()),
            height: LOGO_HEIGHT,
            index,
        });
        self.cursor += LOGO_HEIGHT;
        Ok(())
    }

    fn place_paragraph(&mut self, paragraph: &Paragraph) {
        let style = paragraph.style;
        if self.cursor > 0.0 {
            self.advance(style.space_before);
        }

        let lines = wrap_text(
            &paragraph.text,
            style.font,
            style.size,
            self.geometry.usable_width(),
        );
        for line in lines {
            self.ensure(style.leading);
            if !line.is_empty() {
                self.current.ops.push(DrawOp::Text {
                    x: self.geometry.margin,
                    y: self.top() - baseline_offset(style.size, style.leading),
                    font: style.font,
                    size: style.size,
                    text: line,
                });
            }
            self.cursor += style.leading;
        }

        self.advance(style.space_after);
    }

    fn place_table(&mut self, table: &Table) -> Result<(), RenderError> {
        if table.rows.is_empty() {
            return Err(RenderError::EmptyTable);
        }
        let width = table.width();
        let available = self.geometry.usable_width();
        if width > available + WIDTH_TOLERANCE {
            return Err(RenderError::TableTooWide { width, available });
        }

        for (index, row) in table.rows.iter().enumerate() {
            let cells = self.resolve_cells(table, row, index)?;
            let lines = cells.iter().map(|cell| cell.lines.len()).max().unwrap_or(0);
            let height = (lines.max(1) as f32 * table.leading + 2.0 * CELL_PADDING_Y)
                .max(table.min_row_height);

            self.check_fits(height)?;
            self.ensure(height);
            self.draw_row(table, row.kind, cells, height);
            self.cursor += height;
        }
        Ok(())
    }

    /// Assigns each cell its x offset and width, wraps its text, and pads a
    /// short row with empty cells.
    fn resolve_cells(
        &self,
        table: &Table,
        row: &Row,
        index: usize,
    ) -> Result<Vec<PlacedCell>, RenderError> {
        let spanned: usize = row.cells.iter().map(|cell| cell.span.max(1)).sum();
        if spanned > table.columns.len() {
            return Err(RenderError::RowOverflow {
                row: index,
                spanned,
                columns: table.columns.len(),
            });
        }

        let font = row_font(row.kind);
        let mut placed = Vec::with_capacity(table.columns.len());
        let mut x = self.geometry.margin;
        let mut column = 0;

        for cell in &row.cells {
            let span = cell.span.max(1);
            let group = &table.columns[column..column + span];
            let width: f32 = group.iter().map(|spec| spec.width).sum();
            placed.push(PlacedCell {
                x,
                width,
                align: group[0].align,
                lines: wrap_text(
                    &cell.text,
                    font,
                    table.text_size,
                    width - 2.0 * CELL_PADDING_X,
                ),
            });
            x += width;
            column += span;
        }

        for spec in &table.columns[column..] {
            placed.push(PlacedCell {
                x,
                width: spec.width,
                align: spec.align,
                lines: Vec::new(),
            });
            x += spec.width;
        }

        Ok(placed)
    }

    fn draw_row(&mut self, table: &Table, kind: RowKind, cells: Vec<PlacedCell>, height: f32) {
        let top = self.top();
        let bottom = top - height;
        let font = row_font(kind);
        let size = table.text_size;

        if kind.is_emphasized() {
            self.current.ops.push(DrawOp::FillRect {
                x: self.geometry.margin,
                y: bottom,
                width: table.width(),
                height,
                gray: EMPHASIS_GRAY,
            });
        }

        for cell in cells {
            let content = cell.lines.len() as f32 * table.leading;
            let text_top = match table.valign {
                VAlign::Top => top - CELL_PADDING_Y,
                VAlign::Middle => top - (height - content) / 2.0,
            };

            for (number, line) in cell.lines.into_iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let x = match cell.align {
                    HAlign::Left => cell.x + CELL_PADDING_X,
                    HAlign::Center => cell.x + (cell.width - font.text_width(&line, size)) / 2.0,
                };
                let y = text_top
                    - number as f32 * table.leading
                    - baseline_offset(size, table.leading);
                self.current.ops.push(DrawOp::Text {
                    x,
                    y,
                    font,
                    size,
                    text: line,
                });
            }

            self.current.ops.push(DrawOp::StrokeRect {
                x: cell.x,
                y: bottom,
                width: cell.width,
                height,
                line_width: GRID_LINE_WIDTH,
            });
        }
    }

    fn finish(mut self) -> Layout<'a> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        Layout {
            pages: self.pages,
            images: self.images,
        }
    }
}
