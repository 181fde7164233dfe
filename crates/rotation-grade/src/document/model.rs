use crate::render::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
}

/// Font, size, and vertical rhythm of a paragraph, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    pub const HEADER: TextStyle = TextStyle {
        font: Font::Regular,
        size: 12.0,
        leading: 14.0,
        space_before: 0.0,
        space_after: 6.0,
    };

    pub const SECTION: TextStyle = TextStyle {
        font: Font::Regular,
        size: 11.0,
        leading: 13.0,
        space_before: 8.0,
        space_after: 4.0,
    };

    pub const SMALL: TextStyle = TextStyle {
        font: Font::Regular,
        size: 9.0,
        leading: 11.0,
        space_before: 0.0,
        space_after: 0.0,
    };

    pub const fn bold(self) -> TextStyle {
        TextStyle {
            font: Font::Bold,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A fixed-width column. Widths are never derived from content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub width: f32,
    pub align: HAlign,
}

impl ColumnSpec {
    pub const fn text(width: f32) -> Self {
        Self {
            width,
            align: HAlign::Left,
        }
    }

    pub const fn numeric(width: f32) -> Self {
        Self {
            width,
            align: HAlign::Center,
        }
    }
}

/// Header and footer rows print bold on a shaded background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
    Footer,
}

impl RowKind {
    pub const fn is_emphasized(self) -> bool {
        matches!(self, RowKind::Header | RowKind::Footer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub span: usize,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: 1,
        }
    }

    pub fn spanning(text: impl Into<String>, span: usize) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Row>,
    pub valign: VAlign,
    pub min_row_height: f32,
    pub text_size: f32,
    pub leading: f32,
}

impl Table {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            valign: VAlign::Top,
            min_row_height: 0.0,
            text_size: TextStyle::SMALL.size,
            leading: TextStyle::SMALL.leading,
        }
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn min_row_height(mut self, height: f32) -> Self {
        self.min_row_height = height;
        self
    }

    pub fn row(mut self, kind: RowKind, cells: Vec<Cell>) -> Self {
        self.rows.push(Row { kind, cells });
        self
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|column| column.width).sum()
    }
}

/// Decoded logo, flattened to 8-bit RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

/// Printed logo size, in points.
pub const LOGO_WIDTH: f32 = 200.0;
pub const LOGO_HEIGHT: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Logo(LogoImage),
    Paragraph(Paragraph),
    Table(Table),
    Spacer(f32),
}

/// Ordered blocks, laid out top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    pub fn has_logo(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::Logo(_)))
    }
}
