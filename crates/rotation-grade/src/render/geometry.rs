pub const POINTS_PER_INCH: f32 = 72.0;

pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

/// Page size and uniform margin, in points. The origin is bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with half-inch margins.
    pub fn letter() -> Self {
        Self {
            width: inches(8.5),
            height: inches(11.0),
            margin: inches(0.5),
        }
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Y coordinate of the top margin line.
    pub fn content_top(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_leaves_540_points_between_margins() {
        let page = PageGeometry::letter();
        assert_eq!(page.width, 612.0);
        assert_eq!(page.height, 792.0);
        assert_eq!(page.usable_width(), 540.0);
        assert_eq!(page.content_top(), 756.0);
    }
}
