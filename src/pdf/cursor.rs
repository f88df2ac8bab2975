/// Page size and margins in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Distance from the bottom edge below which flowing content may not
    /// extend.
    pub break_margin: f32,
}

impl PageGeometry {
    pub const A4_PORTRAIT: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin_left: 10.0,
        margin_right: 10.0,
        margin_top: 10.0,
        break_margin: 20.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn break_line(&self) -> f32 {
        self.height - self.break_margin
    }
}

/// Drawing position: which page and how far down it the next element goes.
/// Coordinates grow downwards from the top edge of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCursor {
    pub page: usize,
    pub y: f32,
    pub geometry: PageGeometry,
    body_top: f32,
}

impl RenderCursor {
    pub(crate) fn new(geometry: PageGeometry, body_top: f32) -> Self {
        Self {
            page: 0,
            y: body_top,
            geometry,
            body_top,
        }
    }

    pub fn left(&self) -> f32 {
        self.geometry.margin_left
    }

    pub fn content_width(&self) -> f32 {
        self.geometry.content_width()
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// True when nothing has been placed below the header on this page yet.
    pub fn at_body_top(&self) -> bool {
        (self.y - self.body_top).abs() < 0.01
    }

    /// True when a block of `height` starting at the cursor would cross the
    /// bottom break line.
    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.geometry.break_line() + 0.001
    }

    /// A block that overflows moves to a fresh page, unless the page is still
    /// empty (it would overflow there too).
    pub fn needs_break_for(&self, height: f32) -> bool {
        self.would_overflow(height) && !self.at_body_top()
    }

    /// Height available to flowing content on a fresh page.
    pub fn body_height(&self) -> f32 {
        self.geometry.break_line() - self.body_top
    }

    /// Whole lines of `line_height` that still fit above the break line.
    pub fn lines_that_fit(&self, line_height: f32) -> usize {
        let room = self.geometry.break_line() - self.y + 0.001;
        (room / line_height).floor().max(0.0) as usize
    }

    pub(crate) fn break_page(&mut self) {
        self.page += 1;
        self.y = self.body_top;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_content_area() {
        let g = PageGeometry::A4_PORTRAIT;
        assert_eq!(g.content_width(), 190.0);
        assert_eq!(g.break_line(), 277.0);
    }

    #[test]
    fn overflow_is_checked_against_break_line() {
        let mut cursor = RenderCursor::new(PageGeometry::A4_PORTRAIT, 40.0);
        assert!(cursor.at_body_top());
        assert!(!cursor.needs_break_for(500.0));
        cursor.advance(229.0);
        assert!(!cursor.would_overflow(8.0));
        cursor.advance(8.0);
        assert!(cursor.would_overflow(8.0));
        assert!(cursor.needs_break_for(8.0));
        cursor.break_page();
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.y, 40.0);
    }

    #[test]
    fn line_capacity() {
        let mut cursor = RenderCursor::new(PageGeometry::A4_PORTRAIT, 40.0);
        assert_eq!(cursor.body_height(), 237.0);
        assert_eq!(cursor.lines_that_fit(8.0), 29);
        cursor.advance(229.0);
        assert_eq!(cursor.lines_that_fit(8.0), 1);
        cursor.advance(4.0);
        assert_eq!(cursor.lines_that_fit(8.0), 0);
    }
}
