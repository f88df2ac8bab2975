use crate::fonts::StandardFont;

use super::{HEADING_ADVANCE, Renderer};
use super::layout::{Align, CELL_PADDING, DrawOp, wrap_text};

const LABEL_WIDTH: f32 = 100.0;
const LINE_HEIGHT: f32 = 8.0;
const FONT_SIZE: f32 = 11.0;
const TRAILING_GAP: f32 = 5.0;

/// Lines `start..end` of one cell, clamped to what the cell has.
fn slice(lines: &[String], start: usize, end: usize) -> &[String] {
    let end = end.min(lines.len());
    &lines[start.min(end)..end]
}

impl Renderer {
    /// Bordered two-column table: bold `label:` on the left, wrapped value on
    /// the right. Both cells of a row share the height of the taller one.
    ///
    /// A row that does not fit below the cursor moves to the next page. Only a
    /// row taller than a whole page body is split, line by line.
    pub(super) fn table_section(&mut self, title: Option<&str>, rows: &[(&str, &str)]) {
        let label_w = LABEL_WIDTH.min(self.cursor.content_width());
        let value_w = self.cursor.content_width() - label_w;

        let wrapped: Vec<(Vec<String>, Vec<String>)> = rows
            .iter()
            .map(|(label, value)| {
                let label_lines = wrap_text(
                    &format!("{label}:"),
                    StandardFont::HelveticaBold,
                    FONT_SIZE,
                    label_w - 2.0 * CELL_PADDING,
                );
                let value_lines = wrap_text(
                    value,
                    StandardFont::Helvetica,
                    FONT_SIZE,
                    value_w - 2.0 * CELL_PADDING,
                );
                (label_lines, value_lines)
            })
            .collect();

        // The heading stays with the first row, or with its first line when
        // the two together would not fit on any page.
        let mut after_heading = false;
        if let Some(title) = title {
            let first_row = wrapped
                .first()
                .map_or(0.0, |(l, v)| l.len().max(v.len()).max(1) as f32 * LINE_HEIGHT);
            let keep = if HEADING_ADVANCE + first_row <= self.cursor.body_height() {
                first_row
            } else {
                LINE_HEIGHT
            };
            self.heading(title, keep);
            after_heading = true;
        }

        for ((label, _), (label_lines, value_lines)) in rows.iter().zip(&wrapped) {
            let line_count = label_lines.len().max(value_lines.len()).max(1);
            let row_h = line_count as f32 * LINE_HEIGHT;

            let movable = !after_heading && row_h <= self.cursor.body_height();
            after_heading = false;
            if movable && self.cursor.needs_break_for(row_h) {
                log::debug!(
                    "table row {label:?} ({row_h:.1}mm) does not fit at y={:.1}, new page",
                    self.cursor.y
                );
                self.break_page();
            }

            let mut start = 0;
            while start < line_count {
                let mut fit = self.cursor.lines_that_fit(LINE_HEIGHT);
                if fit == 0 {
                    if !self.cursor.at_body_top() {
                        self.break_page();
                        continue;
                    }
                    fit = 1;
                }
                let end = (start + fit).min(line_count);
                self.row_part(
                    (label_w, slice(label_lines, start, end)),
                    (value_w, slice(value_lines, start, end)),
                    end - start,
                );
                start = end;
                if start < line_count {
                    log::debug!("table row {label:?} continues on the next page");
                    self.break_page();
                }
            }
        }

        self.cursor.advance(TRAILING_GAP);
    }

    /// Draw `line_count` lines of a row at the cursor, borders included.
    fn row_part(
        &mut self,
        label: (f32, &[String]),
        value: (f32, &[String]),
        line_count: usize,
    ) {
        let height = line_count as f32 * LINE_HEIGHT;
        let x = self.cursor.left();
        let y = self.cursor.y;
        for (cell_x, (cell_w, lines), font) in [
            (x, label, StandardFont::HelveticaBold),
            (x + label.0, value, StandardFont::Helvetica),
        ] {
            self.push(DrawOp::Border {
                x: cell_x,
                y,
                width: cell_w,
                height,
            });
            for (i, line) in lines.iter().enumerate() {
                let line_y = y + i as f32 * LINE_HEIGHT;
                self.text_cell(
                    cell_x,
                    line_y,
                    cell_w,
                    LINE_HEIGHT,
                    line,
                    font,
                    FONT_SIZE,
                    Align::Left,
                );
            }
        }
        self.cursor.advance(height);
    }
}
