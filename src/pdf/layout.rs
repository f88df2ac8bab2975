use crate::fonts::StandardFont;

use super::cursor::PageGeometry;
use super::images::DecodedImage;

pub(crate) const PT_TO_MM: f32 = 25.4 / 72.0;

/// Horizontal padding inside a cell, left and right.
pub(crate) const CELL_PADDING: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A positioned drawing operation. Coordinates are millimetres from the
/// top-left corner of the page.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        font: StandardFont,
        size: f32,
        text: String,
    },
    /// Rectangle outline of a table cell.
    Border {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Image {
        /// Index into [`DocumentLayout::images`].
        image: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

/// Fully positioned document, ready to be serialised.
pub struct DocumentLayout {
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
    pub(crate) images: Vec<DecodedImage>,
}

impl DocumentLayout {
    /// Number of distinct images embedded (each photo once, the logo once).
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Page index of the first text op equal to `needle`.
    pub fn page_of(&self, needle: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(needle))
    }
}

pub(crate) fn measure(text: &str, font: StandardFont, size: f32) -> f32 {
    font.text_width(text, size) * PT_TO_MM
}

/// Baseline for a single line of text vertically centred in a cell of
/// height `h` whose top is at `y`.
pub(crate) fn baseline_in_cell(y: f32, h: f32, size: f32) -> f32 {
    y + 0.5 * h + 0.3 * size * PT_TO_MM
}

/// Break `text` into lines no wider than `max_width` millimetres.
///
/// Words are separated at whitespace; explicit newlines always start a new
/// line; a word wider than a whole line is split between characters. The
/// result is never empty.
pub fn wrap_text(text: &str, font: StandardFont, size: f32, max_width: f32) -> Vec<String> {
    let space_w = measure(" ", font, size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_w = 0.0f32;

        for word in paragraph.split_whitespace() {
            let word_w = measure(word, font, size);
            if !current.is_empty() {
                if current_w + space_w + word_w <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_w += space_w + word_w;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            }

            if word_w <= max_width {
                current.push_str(word);
                current_w = word_w;
            } else {
                for ch in word.chars() {
                    let ch_w = font.char_width_1000(ch) * size / 1000.0 * PT_TO_MM;
                    if !current.is_empty() && current_w + ch_w > max_width {
                        lines.push(std::mem::take(&mut current));
                        current_w = 0.0;
                    }
                    current.push(ch);
                    current_w += ch_w;
                }
            }
        }

        lines.push(current);
    }

    lines
}
