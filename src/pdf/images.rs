use std::io::Cursor;

use image::error::{ParameterError, ParameterErrorKind};
use image::{ColorType, ImageError, ImageFormat, ImageReader};

use crate::error::Error;
use crate::fonts::StandardFont;
use crate::model::{Attachment, AttachmentField};

use super::layout::{Align, DrawOp};
use super::{HEADING_ADVANCE, Renderer};

/// Gap between the two columns of the side-by-side panel.
const PANEL_GUTTER: f32 = 10.0;
/// Offset from the column titles to the top of the pictures.
const PANEL_TITLE_ADVANCE: f32 = 12.0;
/// Space reserved for the pictures below their top edge.
const PANEL_IMAGE_ADVANCE: f32 = 65.0;
const SINGLE_IMAGE_WIDTH: f32 = 80.0;
const SINGLE_IMAGE_GAP: f32 = 50.0;

/// Pixel data as it will be written into the image XObject.
pub(crate) enum ImageData {
    /// Baseline JPEG passed through with DCTDecode.
    Jpeg { data: Vec<u8>, gray: bool },
    /// 8-bit RGB samples plus an optional 8-bit alpha channel.
    Raw { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

pub(crate) struct DecodedImage {
    pub(crate) pixel_width: u32,
    pub(crate) pixel_height: u32,
    pub(crate) data: ImageData,
}

impl DecodedImage {
    pub(crate) fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(ImageError::IoError)?;
        let format = reader.format();
        let decoded = reader.decode()?;
        let (w, h) = (decoded.width(), decoded.height());
        if w == 0 || h == 0 {
            return Err(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )));
        }

        // Only files whose own frame header says RGB or gray are passed
        // through. The decoder reports CMYK and YCCK frames as Rgb8 too.
        let components = match format {
            Some(ImageFormat::Jpeg) => jpeg_components(bytes),
            _ => None,
        };
        let data = match (components, decoded.color()) {
            (Some(3), ColorType::Rgb8) => ImageData::Jpeg {
                data: bytes.to_vec(),
                gray: false,
            },
            (Some(1), ColorType::L8) => ImageData::Jpeg {
                data: bytes.to_vec(),
                gray: true,
            },
            _ => {
                let rgba = decoded.to_rgba8();
                let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
                let rgb: Vec<u8> = rgba
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
                ImageData::Raw { rgb, alpha }
            }
        };

        Ok(Self {
            pixel_width: w,
            pixel_height: h,
            data,
        })
    }
}

/// Component count from the first start-of-frame segment of a JPEG.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        if marker == 0xD9 || marker == 0xDA {
            break;
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        // SOF0..SOF15, except DHT (C4), JPG (C8) and DAC (CC)
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            return data.get(i + 9).copied();
        }
        i += 2 + len;
    }
    None
}

/// A decoded attachment and the slot it occupies in the document.
#[derive(Clone, Copy)]
pub(super) struct Placed {
    pub(super) index: usize,
    aspect: f32,
}

impl Placed {
    fn height_for_width(&self, width: f32) -> f32 {
        width * self.aspect
    }
}

impl Renderer {
    /// Decode a present attachment and register it for embedding.
    pub(super) fn embed(
        &mut self,
        field: AttachmentField,
        attachment: &Attachment,
    ) -> Result<Option<Placed>, Error> {
        let Some(bytes) = attachment.bytes() else {
            return Ok(None);
        };
        let image = DecodedImage::decode(bytes)
            .map_err(|source| Error::AttachmentDecode { field, source })?;
        log::debug!(
            "embed {field}: {}x{} px, {} bytes",
            image.pixel_width,
            image.pixel_height,
            bytes.len()
        );
        Ok(Some(self.register_image(image)))
    }

    pub(super) fn register_image(&mut self, image: DecodedImage) -> Placed {
        let placed = Placed {
            index: self.images.len(),
            aspect: image.pixel_height as f32 / image.pixel_width as f32,
        };
        self.images.push(image);
        placed
    }

    pub(super) fn draw_image(&mut self, placed: Placed, x: f32, y: f32, width: f32) -> f32 {
        let height = placed.height_for_width(width);
        self.push(DrawOp::Image {
            image: placed.index,
            x,
            y,
            width,
            height,
        });
        height
    }

    /// Two equal columns, each with an optional titled picture. Absent
    /// pictures leave their column empty; if both are absent nothing is drawn.
    pub(super) fn side_by_side(
        &mut self,
        left: (&str, AttachmentField, &Attachment),
        right: (&str, AttachmentField, &Attachment),
    ) -> Result<(), Error> {
        if !left.2.is_present() && !right.2.is_present() {
            return Ok(());
        }
        let left_image = self.embed(left.1, left.2)?;
        let right_image = self.embed(right.1, right.2)?;

        let col_w = self.cursor.content_width() / 2.0 - PANEL_GUTTER / 2.0;
        let columns = [
            (self.cursor.left(), left.0, left_image),
            (self.cursor.left() + col_w + PANEL_GUTTER, right.0, right_image),
        ];

        if self
            .cursor
            .needs_break_for(PANEL_TITLE_ADVANCE + PANEL_IMAGE_ADVANCE)
        {
            log::debug!("photo panel at y={:.1} does not fit, new page", self.cursor.y);
            self.break_page();
        }

        let titles_y = self.cursor.y;
        for &(x, title, image) in &columns {
            if image.is_some() {
                self.text_cell(
                    x,
                    titles_y,
                    col_w,
                    10.0,
                    title,
                    StandardFont::HelveticaBold,
                    11.0,
                    Align::Center,
                );
            }
        }

        self.cursor.advance(PANEL_TITLE_ADVANCE);
        let images_y = self.cursor.y;
        for &(x, _, image) in &columns {
            if let Some(placed) = image {
                self.draw_image(placed, x, images_y, col_w);
            }
        }
        self.cursor.advance(PANEL_IMAGE_ADVANCE);
        Ok(())
    }

    /// A titled picture centred on the page, placed in flow. The title and the
    /// picture always share a page; a picture too tall for that is scaled down.
    pub(super) fn single_image(
        &mut self,
        title: &str,
        field: AttachmentField,
        attachment: &Attachment,
    ) -> Result<(), Error> {
        let Some(placed) = self.embed(field, attachment)? else {
            return Ok(());
        };

        let mut width = SINGLE_IMAGE_WIDTH.min(self.cursor.content_width());
        let mut height = placed.height_for_width(width);
        let max_height = self.cursor.body_height() - HEADING_ADVANCE;
        if height > max_height {
            width *= max_height / height;
            height = max_height;
            log::debug!("{field} scaled to {width:.1}mm wide to fit one page");
        }

        self.heading(title, height);
        let x = self.cursor.left() + (self.cursor.content_width() - width) / 2.0;
        let y = self.cursor.y;
        self.draw_image(placed, x, y, width);
        self.cursor.advance(height + SINGLE_IMAGE_GAP);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn encode_jpeg(img: impl Into<image::DynamicImage>) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.into().write_to(&mut out, ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    /// SOI, an APP0 stub, then a 4-component baseline frame header.
    fn cmyk_header() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00];
        data.extend([0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00, 0x10, 0x00, 0x10, 0x04]);
        for id in 1..=4u8 {
            data.extend([id, 0x11, 0x00]);
        }
        data.extend([0xFF, 0xD9]);
        data
    }

    #[test]
    fn frame_component_count() {
        let rgb = encode_jpeg(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10])));
        let gray = encode_jpeg(GrayImage::from_pixel(8, 8, Luma([90])));
        assert_eq!(jpeg_components(&rgb), Some(3));
        assert_eq!(jpeg_components(&gray), Some(1));
        assert_eq!(jpeg_components(&cmyk_header()), Some(4));
        assert_eq!(jpeg_components(b"\x89PNG\r\n\x1a\n"), None);
        assert_eq!(jpeg_components(&[0xFF, 0xD8]), None);
    }

    #[test]
    fn only_rgb_and_gray_jpegs_pass_through() {
        let rgb = encode_jpeg(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10])));
        let decoded = DecodedImage::decode(&rgb).unwrap();
        assert!(matches!(decoded.data, ImageData::Jpeg { gray: false, .. }));

        let gray = encode_jpeg(GrayImage::from_pixel(8, 8, Luma([90])));
        let decoded = DecodedImage::decode(&gray).unwrap();
        assert!(matches!(decoded.data, ImageData::Jpeg { gray: true, .. }));
    }
}
