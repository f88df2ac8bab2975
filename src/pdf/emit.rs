use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::fonts::{StandardFont, to_winansi_bytes};

use super::images::{DecodedImage, ImageData};
use super::layout::{DocumentLayout, DrawOp};

const MM_TO_PT: f32 = 72.0 / 25.4;
/// Cell borders: 0.2mm.
const BORDER_WIDTH_PT: f32 = 0.567;

fn pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// Write one image XObject (plus its soft mask, if any) and return its ref.
fn write_image(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, image: &DecodedImage) -> Ref {
    let (w, h) = (image.pixel_width as i32, image.pixel_height as i32);
    let xobj_ref = alloc();
    match &image.data {
        ImageData::Jpeg { data, gray } => {
            let mut xobj = pdf.image_xobject(xobj_ref, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(w);
            xobj.height(h);
            if *gray {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        ImageData::Raw { rgb, alpha } => {
            let smask_ref = alpha.as_ref().map(|alpha| {
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w);
                mask.height(h);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask_ref
            });

            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w);
            xobj.height(h);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }
    xobj_ref
}

fn page_content(ops: &[DrawOp], page_height: f32) -> Content {
    // Layout measures down from the top edge, PDF up from the bottom.
    let flip = |y: f32| page_height - pt(y);
    let mut content = Content::new();

    for op in ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                font,
                size,
                text,
            } => {
                let bytes = to_winansi_bytes(text);
                content
                    .begin_text()
                    .set_font(Name(font.pdf_name().as_bytes()), *size)
                    .next_line(pt(*x), flip(*baseline))
                    .show(Str(&bytes))
                    .end_text();
            }
            DrawOp::Border {
                x,
                y,
                width,
                height,
            } => {
                content
                    .set_line_width(BORDER_WIDTH_PT)
                    .rect(pt(*x), flip(y + height), pt(*width), pt(*height))
                    .stroke();
            }
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                let name = format!("Im{}", image + 1);
                content
                    .save_state()
                    .transform([pt(*width), 0.0, 0.0, pt(*height), pt(*x), flip(y + height)])
                    .x_object(Name(name.as_bytes()))
                    .restore_state();
            }
        }
    }
    content
}

/// Serialise a laid-out document. Output depends only on the layout, so the
/// same record always produces the same bytes.
pub(crate) fn write_pdf(layout: &DocumentLayout) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let font_pairs: Vec<(&str, Ref)> = StandardFont::ALL
        .iter()
        .map(|font| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (font.pdf_name(), font_ref)
        })
        .collect();

    let image_xobjects: Vec<(String, Ref)> = layout
        .images
        .iter()
        .enumerate()
        .map(|(i, image)| (format!("Im{}", i + 1), write_image(&mut pdf, &mut alloc, image)))
        .collect();

    let page_width = pt(layout.geometry.width);
    let page_height = pt(layout.geometry.height);

    let n = layout.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in layout.pages.iter().enumerate() {
        let raw = page_content(&page.ops, page_height).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    pdf.finish()
}
