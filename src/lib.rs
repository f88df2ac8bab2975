mod error;
mod fonts;
pub mod form;
mod model;
mod pdf;

pub use error::Error;
pub use fonts::StandardFont;
pub use form::{RecordDescription, output_file_name};
pub use model::{
    Attachment, AttachmentField, Attachments, DestinationSite, Equipment, Observations,
    OriginSite, TranslocationRecord, Transport,
};
pub use pdf::{
    Align, DocumentLayout, DrawOp, PageGeometry, PageLayout, RenderCursor, RenderOptions,
    SIGNATURE_BREAK_Y, wrap_text,
};

use std::path::Path;
use std::time::Instant;

/// Position every element of the transfer sheet without producing PDF bytes.
pub fn layout(
    record: &TranslocationRecord,
    options: &RenderOptions,
) -> Result<DocumentLayout, Error> {
    pdf::layout(record, options)
}

/// Render a transfer sheet with the default options (header logo read from
/// `Logo.png` in the working directory, if present).
pub fn render(record: &TranslocationRecord) -> Result<Vec<u8>, Error> {
    render_with(record, &RenderOptions::default())
}

pub fn render_with(
    record: &TranslocationRecord,
    options: &RenderOptions,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let doc = pdf::layout(record, options)?;
    let t_layout = t0.elapsed();

    let bytes = pdf::write_pdf(&doc);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: layout={:.1}ms, assembly={:.1}ms, total={:.1}ms \
         ({} pages, {} images, output {} bytes)",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.pages.len(),
        doc.image_count(),
        bytes.len(),
    );

    Ok(bytes)
}

pub fn render_to_file(
    record: &TranslocationRecord,
    options: &RenderOptions,
    output: &Path,
) -> Result<(), Error> {
    let bytes = render_with(record, options)?;
    std::fs::write(output, &bytes).map_err(Error::Io)?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
