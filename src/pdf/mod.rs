mod cursor;
mod emit;
mod images;
mod layout;
mod table;

use std::path::PathBuf;

use crate::error::Error;
use crate::fonts::{StandardFont, is_encodable};
use crate::model::{
    AttachmentField, DestinationSite, Equipment, Observations, OriginSite,
    TranslocationRecord, Transport,
};

pub use cursor::{PageGeometry, RenderCursor};
pub(crate) use emit::write_pdf;
pub use layout::{Align, DocumentLayout, DrawOp, PageLayout, wrap_text};

use images::{DecodedImage, Placed};
use layout::{CELL_PADDING, baseline_in_cell, measure};

const DOCUMENT_TITLE: &str = "Ficha de Traslado de Equipamiento";
const SIGNATURE_CAPTION: &str = "Nombre y Rut del responsable del centro de origen";
const SIGNATURE_RULE: &str = "____________________________________";

const LOGO_X: f32 = 10.0;
const LOGO_Y: f32 = 8.0;
const LOGO_WIDTH: f32 = 40.0;
const TITLE_Y: f32 = 15.0;
/// First body line: title cell (15 + 10) plus a 15mm gap.
const BODY_TOP: f32 = 40.0;
/// Vertical space taken by a section heading, gap included.
const HEADING_ADVANCE: f32 = 14.0;
/// The signature block moves to a new page when the cursor is below this.
pub const SIGNATURE_BREAK_Y: f32 = 220.0;

/// Location of the optional header logo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub logo_path: Option<PathBuf>,
}

impl RenderOptions {
    pub fn without_logo() -> Self {
        Self { logo_path: None }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            logo_path: Some(PathBuf::from("Logo.png")),
        }
    }
}

/// Owns all state of one render: the cursor, the pages drawn so far and the
/// images they reference. Nothing outlives the call that created it.
pub(crate) struct Renderer {
    cursor: RenderCursor,
    pages: Vec<PageLayout>,
    images: Vec<DecodedImage>,
    logo: Option<Placed>,
}

impl Renderer {
    fn new(geometry: PageGeometry, logo: Option<DecodedImage>) -> Self {
        let mut renderer = Self {
            cursor: RenderCursor::new(geometry, BODY_TOP),
            pages: vec![PageLayout::default()],
            images: Vec::new(),
            logo: None,
        };
        if let Some(image) = logo {
            renderer.logo = Some(renderer.register_image(image));
        }
        renderer.header();
        renderer
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.cursor.page].ops.push(op);
    }

    /// Single-line text in a cell at (`x`, `y`). Empty text draws nothing.
    #[allow(clippy::too_many_arguments)]
    fn text_cell(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        text: &str,
        font: StandardFont,
        size: f32,
        align: Align,
    ) {
        if text.is_empty() {
            return;
        }
        let text_x = match align {
            Align::Left => x + CELL_PADDING,
            Align::Center => x + (w - measure(text, font, size)) / 2.0,
        };
        self.push(DrawOp::Text {
            x: text_x,
            baseline: baseline_in_cell(y, h, size),
            font,
            size,
            text: text.to_string(),
        });
    }

    /// Logo and title, repeated on every page.
    fn header(&mut self) {
        if let Some(logo) = self.logo {
            self.draw_image(logo, LOGO_X, LOGO_Y, LOGO_WIDTH);
        }
        let (x, w) = (self.cursor.left(), self.cursor.content_width());
        self.text_cell(
            x,
            TITLE_Y,
            w,
            10.0,
            DOCUMENT_TITLE,
            StandardFont::HelveticaBold,
            12.0,
            Align::Center,
        );
        self.cursor.y = BODY_TOP;
    }

    fn break_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.cursor.break_page();
        log::debug!("page break -> page {}", self.cursor.page + 1);
        self.header();
    }

    /// Bold section title followed by a small gap. The title moves to a new
    /// page unless `keep_with` millimetres of what follows fit below it.
    fn heading(&mut self, title: &str, keep_with: f32) {
        if self.cursor.needs_break_for(HEADING_ADVANCE + keep_with) {
            log::debug!(
                "heading {title:?} at y={:.1} kept with its content, new page",
                self.cursor.y
            );
            self.break_page();
        }
        let (x, y, w) = (self.cursor.left(), self.cursor.y, self.cursor.content_width());
        self.text_cell(x, y, w, 10.0, title, StandardFont::HelveticaBold, 12.0, Align::Left);
        self.cursor.advance(HEADING_ADVANCE);
    }

    /// Signer line, rule and caption, kept together on one page.
    fn signature(&mut self, signer: &str) {
        if self.cursor.y > SIGNATURE_BREAK_Y {
            log::debug!("signature at y={:.1} past threshold, new page", self.cursor.y);
            self.break_page();
        }
        self.cursor.advance(20.0);
        let (x, w) = (self.cursor.left(), self.cursor.content_width());
        for line in [signer, SIGNATURE_RULE, SIGNATURE_CAPTION] {
            let y = self.cursor.y;
            self.text_cell(x, y, w, 10.0, line, StandardFont::Helvetica, 11.0, Align::Center);
            self.cursor.advance(10.0);
        }
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout {
            geometry: self.cursor.geometry,
            pages: self.pages,
            images: self.images,
        }
    }
}

fn equipment_rows(e: &Equipment) -> [(&'static str, &str); 5] {
    [
        ("Nombre del Equipo", e.name.as_str()),
        ("Marca", e.brand.as_str()),
        ("Modelo", e.model.as_str()),
        ("N° de serie", e.serial_number.as_str()),
        ("Accesorios incluidos", e.accessories.as_str()),
    ]
}

fn origin_rows(o: &OriginSite) -> [(&'static str, &str); 6] {
    [
        ("Sede", o.site.as_str()),
        ("Sala", o.room.as_str()),
        ("N° de piso", o.floor.as_str()),
        ("Fecha traslado", o.transfer_date.as_str()),
        ("Motivo del traslado", o.transfer_reason.as_str()),
        ("Responsable que autoriza el traslado", o.authorized_by.as_str()),
    ]
}

fn destination_rows(d: &DestinationSite) -> [(&'static str, &str); 5] {
    [
        ("Sede", d.site.as_str()),
        ("Sala", d.room.as_str()),
        ("N° de piso", d.floor.as_str()),
        ("Fecha de recepción", d.reception_date.as_str()),
        ("Responsable que recibirá el equipo", d.received_by.as_str()),
    ]
}

fn transport_rows(t: &Transport) -> [(&'static str, &str); 4] {
    [
        ("Medio de transporte", t.mode.as_str()),
        ("Empresa/ persona encargada del traslado", t.carrier.as_str()),
        ("Patente del vehículo si aplica", t.vehicle_plate.as_str()),
        ("Hora de salida y estimada de llegada", t.schedule.as_str()),
    ]
}

fn observation_rows(o: &Observations) -> [(&'static str, &str); 1] {
    [("Observaciones sobre embalaje", o.packaging.as_str())]
}

fn check_encoding(record: &TranslocationRecord) -> Result<(), Error> {
    for (field, value) in record.text_fields() {
        if let Some(character) = value.chars().find(|&c| !is_encodable(c)) {
            return Err(Error::UnsupportedText { field, character });
        }
    }
    Ok(())
}

/// Read and decode the header logo. A missing or unreadable logo only means
/// the header is drawn without it.
fn load_logo(options: &RenderOptions) -> Option<DecodedImage> {
    let path = options.logo_path.as_ref()?;
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no logo at {}", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("cannot read logo {}: {e}", path.display());
            return None;
        }
    };
    match DecodedImage::decode(&data) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("logo {} is not a usable image, omitting it: {e}", path.display());
            None
        }
    }
}

/// Position every element of the transfer sheet.
pub fn layout(
    record: &TranslocationRecord,
    options: &RenderOptions,
) -> Result<DocumentLayout, Error> {
    check_encoding(record)?;

    let mut r = Renderer::new(PageGeometry::A4_PORTRAIT, load_logo(options));
    let attachments = &record.attachments;

    r.table_section(Some("EQUIPO"), &equipment_rows(&record.equipment));
    r.side_by_side(
        (
            "Fotografía del Equipo",
            AttachmentField::EquipmentPhoto,
            &attachments.equipment_photo,
        ),
        (
            "Fotografía del Embalaje",
            AttachmentField::PackagingPhoto,
            &attachments.packaging_photo,
        ),
    )?;

    // Followed by the origin heading and at least one of its rows.
    r.heading("DATOS DEL TRASLADO", HEADING_ADVANCE + 8.0);
    r.table_section(Some("1. Centro de origen"), &origin_rows(&record.origin));
    r.table_section(
        Some("2. Centro de destino"),
        &destination_rows(&record.destination),
    );
    r.table_section(
        Some("3. Datos del transporte"),
        &transport_rows(&record.transport),
    );
    r.table_section(
        Some("4. Observaciones"),
        &observation_rows(&record.observations),
    );

    r.single_image(
        "Foto del Voucher del transporte",
        AttachmentField::VoucherPhoto,
        &attachments.voucher_photo,
    )?;

    r.signature(&record.signature);

    Ok(r.finish())
}
