//! Record descriptions as collected by the entry form.
//!
//! A description is a JSON document mirroring [`TranslocationRecord`], with
//! attachments given as file paths instead of image bytes:
//!
//! ```json
//! {
//!   "equipment": { "name": "Monitor Multiparametro", "brand": "Mindray" },
//!   "origin": { "transfer_date": "2024-03-05" },
//!   "attachments": { "voucher_photo": "voucher.jpg" },
//!   "signature": "Juan Perez 12.345.678-9"
//! }
//! ```
//!
//! Missing fields default to empty strings or absent attachments.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Error;
use crate::model::{
    Attachment, Attachments, DestinationSite, Equipment, Observations, OriginSite,
    TranslocationRecord, Transport,
};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AttachmentPaths {
    pub equipment_photo: Option<PathBuf>,
    pub packaging_photo: Option<PathBuf>,
    pub voucher_photo: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordDescription {
    pub equipment: Equipment,
    pub origin: OriginSite,
    pub destination: DestinationSite,
    pub transport: Transport,
    pub observations: Observations,
    pub attachments: AttachmentPaths,
    pub signature: String,
}

impl RecordDescription {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the record: dates normalised, attachment files read relative
    /// to `base_dir`.
    pub fn into_record(self, base_dir: &Path) -> Result<TranslocationRecord, Error> {
        let mut origin = self.origin;
        origin.transfer_date = normalize_date(&origin.transfer_date);
        let mut destination = self.destination;
        destination.reception_date = normalize_date(&destination.reception_date);

        let paths = self.attachments;
        let attachments = Attachments {
            equipment_photo: read_attachment(base_dir, paths.equipment_photo.as_deref())?,
            packaging_photo: read_attachment(base_dir, paths.packaging_photo.as_deref())?,
            voucher_photo: read_attachment(base_dir, paths.voucher_photo.as_deref())?,
        };

        Ok(TranslocationRecord {
            equipment: self.equipment,
            origin,
            destination,
            transport: self.transport,
            observations: self.observations,
            attachments,
            signature: self.signature,
        })
    }
}

fn read_attachment(base_dir: &Path, path: Option<&Path>) -> Result<Attachment, Error> {
    let Some(path) = path else {
        return Ok(Attachment::Absent);
    };
    let path = base_dir.join(path);
    let data = std::fs::read(&path).map_err(|source| Error::Attachment {
        path: path.clone(),
        source,
    })?;
    log::debug!("read attachment {} ({} bytes)", path.display(), data.len());
    Ok(Attachment::Present(data))
}

/// `2024-03-05` (optionally followed by a time) becomes `05-03-2024`.
/// Anything else is returned unchanged.
pub fn normalize_date(value: &str) -> String {
    let trimmed = value.trim();
    let Some(date_part) = trimmed.get(..10) else {
        return value.to_string();
    };
    let rest = &trimmed[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return value.to_string();
    }
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// `Ficha_Traslado_<equipment name>.pdf`, whitespace replaced by `_`.
pub fn output_file_name(record: &TranslocationRecord) -> String {
    let name: String = record
        .equipment
        .name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("Ficha_Traslado_{name}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_are_reordered() {
        assert_eq!(normalize_date("2024-03-05"), "05-03-2024");
        assert_eq!(normalize_date("2024-03-05T14:30:00"), "05-03-2024");
        assert_eq!(normalize_date("2024-03-05 14:30"), "05-03-2024");
    }

    #[test]
    fn other_dates_pass_through() {
        assert_eq!(normalize_date("05-03-2024"), "05-03-2024");
        assert_eq!(normalize_date("5 de marzo"), "5 de marzo");
        assert_eq!(normalize_date("2024-13-40"), "2024-13-40");
        assert_eq!(normalize_date("2024-03-05x"), "2024-03-05x");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("añoañoañoaño"), "añoañoañoaño");
    }

    #[test]
    fn file_name_replaces_whitespace() {
        let mut record = TranslocationRecord::default();
        record.equipment.name = "Monitor Multiparametro  X".into();
        assert_eq!(
            output_file_name(&record),
            "Ficha_Traslado_Monitor_Multiparametro__X.pdf"
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let desc = RecordDescription::from_json(r#"{"equipment": {"name": "Bomba"}}"#).unwrap();
        assert_eq!(desc.equipment.name, "Bomba");
        assert_eq!(desc.equipment.brand, "");
        assert!(desc.attachments.voucher_photo.is_none());
        let record = desc.into_record(Path::new(".")).unwrap();
        assert!(!record.attachments.voucher_photo.is_present());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = RecordDescription::from_json("{").unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }
}
