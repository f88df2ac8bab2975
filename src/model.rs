use std::fmt;

use serde::Deserialize;

/// An optional image supplied with the record. Every optional visual element
/// (the three photos and the header logo) goes through this type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Attachment {
    Present(Vec<u8>),
    #[default]
    Absent,
}

impl Attachment {
    pub fn is_present(&self) -> bool {
        matches!(self, Attachment::Present(_))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Attachment::Present(data) => Some(data),
            Attachment::Absent => None,
        }
    }
}

impl From<Option<Vec<u8>>> for Attachment {
    fn from(data: Option<Vec<u8>>) -> Self {
        data.map_or(Attachment::Absent, Attachment::Present)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachmentField {
    EquipmentPhoto,
    PackagingPhoto,
    VoucherPhoto,
}

impl AttachmentField {
    pub fn name(self) -> &'static str {
        match self {
            AttachmentField::EquipmentPhoto => "equipment_photo",
            AttachmentField::PackagingPhoto => "packaging_photo",
            AttachmentField::VoucherPhoto => "voucher_photo",
        }
    }
}

impl fmt::Display for AttachmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub accessories: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OriginSite {
    pub site: String,
    pub room: String,
    pub floor: String,
    /// `DD-MM-YYYY`
    pub transfer_date: String,
    pub transfer_reason: String,
    pub authorized_by: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DestinationSite {
    pub site: String,
    pub room: String,
    pub floor: String,
    /// `DD-MM-YYYY`
    pub reception_date: String,
    pub received_by: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Transport {
    pub mode: String,
    pub carrier: String,
    pub vehicle_plate: String,
    /// Departure and estimated arrival time, free text.
    pub schedule: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Observations {
    pub packaging: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attachments {
    pub equipment_photo: Attachment,
    pub packaging_photo: Attachment,
    pub voucher_photo: Attachment,
}

/// Form answers for one relocation event. Text fields are never missing:
/// anything the collector did not receive is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslocationRecord {
    pub equipment: Equipment,
    pub origin: OriginSite,
    pub destination: DestinationSite,
    pub transport: Transport,
    pub observations: Observations,
    pub attachments: Attachments,
    /// Name and RUT of the origin site's responsible party, printed above the
    /// signature rule.
    pub signature: String,
}

impl TranslocationRecord {
    /// Every text field with a stable dotted name, in render order.
    pub fn text_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("equipment.name", self.equipment.name.as_str()),
            ("equipment.brand", self.equipment.brand.as_str()),
            ("equipment.model", self.equipment.model.as_str()),
            ("equipment.serial_number", self.equipment.serial_number.as_str()),
            ("equipment.accessories", self.equipment.accessories.as_str()),
            ("origin.site", self.origin.site.as_str()),
            ("origin.room", self.origin.room.as_str()),
            ("origin.floor", self.origin.floor.as_str()),
            ("origin.transfer_date", self.origin.transfer_date.as_str()),
            ("origin.transfer_reason", self.origin.transfer_reason.as_str()),
            ("origin.authorized_by", self.origin.authorized_by.as_str()),
            ("destination.site", self.destination.site.as_str()),
            ("destination.room", self.destination.room.as_str()),
            ("destination.floor", self.destination.floor.as_str()),
            ("destination.reception_date", self.destination.reception_date.as_str()),
            ("destination.received_by", self.destination.received_by.as_str()),
            ("transport.mode", self.transport.mode.as_str()),
            ("transport.carrier", self.transport.carrier.as_str()),
            ("transport.vehicle_plate", self.transport.vehicle_plate.as_str()),
            ("transport.schedule", self.transport.schedule.as_str()),
            ("observations.packaging", self.observations.packaging.as_str()),
            ("signature", self.signature.as_str()),
        ]
    }
}
