use std::path::PathBuf;

use thiserror::Error;

use crate::model::AttachmentField;

/// Each variant's message describes only its own layer; the underlying cause
/// is reachable through `source()`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("attachment `{field}` is not a decodable image")]
    AttachmentDecode {
        field: AttachmentField,
        #[source]
        source: image::ImageError,
    },

    /// The output uses WinAnsi-encoded standard fonts; text outside that
    /// character set cannot be drawn.
    #[error("field `{field}` contains {character:?}, which has no WinAnsi encoding")]
    UnsupportedText {
        field: &'static str,
        character: char,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("invalid record description")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("cannot read attachment {}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
