//! Binary attachment helpers for edit forms.
//!
//! # Responsibility
//! - Hold the editable content/content-type pair plus its file-input state.
//! - Encode selected files to base64 and report human-readable sizes.
//!
//! # Invariants
//! - `data` and `content_type` are written together: both set or both cleared.
//! - A failed load leaves the field unchanged.

use crate::events::{Alert, AlertBus};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Editable attachment pair as held by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentField {
    /// Base64-encoded content.
    pub data: Option<String>,
    pub content_type: Option<String>,
    /// Value of the file-input widget (selected file name).
    pub input_value: Option<String>,
}

impl AttachmentField {
    pub fn new(data: Option<String>, content_type: Option<String>) -> Self {
        Self {
            data,
            content_type,
            input_value: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.as_deref().map_or(true, str::is_empty)
    }

    /// Human-readable decoded size, `None` when nothing is attached.
    pub fn byte_size(&self) -> Option<String> {
        self.data.as_deref().filter(|d| !d.is_empty()).map(byte_size)
    }
}

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Reads `path` from disk; the caller supplies the MIME type.
    pub fn read(path: impl AsRef<Path>, content_type: &str) -> Result<Self, AttachmentLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(AttachmentLoadError::Io)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            content_type: content_type.to_string(),
            bytes,
        })
    }
}

#[derive(Debug)]
pub enum AttachmentLoadError {
    NotAnImage { content_type: String },
    Empty,
    Io(std::io::Error),
}

impl AttachmentLoadError {
    /// Stable message key for translation lookups.
    pub fn key(&self) -> &'static str {
        match self {
            Self::NotAnImage { .. } => "not.image",
            Self::Empty => "empty.file",
            Self::Io(_) => "read.error",
        }
    }
}

impl Display for AttachmentLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage { content_type } => write!(
                f,
                "File was expected to be an image but was found to be {content_type}"
            ),
            Self::Empty => write!(f, "File is empty"),
            Self::Io(err) => write!(f, "File could not be read: {err}"),
        }
    }
}

impl Error for AttachmentLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Decoded byte length of base64 content, padding excluded.
pub fn decoded_len(base64: &str) -> usize {
    let padding = if base64.ends_with("==") {
        2
    } else if base64.ends_with('=') {
        1
    } else {
        0
    };
    (base64.len() * 3 / 4).saturating_sub(padding)
}

/// Formats the decoded size of base64 content, e.g. `1 024 bytes`.
pub fn byte_size(base64: &str) -> String {
    format!("{} bytes", group_thousands(decoded_len(base64)))
}

/// Decodes attachment content for download/preview.
pub fn decode_attachment(base64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(base64)
}

/// Stores `file` into `field`, replacing both halves of the pair.
pub fn load_attachment(
    field: &mut AttachmentField,
    file: SelectedFile,
    is_image: bool,
) -> Result<(), AttachmentLoadError> {
    if is_image && !file.content_type.starts_with("image/") {
        return Err(AttachmentLoadError::NotAnImage {
            content_type: file.content_type,
        });
    }
    if file.bytes.is_empty() {
        return Err(AttachmentLoadError::Empty);
    }

    field.data = Some(STANDARD.encode(&file.bytes));
    field.content_type = Some(file.content_type);
    field.input_value = Some(file.name);
    Ok(())
}

/// Loads a file picked in the UI and reports failures on the alert bus.
///
/// Returns whether the field was updated. Failures are never fatal to the form.
pub fn set_file_data(
    field: &mut AttachmentField,
    file: Result<SelectedFile, AttachmentLoadError>,
    is_image: bool,
    alerts: &AlertBus,
) -> bool {
    match file.and_then(|file| load_attachment(field, file, is_image)) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                "event=attachment_load module=service status=error error_code={}",
                err.key()
            );
            alerts.broadcast(Alert::error(err.to_string()));
            false
        }
    }
}

/// Clears content, content type and the file-input value together.
pub fn clear_attachment(field: &mut AttachmentField) {
    field.data = None;
    field.content_type = None;
    field.input_value = None;
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}
