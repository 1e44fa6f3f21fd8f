//! Wire schema for the chat webhook.
//!
//! Text messages go out as JSON, file uploads as a multipart form. Both get
//! the same reply contract: a 2xx response whose JSON body carries the
//! assistant text in `output` (or the older `out`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::session::SessionId;

/// Accepted reply field names, in priority order.
pub const REPLY_FIELDS: [&str; 2] = ["output", "out"];

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Network(String),

    /// The webhook answered with a non-2xx status.
    #[error("webhook responded with status {status}")]
    Status { status: u16 },

    /// A 2xx body carried no recognized reply field.
    #[error("response carried no reply field")]
    MissingReply,

    #[error("payload encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("timestamp format failed: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Another request is still in flight and overlapping sends are disabled.
    #[error("a reply is already pending")]
    Busy,

    /// None of the picked files could be read, so nothing was sent.
    #[error("no readable files: {0}")]
    Unreadable(String),
}

/// A picked file whose contents could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("could not read {name}: {reason}")]
pub struct FileReadError {
    pub name: String,
    pub reason: String,
}

impl FileReadError {
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { name: name.into(), reason: reason.into() }
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    File,
}

impl MessageType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

/// JSON body of a text message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextPayload {
    pub session_id: SessionId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub timestamp: String,
}

impl TextPayload {
    #[must_use]
    pub fn new(session_id: SessionId, message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self { session_id, message: message.into(), kind: MessageType::Text, timestamp: timestamp.into() }
    }
}

/// A file picked by the user, read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), mime: None, bytes }
    }

    /// Set the declared MIME type. Browsers report unknown types as `""`.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        self.mime = (!mime.is_empty()).then_some(mime);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(Attachment),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

/// Transport-neutral multipart body; field order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart { name: name.into(), value: FormValue::Text(value.into()) });
    }

    pub fn file(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.parts.push(FormPart { name: name.into(), value: FormValue::File(attachment) });
    }

    #[must_use]
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find(|p| p.name == name).and_then(|p| match &p.value {
            FormValue::Text(v) => Some(v.as_str()),
            FormValue::File(_) => None,
        })
    }

    #[must_use]
    pub fn get_file(&self, name: &str) -> Option<&Attachment> {
        self.parts.iter().find(|p| p.name == name).and_then(|p| match &p.value {
            FormValue::File(a) => Some(a),
            FormValue::Text(_) => None,
        })
    }
}

/// Build the upload form: session fields, `file_count`, then
/// `file_<i>` / `file_name_<i>` for each attachment in input order.
#[must_use]
pub fn upload_form(session_id: &SessionId, timestamp: &str, files: &[Attachment]) -> MultipartForm {
    let mut form = MultipartForm::default();
    form.text("session_id", session_id.as_str());
    form.text("type", MessageType::File.as_str());
    form.text("timestamp", timestamp);
    form.text("file_count", files.len().to_string());
    for (i, file) in files.iter().enumerate() {
        form.file(format!("file_{i}"), file.clone());
        form.text(format!("file_name_{i}"), file.name.clone());
    }
    form
}

/// File names joined with `", "` in input order.
#[must_use]
pub fn file_names(files: &[Attachment]) -> String {
    files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ")
}

/// Current UTC time as RFC 3339, e.g. `2026-10-17T09:30:00.123Z`.
///
/// # Errors
///
/// Returns an error if the clock reports a year outside RFC 3339's range.
pub fn timestamp_now() -> Result<String, DispatchError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Format `at` as RFC 3339.
///
/// # Errors
///
/// Returns [`DispatchError::Timestamp`] for years outside `0..=9999`.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, DispatchError> {
    Ok(at.format(&Rfc3339)?)
}

// =============================================================================
// INBOUND
// =============================================================================

/// Status and raw body of a webhook response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Pass 2xx responses through; anything else becomes [`DispatchError::Status`].
    ///
    /// # Errors
    ///
    /// Returns an error for any non-2xx status.
    pub fn ensure_success(self) -> Result<Self, DispatchError> {
        if self.is_success() { Ok(self) } else { Err(DispatchError::Status { status: self.status }) }
    }
}

/// Extract the assistant text from a response body.
///
/// The body must be JSON. An object is checked for each of [`REPLY_FIELDS`]
/// and the first non-empty string wins. A top-level array (workflows that
/// respond with all items) is searched through its first element.
#[must_use]
pub fn extract_reply(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let item = match &value {
        serde_json::Value::Array(items) => items.first()?,
        other => other,
    };
    REPLY_FIELDS
        .iter()
        .filter_map(|field| item.get(field)?.as_str())
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}
