//! Decides how a downloaded receipt is previewed.

use crate::Receipt;

/// How a receipt can be previewed, based on its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    /// Shown in an embedded PDF viewer.
    Pdf,
    /// Shown as an image.
    Image,
    /// Shown as decoded text.
    Text,
    /// No preview is available.
    Other,
}

impl ReceiptKind {
    /// Classify `mime_type` by the first of "pdf", "image" or "text" it contains.
    pub fn from_mime_type(mime_type: &str) -> Self {
        let mime_type = mime_type.to_ascii_lowercase();

        if mime_type.contains("pdf") {
            ReceiptKind::Pdf
        } else if mime_type.contains("image") {
            ReceiptKind::Image
        } else if mime_type.contains("text") {
            ReceiptKind::Text
        } else {
            ReceiptKind::Other
        }
    }
}

/// A receipt opened in the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    /// How the receipt is previewed.
    pub kind: ReceiptKind,
    /// The receipt as downloaded.
    pub receipt: Receipt,
    /// The decoded contents of a text receipt. Invalid UTF-8 is replaced.
    pub text: Option<String>,
    /// Whether the viewer is shown on top of the create/edit form.
    pub over_form: bool,
}

impl ReceiptView {
    /// Open `receipt` in the viewer.
    pub fn new(receipt: Receipt, over_form: bool) -> Self {
        let kind = ReceiptKind::from_mime_type(&receipt.mime_type);
        let text = (kind == ReceiptKind::Text)
            .then(|| String::from_utf8_lossy(&receipt.data).into_owned());

        Self {
            kind,
            receipt,
            text,
            over_form,
        }
    }
}
