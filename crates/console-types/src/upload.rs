//! File payloads forwarded as multipart form data

use std::fmt;

/// A file picked in the browser and forwarded to a backend
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Multipart form field name
    pub field: String,
    /// Original file name
    pub file_name: String,
    /// MIME type reported by the browser
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload for the given form field
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}
