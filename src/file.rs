//! Picking a local PDF: the file-picker half of the form.
//!
//! The picker only admits `application/pdf`. Like a browser `accept=`
//! filter, the type comes from the file name; content starting with the
//! `%PDF` magic is accepted too so renamed downloads still go through.
//! Nothing deeper is validated here — the service owns PDF parsing.

use crate::error::HighlightError;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// The only MIME type the picker accepts.
pub const PDF_MIME: &str = "application/pdf";

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// A locally picked PDF held in memory until it is uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    data: Vec<u8>,
}

impl SelectedFile {
    /// Wrap in-memory bytes, applying the PDF type filter.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self, HighlightError> {
        let name = name.into();
        if !is_pdf(&name, &data) {
            return Err(HighlightError::NotAPdf { name });
        }
        Ok(Self { name, data })
    }

    /// Read a file from disk and apply the PDF type filter.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, HighlightError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => HighlightError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => HighlightError::FileNotFound {
                path: path.to_path_buf(),
            },
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        debug!("Picked {} ({} bytes)", name, data.len());
        Self::from_bytes(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Size as the form displays it, e.g. `"500.0 KB"`.
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.size() as f64 / 1024.0)
    }

    pub fn mime(&self) -> &'static str {
        PDF_MIME
    }
}

// Keep the payload out of logs.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

fn is_pdf(name: &str, data: &[u8]) -> bool {
    let by_extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    by_extension || data.starts_with(PDF_MAGIC)
}
