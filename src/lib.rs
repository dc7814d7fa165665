//! # pdf-highlighter
//!
//! Client for a PDF highlighting service: pick a PDF, ask for a reading
//! time in minutes, upload both, and get back a link to a copy of the PDF
//! with the sentences worth reading in that time highlighted.
//!
//! The highlighting itself (text extraction, sentence selection, PDF
//! annotation) happens on the service. This crate owns the client side:
//!
//! ```text
//! SelectedFile + reading time
//!  │
//!  ├─ 1. UploadForm::begin_submit   preconditions, enter Processing
//!  ├─ 2. HighlightService           POST /highlight (multipart: file, reading_time)
//!  ├─ 3. UploadForm::finish_submit  Succeeded(file_url) | Failed(cause)
//!  └─ 4. FormView                   banner + download link for rendering
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_highlighter::{ClientConfig, HttpHighlightService, SelectedFile, UploadForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = HttpHighlightService::new(ClientConfig::default())?;
//!
//!     let mut form = UploadForm::new();
//!     form.select_file(SelectedFile::open("report.pdf").await?)?;
//!     form.set_reading_time("10");
//!
//!     form.submit(&service).await?;
//!     if let Some(url) = form.result_reference() {
//!         println!("highlighted PDF: {url}");
//!     } else {
//!         eprintln!("{}", form.status().label());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-highlight` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod controller;
pub mod error;
pub mod file;
pub mod service;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use controller::{SubmissionStatus, UploadForm, PROCESSING_LABEL, SUCCESS_LABEL};
pub use error::{FormNotice, HighlightError, SubmitError};
pub use file::{SelectedFile, PDF_MIME};
pub use service::{
    HealthStatus, HighlightRequest, HighlightResponse, HighlightService, HttpHighlightService,
};
pub use view::{BannerKind, DownloadLink, FileSummary, FormView, StatusBanner};
