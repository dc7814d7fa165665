//! What the form renders, as plain data.
//!
//! [`FormView`] is a snapshot projected from an [`UploadForm`]; front ends
//! (the CLI, a web page, a test) draw from it and never read controller
//! internals. It serialises to JSON for `--json` output.

use crate::controller::{SubmissionStatus, UploadForm};
use serde::Serialize;

/// Text of the download control.
pub const DOWNLOAD_LABEL: &str = "Download Highlighted PDF";

/// Snapshot of everything the form shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// The picked file, or `None` while the picker is empty.
    pub file: Option<FileSummary>,
    pub reading_time: String,
    /// Minimum accepted by the reading-time input.
    pub reading_time_min: u32,
    pub submit_enabled: bool,
    /// Hidden while idle.
    pub banner: Option<StatusBanner>,
    /// Only present after a success.
    pub download: Option<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size_bytes: u64,
    /// e.g. `"500.0 KB"`
    pub size_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Processing,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub href: String,
    pub label: &'static str,
    /// Opens in a new browsing context (`target="_blank"`).
    pub new_context: bool,
}

impl From<&UploadForm> for FormView {
    fn from(form: &UploadForm) -> Self {
        let file = form.selected_file().map(|f| FileSummary {
            name: f.name().to_string(),
            size_bytes: f.size(),
            size_label: f.display_size(),
        });

        let banner = match form.status() {
            SubmissionStatus::Idle => None,
            status => {
                let kind = match status {
                    SubmissionStatus::Processing => BannerKind::Processing,
                    SubmissionStatus::Succeeded(_) => BannerKind::Success,
                    _ => BannerKind::Error,
                };
                Some(StatusBanner {
                    kind,
                    text: status.label().to_string(),
                })
            }
        };

        let download = match form.status() {
            SubmissionStatus::Succeeded(_) => form.result_reference().map(|href| DownloadLink {
                href: href.to_string(),
                label: DOWNLOAD_LABEL,
                new_context: true,
            }),
            _ => None,
        };

        FormView {
            file,
            reading_time: form.reading_time().to_string(),
            reading_time_min: 1,
            submit_enabled: form.can_submit(),
            banner,
            download,
        }
    }
}
