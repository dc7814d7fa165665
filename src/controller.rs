//! The upload form controller.
//!
//! [`UploadForm`] owns the four pieces of form state and the submit action:
//!
//! ```text
//!                 begin_submit()               finish_submit(Ok)
//!   Idle ───────────────────────▶ Processing ──────────────────────▶ Succeeded
//!                                  │      ▲                             │
//!              finish_submit(Err)  │      │  begin_submit()             │
//!                                  ▼      │                             │
//!                                Failed ──┴─────────────────────────────┘
//! ```
//!
//! The network suspension is explicit: [`UploadForm::begin_submit`] moves to
//! `Processing` and hands back the request to send, [`UploadForm::finish_submit`]
//! applies whatever came back. [`UploadForm::submit`] chains the two around a
//! single [`HighlightService`] call. Between the two halves the form stays
//! usable (reading time can be edited) but refuses a second submission and
//! any file change.

use crate::error::{FormNotice, SubmitError};
use crate::file::SelectedFile;
use crate::service::{HighlightRequest, HighlightResponse, HighlightService};
use crate::view::FormView;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Status label while a submission is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Status label after a successful submission.
pub const SUCCESS_LABEL: &str = "Done!";

/// Where the form is in the submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Processing,
    /// Carries the success label.
    Succeeded(String),
    /// Carries `"Error: <cause>"`.
    Failed(String),
}

impl SubmissionStatus {
    /// The text a status banner shows. Empty when idle.
    pub fn label(&self) -> &str {
        match self {
            SubmissionStatus::Idle => "",
            SubmissionStatus::Processing => PROCESSING_LABEL,
            SubmissionStatus::Succeeded(msg) | SubmissionStatus::Failed(msg) => msg,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, SubmissionStatus::Processing)
    }
}

/// Form state plus the submit action. One instance per form; no shared state.
#[derive(Debug, Default)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    reading_time: String,
    status: SubmissionStatus,
    result: Option<String>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Inputs ───────────────────────────────────────────────────────────

    /// Pick a file. Refused while a submission is in flight.
    ///
    /// Does not touch the status or a previous result reference; those only
    /// change when the next submission starts.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), FormNotice> {
        if self.status.is_processing() {
            return Err(FormNotice::Busy);
        }
        debug!("Selected {:?}", file);
        self.file = Some(file);
        Ok(())
    }

    /// Drop the picked file, returning it. Refused while processing.
    pub fn remove_file(&mut self) -> Result<Option<SelectedFile>, FormNotice> {
        if self.status.is_processing() {
            return Err(FormNotice::Busy);
        }
        Ok(self.file.take())
    }

    /// Replace the reading-time text. No parsing happens here.
    pub fn set_reading_time(&mut self, text: impl Into<String>) {
        self.reading_time = text.into();
    }

    // ── Observers ────────────────────────────────────────────────────────

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn reading_time(&self) -> &str {
        &self.reading_time
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Where the highlighted PDF lives; only set after a success.
    pub fn result_reference(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Why a submit would be refused right now, if it would.
    pub fn check_ready(&self) -> Result<(), FormNotice> {
        if self.status.is_processing() {
            return Err(FormNotice::Busy);
        }
        if self.file.is_none() {
            return Err(FormNotice::MissingFile);
        }
        if self.reading_time.is_empty() {
            return Err(FormNotice::MissingReadingTime);
        }
        Ok(())
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.check_ready().is_ok()
    }

    pub fn view(&self) -> FormView {
        FormView::from(self)
    }

    // ── Submit ───────────────────────────────────────────────────────────

    /// First half of a submission: enter `Processing` and return the request.
    ///
    /// On refusal nothing changes and no request must be sent.
    pub fn begin_submit(&mut self) -> Result<HighlightRequest, FormNotice> {
        self.check_ready()?;
        let file = self.file.clone().ok_or(FormNotice::MissingFile)?;

        self.result = None;
        self.status = SubmissionStatus::Processing;

        Ok(HighlightRequest {
            file,
            reading_time: self.reading_time.clone(),
        })
    }

    /// Second half of a submission: apply the round-trip outcome.
    ///
    /// Returns `false` (and changes nothing) when no submission is in flight.
    pub fn finish_submit(&mut self, outcome: Result<HighlightResponse, SubmitError>) -> bool {
        if !self.status.is_processing() {
            warn!("Dropping submission outcome: no submission in flight");
            return false;
        }

        match outcome {
            Ok(response) => {
                info!("Highlighted PDF ready at {}", response.file_url);
                self.result = Some(response.file_url);
                self.status = SubmissionStatus::Succeeded(SUCCESS_LABEL.to_string());
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.result = None;
                self.status = SubmissionStatus::Failed(format!("Error: {e}"));
            }
        }
        true
    }

    /// Run a whole submission against `service`.
    ///
    /// Refusals come back as `Err(FormNotice)` without any request. Every
    /// network outcome, good or bad, ends up in [`UploadForm::status`].
    pub async fn submit<S: HighlightService>(
        &mut self,
        service: &S,
    ) -> Result<&SubmissionStatus, FormNotice> {
        let request = self.begin_submit()?;
        let outcome = service.highlight(&request).await;
        self.finish_submit(outcome);
        Ok(&self.status)
    }
}
