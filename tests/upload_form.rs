//! Submission lifecycle against an in-process fake service.
//!
//! No network: the fake counts calls and returns a canned outcome, so these
//! tests pin down exactly when a request is (and is not) issued.

use pdf_highlighter::{
    BannerKind, FormNotice, HighlightRequest, HighlightResponse, HighlightService, SelectedFile,
    SubmissionStatus, SubmitError, UploadForm,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ── Test helpers ─────────────────────────────────────────────────────────────

struct FakeService {
    calls: AtomicUsize,
    outcome: Result<HighlightResponse, SubmitError>,
    seen: Mutex<Vec<(String, u64, String)>>,
}

impl FakeService {
    fn answering(outcome: Result<HighlightResponse, SubmitError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn ok(url: &str) -> Self {
        Self::answering(Ok(HighlightResponse {
            file_url: url.to_string(),
        }))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HighlightService for FakeService {
    async fn highlight(&self, request: &HighlightRequest) -> Result<HighlightResponse, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((
            request.file.name().to_string(),
            request.file.size(),
            request.reading_time.clone(),
        ));
        self.outcome.clone()
    }
}

fn report_pdf() -> SelectedFile {
    SelectedFile::from_bytes("report.pdf", vec![b'%'; 500 * 1024]).unwrap()
}

const RESULT_URL: &str = "https://host/out/report_highlighted.pdf";

// ── Preconditions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn no_file_means_no_request() {
    let service = FakeService::ok(RESULT_URL);
    let mut form = UploadForm::new();
    form.set_reading_time("10");

    let err = form.submit(&service).await.unwrap_err();
    assert_eq!(err, FormNotice::MissingFile);
    assert_eq!(service.calls(), 0);
    assert_eq!(form.status(), &SubmissionStatus::Idle);
}

#[tokio::test]
async fn empty_reading_time_means_no_request() {
    let service = FakeService::ok(RESULT_URL);
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();

    let err = form.submit(&service).await.unwrap_err();
    assert_eq!(err, FormNotice::MissingReadingTime);
    assert_eq!(service.calls(), 0);
    assert!(!form.view().submit_enabled);
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn success_exposes_download_link() {
    let service = FakeService::ok(RESULT_URL);
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");

    let status = form.submit(&service).await.unwrap().clone();
    assert_eq!(status, SubmissionStatus::Succeeded("Done!".into()));
    assert_eq!(service.calls(), 1);
    assert_eq!(
        service.seen.lock().unwrap()[0],
        ("report.pdf".to_string(), 512_000, "10".to_string())
    );

    assert_eq!(form.result_reference(), Some(RESULT_URL));
    let view = form.view();
    assert_eq!(view.banner.unwrap().text, "Done!");
    assert_eq!(view.download.unwrap().href, RESULT_URL);
}

#[tokio::test]
async fn server_error_shows_status_and_no_link() {
    let service = FakeService::answering(Err(SubmitError::Server { status: 500 }));
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");

    form.submit(&service).await.unwrap();
    assert!(matches!(form.status(), SubmissionStatus::Failed(msg) if msg.contains("500")));
    assert!(form.result_reference().is_none());

    let view = form.view();
    assert_eq!(view.banner.unwrap().kind, BannerKind::Error);
    assert!(view.download.is_none());
}

#[tokio::test]
async fn transport_error_has_a_message() {
    let service = FakeService::answering(Err(SubmitError::Transport(
        "error sending request: connection refused".into(),
    )));
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("3");

    form.submit(&service).await.unwrap();
    let label = form.status().label();
    assert!(label.starts_with("Error: "), "got: {label}");
    assert!(label.len() > "Error: ".len());
    assert!(form.result_reference().is_none());
}

#[tokio::test]
async fn malformed_success_is_a_failure() {
    let service = FakeService::answering(Err(SubmitError::MalformedResponse(
        "missing field `file_url`".into(),
    )));
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");

    form.submit(&service).await.unwrap();
    assert!(matches!(form.status(), SubmissionStatus::Failed(_)));
    assert!(form.view().download.is_none());
}

// ── In-flight guard and re-entry ─────────────────────────────────────────────

#[tokio::test]
async fn no_second_request_while_processing() {
    let service = FakeService::ok(RESULT_URL);
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");

    let pending = form.begin_submit().unwrap();
    assert!(!form.view().submit_enabled);

    let err = form.submit(&service).await.unwrap_err();
    assert_eq!(err, FormNotice::Busy);
    assert_eq!(service.calls(), 0);

    let outcome = service.highlight(&pending).await;
    form.finish_submit(outcome);
    assert_eq!(service.calls(), 1);
    assert_eq!(form.result_reference(), Some(RESULT_URL));
}

#[tokio::test]
async fn new_file_keeps_old_result_until_resubmit() {
    let first = FakeService::ok(RESULT_URL);
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");
    form.submit(&first).await.unwrap();

    form.select_file(SelectedFile::from_bytes("slides.pdf", vec![0; 10]).unwrap())
        .unwrap();
    assert_eq!(form.result_reference(), Some(RESULT_URL));
    assert!(matches!(form.status(), SubmissionStatus::Succeeded(_)));

    let failing = FakeService::answering(Err(SubmitError::Server { status: 503 }));
    form.submit(&failing).await.unwrap();
    assert!(form.result_reference().is_none());
    assert_eq!(failing.seen.lock().unwrap()[0].0, "slides.pdf");
}

#[tokio::test]
async fn failed_form_resubmits_without_reset() {
    let failing = FakeService::answering(Err(SubmitError::Server { status: 500 }));
    let mut form = UploadForm::new();
    form.select_file(report_pdf()).unwrap();
    form.set_reading_time("10");
    form.submit(&failing).await.unwrap();
    assert!(form.view().submit_enabled);

    let ok = FakeService::ok(RESULT_URL);
    form.submit(&ok).await.unwrap();
    assert_eq!(form.status().label(), "Done!");
    assert_eq!(form.result_reference(), Some(RESULT_URL));
}
