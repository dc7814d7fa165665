//! CLI binary for pdf-highlighter.
//!
//! A terminal rendering of the upload form: flags fill the form fields,
//! a spinner stands in for the Processing banner, and the final banner
//! plus download link are printed (or emitted as JSON).

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_highlighter::{
    BannerKind, ClientConfig, FormView, HighlightService, HttpHighlightService, SelectedFile,
    UploadForm, DEFAULT_BASE_URL,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Highlight what can be read in 10 minutes
  pdf-highlight report.pdf --minutes 10

  # Save the highlighted copy next to the original
  pdf-highlight report.pdf -m 10 -o report_highlighted.pdf

  # Talk to a service on another host
  pdf-highlight --url https://highlighter.example.com report.pdf -m 5

  # Is the service up?
  pdf-highlight --health-only

  # Machine-readable form state
  pdf-highlight --json report.pdf -m 10

ENVIRONMENT VARIABLES:
  PDF_HIGHLIGHT_URL        Base URL of the highlighting service
  PDF_HIGHLIGHT_MINUTES    Default reading time
  PDF_HIGHLIGHT_TIMEOUT    Upload timeout in seconds (none by default)
  RUST_LOG                 Overrides the log filter
"#;

/// Highlight the sentences of a PDF worth reading in a given time.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-highlight",
    version,
    about = "Upload a PDF to a highlighting service and fetch the highlighted copy",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to upload.
    #[arg(required_unless_present = "health_only")]
    input: Option<PathBuf>,

    /// Target reading time in minutes (≥ 1).
    #[arg(short, long, env = "PDF_HIGHLIGHT_MINUTES",
          required_unless_present = "health_only",
          value_parser = clap::value_parser!(u32).range(1..))]
    minutes: Option<u32>,

    /// Base URL of the highlighting service.
    #[arg(long, env = "PDF_HIGHLIGHT_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Download the highlighted PDF to this path.
    #[arg(short, long, env = "PDF_HIGHLIGHT_OUTPUT")]
    output: Option<PathBuf>,

    /// Upload timeout in seconds. Unbounded when unset.
    #[arg(long, env = "PDF_HIGHLIGHT_TIMEOUT")]
    timeout: Option<u64>,

    /// Result download timeout in seconds.
    #[arg(long, env = "PDF_HIGHLIGHT_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Probe the service before uploading.
    #[arg(long)]
    check_health: bool,

    /// Only probe the service, no upload.
    #[arg(long)]
    health_only: bool,

    /// Print the final form state as JSON.
    #[arg(long, env = "PDF_HIGHLIGHT_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "PDF_HIGHLIGHT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF_HIGHLIGHT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF_HIGHLIGHT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers feedback while processing; keep INFO logs out of it.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let service = HttpHighlightService::new(config).context("Failed to create HTTP client")?;

    // ── Health probe ─────────────────────────────────────────────────────
    if cli.health_only || cli.check_health {
        let health = service
            .check_health()
            .await
            .context("Highlight service is not reachable")?;
        if cli.health_only {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else if !cli.quiet {
                println!("{} {} is {}", green("✔"), cli.url, bold(&health.status));
            }
            return Ok(());
        }
    }

    // ── Fill the form ────────────────────────────────────────────────────
    let input = cli
        .input
        .as_ref()
        .context("An input PDF is required")?;
    let minutes = cli.minutes.context("--minutes is required")?;

    let file = SelectedFile::open(input)
        .await
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let mut form = UploadForm::new();
    form.select_file(file)?;
    form.set_reading_time(minutes.to_string());

    // ── Submit ───────────────────────────────────────────────────────────
    let request = form.begin_submit()?;

    let spinner = show_progress.then(|| processing_spinner(&form.view()));
    let outcome = service.highlight(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    form.finish_submit(outcome);

    let view = form.view();
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialise form state")?
        );
    } else if !cli.quiet {
        render(&view);
    }

    // ── Fetch the result ─────────────────────────────────────────────────
    let Some(file_url) = form.result_reference() else {
        anyhow::bail!("{}", form.status().label());
    };

    if let Some(ref output_path) = cli.output {
        let bytes = service
            .download_result(file_url, output_path)
            .await
            .context("Failed to fetch highlighted PDF")?;
        if !cli.quiet && !cli.json {
            eprintln!(
                "{}  {}  →  {}",
                green("✔"),
                dim(&format!("{bytes} bytes")),
                bold(&output_path.display().to_string()),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut builder = ClientConfig::builder()
        .base_url(cli.url.clone())
        .download_timeout_secs(cli.download_timeout);
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout_secs(secs);
    }
    builder.build().context("Invalid configuration")
}

fn processing_spinner(view: &FormView) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    let text = view
        .banner
        .as_ref()
        .map(|b| b.text.clone())
        .unwrap_or_default();
    spinner.set_prefix(text);
    if let Some(ref file) = view.file {
        spinner.set_message(format!("{} ({})", file.name, file.size_label));
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print the status banner and, on success, the download link.
fn render(view: &FormView) {
    if let Some(ref banner) = view.banner {
        match banner.kind {
            BannerKind::Success => eprintln!("{} {}", green("✔"), green(&banner.text)),
            BannerKind::Error => eprintln!("{} {}", red("✘"), red(&banner.text)),
            BannerKind::Processing => eprintln!("{}", dim(&banner.text)),
        }
    }
    if let Some(ref link) = view.download {
        eprintln!("   {}:", link.label);
        println!("{}", link.href);
    }
}
