//! CLI binary for pdf2md-text.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2md_text::{
    convert, convert_to_file, inspect, output_file_name, ConversionConfig,
    ConversionProgressCallback, ProgressCallback, ProgressEvent, ProgressStatus,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner until the page count is known, then
/// a bar advanced by each `Processing` event.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: u32) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(u64::from(total));
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_progress(&self, event: &ProgressEvent) {
        match event.status {
            ProgressStatus::Processing => {
                if self.bar.length() != Some(u64::from(event.total_pages)) {
                    self.activate_bar(event.total_pages);
                }
                self.bar.set_position(u64::from(event.current_page));
            }
            ProgressStatus::Completed | ProgressStatus::Error => {
                self.bar.finish_and_clear();
                if let Some(line) = terminal_line(event) {
                    eprintln!("{line}");
                }
            }
        }
    }
}

/// Summary printed when the bar closes. Failures print nothing here: the
/// error is returned from `main` and reported once by anyhow.
fn terminal_line(event: &ProgressEvent) -> Option<String> {
    match event.status {
        ProgressStatus::Completed => Some(format!(
            "{} {} pages converted",
            green("✔"),
            bold(&event.total_pages.to_string())
        )),
        ProgressStatus::Processing | ProgressStatus::Error => None,
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout)
  pdf2md report.pdf

  # Convert to file
  pdf2md report.pdf -o report.md

  # Write <name>.md into a directory
  pdf2md report.pdf --output-dir completed/

  # Convert from URL
  pdf2md https://arxiv.org/pdf/1706.03762 -o attention.md

  # Inspect page count and metadata
  pdf2md --inspect-only report.pdf

  # JSON output (markdown + page count + file name)
  pdf2md --json report.pdf > output.json

HEURISTICS:
  Headings   upper-case lines (A-Z, 0-9, spaces) and lines followed by a blank line
  Lists      "•", "-", "*" bullets → "- ";  "1)" → "1."
  Tables     two or more consecutive tab-delimited lines

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Directory or file of an existing libpdfium
  RUST_LOG                Override log filter (e.g. pdf2md_text=debug)
"#;

/// Reconstruct Markdown from the text layer of PDF files and URLs.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2md",
    version,
    about = "Reconstruct Markdown from the text layer of PDF files and URLs",
    long_about = "Extract the text layer of a PDF (local file or URL) and rebuild headings, \
lists and tab-delimited tables as Markdown. No OCR, no layout analysis: structure is inferred \
from the text lines alone.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write Markdown to this file instead of stdout.
    #[arg(short, long, env = "PDF2MD_OUTPUT", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write Markdown to <DIR>/<name>.md.
    #[arg(long, env = "PDF2MD_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2MD_PASSWORD")]
    password: Option<String>,

    /// Directory or file of the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Delay between per-page progress events, in milliseconds.
    #[arg(long, env = "PDF2MD_PAGE_DELAY_MS", default_value_t = 0)]
    page_delay_ms: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "PDF2MD_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Output structured JSON instead of Markdown.
    #[arg(long, env = "PDF2MD_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Print page count and metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar provides all the feedback that matters; keep library
    // INFO logs out of its way unless --verbose is set.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input, &config)
            .await
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", meta.file_name);
            println!("Size:         {} bytes", meta.size_bytes);
            println!("Pages:        {}", meta.info.total_pages);
            if let Some(ref t) = meta.info.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.info.author {
                println!("Author:       {}", a);
            }
            if let Some(ref p) = meta.info.producer {
                println!("Producer:     {}", p);
            }
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(output_path) = output_target(&cli) {
        let doc = convert_to_file(&cli.input, &output_path, &config)
            .await
            .context("Conversion failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} pages  →  {}",
                green("✔"),
                doc.total_pages,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let doc = convert(&cli.input, &config)
            .await
            .context("Conversion failed")?;

        if cli.json {
            let json = serde_json::to_string_pretty(&doc).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(doc.markdown.as_bytes())
                .context("Failed to write to stdout")?;
            if !doc.markdown.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        if !cli.quiet && !show_progress && !cli.json {
            eprintln!(
                "{}",
                dim(&format!("Converted {} pages ({})", doc.total_pages, doc.file_name))
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .page_delay_ms(cli.page_delay_ms)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref path) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(path);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Resolve `-o` / `--output-dir` to a concrete file path.
fn output_target(cli: &Cli) -> Option<PathBuf> {
    if let Some(ref path) = cli.output {
        return Some(path.clone());
    }
    cli.output_dir
        .as_ref()
        .map(|dir| dir.join(output_file_name(&input_file_name(&cli.input))))
}

/// Last path (or URL path) segment of the input.
fn input_file_name(input: &str) -> String {
    let trimmed = input.split(['?', '#']).next().unwrap_or(input);
    Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_file_name_from_path_and_url() {
        assert_eq!(input_file_name("/tmp/report.pdf"), "report.pdf");
        assert_eq!(input_file_name("https://x.org/a/b.pdf?dl=1"), "b.pdf");
        assert_eq!(input_file_name("/"), "document.pdf");
    }

    #[test]
    fn output_dir_uses_md_name() {
        let cli = Cli::parse_from(["pdf2md", "in/report.pdf", "--output-dir", "completed"]);
        assert_eq!(
            output_target(&cli),
            Some(PathBuf::from("completed").join("report.md"))
        );
    }

    #[test]
    fn only_completion_prints_a_summary() {
        let done = terminal_line(&ProgressEvent::completed(3)).unwrap();
        assert!(done.contains("pages converted"));
        assert!(terminal_line(&ProgressEvent::error(3, "disk full")).is_none());
        assert!(terminal_line(&ProgressEvent::processing(1, 3)).is_none());
    }

    #[test]
    fn output_and_output_dir_conflict() {
        let r = Cli::try_parse_from(["pdf2md", "a.pdf", "-o", "x.md", "--output-dir", "d"]);
        assert!(r.is_err());
    }
}
