//! CLI binary for md2docx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use md2docx::{
    convert, ConversionConfig, ConversionProgressCallback, ProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
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
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file log
/// lines using [indicatif]. The bar length is set once discovery completes.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_run_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Walking input directory…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_files} Markdown files…"))
        ));
    }

    fn on_file_start(&self, _file_num: usize, _total: usize, relative: &str) {
        self.bar.set_message(relative.to_string());
    }

    fn on_file_complete(&self, file_num: usize, total: usize, relative: &str, blocks: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            green("✓"),
            file_num,
            total,
            relative,
            dim(&format!("{blocks} blocks")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_num: usize, total: usize, relative: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = if error.chars().count() > 80 {
            let head: String = error.chars().take(79).collect();
            format!("{head}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            file_num,
            total,
            relative,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} files converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files converted  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a documentation tree
  md2docx docs/ output/

  # Tighter download timeout, narrower images
  md2docx --download-timeout 10 --image-width 4.0 docs/ output/

  # Localized caption labels
  md2docx --figure-label Abbildung docs/ output/

  # Structured result for scripting
  md2docx --json --no-progress docs/ output/ > run.json

WHAT GETS CONVERTED:
  The first non-blank line of each file becomes the document title.
  ####-prefixed and **bold** lines become level-2 headings, ::: lines
  become callout paragraphs, <u>...</u> markup is stripped, local images
  are embedded at a fixed width with numbered captions, and [text](x.pdf)
  attachments are downloaded or copied next to the generated document.
  Tables, nested lists, code blocks, and blockquotes are not supported.

FAILURE MODEL:
  A file that cannot be read or written is logged and skipped; a PDF or
  image that cannot be fetched is logged and skipped. Only a missing
  input directory aborts the run.
"#;

/// Convert a directory of Markdown files to Word documents.
#[derive(Parser, Debug)]
#[command(
    name = "md2docx",
    version,
    about = "Batch-convert directories of Markdown files to Word documents",
    long_about = "Walk an input directory recursively, convert every Markdown file to a .docx \
document at the mirrored output path, embed local images, and localize referenced PDF \
attachments next to each generated document.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory scanned recursively for .md files.
    input_dir: PathBuf,

    /// Directory receiving the mirrored .docx tree.
    output_dir: PathBuf,

    /// HTTP timeout for PDF downloads in seconds.
    #[arg(long, env = "MD2DOCX_DOWNLOAD_TIMEOUT", default_value_t = 30)]
    download_timeout: u64,

    /// Display width for embedded images, in inches.
    #[arg(long, env = "MD2DOCX_IMAGE_WIDTH", default_value_t = 5.0)]
    image_width: f64,

    /// Caption prefix for embedded images.
    #[arg(long, env = "MD2DOCX_FIGURE_LABEL", default_value = "Figure")]
    figure_label: String,

    /// Output the structured run result as JSON instead of a summary.
    #[arg(long, env = "MD2DOCX_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "MD2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2DOCX_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
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

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder(&cli.input_dir, &cli.output_dir)
        .download_timeout_secs(cli.download_timeout)
        .image_width_inches(cli.image_width)
        .figure_label(&cli.figure_label);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let run = convert(&config).await.context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&run).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled;
        // otherwise the callback already printed the final tick.
        eprintln!(
            "Converted {}/{} files in {}ms",
            run.stats.converted_files, run.stats.total_files, run.stats.total_duration_ms
        );
        if run.stats.failed_files > 0 {
            eprintln!("  {} files failed", run.stats.failed_files);
        }
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "   {} PDFs localized ({} downloaded, {} copied, {} skipped)  /  {} images embedded ({} skipped)",
            dim(&(run.stats.pdfs_downloaded + run.stats.pdfs_copied).to_string()),
            run.stats.pdfs_downloaded,
            run.stats.pdfs_copied,
            run.stats.pdfs_skipped,
            dim(&run.stats.images_embedded.to_string()),
            run.stats.images_skipped,
        );
        eprintln!("   output: {}", bold(&cli.output_dir.display().to_string()));
    }

    if run.stats.failed_files > 0 && run.stats.converted_files == 0 && run.stats.total_files > 0 {
        anyhow::bail!("all {} files failed to convert", run.stats.total_files);
    }

    Ok(())
}
