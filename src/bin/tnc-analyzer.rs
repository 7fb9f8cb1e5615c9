//! CLI binary for tnc-analyzer.
//!
//! A thin shim over the library crate: `serve` starts the web UI, `analyze`
//! runs one document through the same pipeline and prints the report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tnc_analyzer::pipeline::input::is_url;
use tnc_analyzer::report::{Entry, Section, Tone};
use tnc_analyzer::{
    export_json, export_to_file, web, AnalysisResult, Analyzer, AnalyzerConfig, DocumentText,
    Report, DEFAULT_MODEL,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
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

const AFTER_HELP: &str = r#"EXAMPLES:
  # Start the web UI on http://127.0.0.1:8501
  tnc-analyzer serve

  # Analyze a local PDF and print the report
  tnc-analyzer analyze terms.pdf

  # Analyze a PDF from a URL and save the JSON export
  tnc-analyzer analyze https://example.com/terms.pdf -o structured_tnc.json

  # Analyze pasted text from stdin, print JSON
  pbpaste | tnc-analyzer analyze - --json

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY     Google Gemini API key (required)
  TNC_MODEL          Override the Gemini model ID
  TNC_BIND           Address for `serve`
  RUST_LOG           Override the log filter
"#;

/// Summarise Terms & Conditions documents with Gemini.
#[derive(Parser, Debug)]
#[command(
    name = "tnc-analyzer",
    version,
    about = "Summarise Terms & Conditions documents (text, PDF or PDF URL) with Gemini",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gemini model ID.
    #[arg(long, global = true, env = "TNC_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Number of summary bullet points to ask for.
    #[arg(long, global = true, env = "TNC_SUMMARY_POINTS", default_value_t = 10)]
    summary_points: usize,

    /// LLM temperature (0.0–2.0).
    #[arg(long, global = true, env = "TNC_TEMPERATURE", default_value_t = 0.2)]
    temperature: f32,

    /// HTTP download timeout in seconds.
    #[arg(long, global = true, env = "TNC_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Largest accepted PDF, in MiB.
    #[arg(long, global = true, env = "TNC_MAX_UPLOAD_MB", default_value_t = 20)]
    max_upload_mb: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "TNC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "TNC_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web UI.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "TNC_BIND", default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },
    /// Analyze one document and print the report.
    Analyze {
        /// PDF or text file, HTTP/HTTPS URL to a PDF, or `-` for stdin text.
        input: String,

        /// Print the JSON export instead of the report.
        #[arg(long)]
        json: bool,

        /// Also write the JSON export to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
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

    // ── Build analyzer (a missing API key is fatal here) ─────────────────
    let config = build_config(&cli)?;
    let analyzer = Analyzer::new(config).context("Failed to start the analyzer")?;

    match cli.command {
        Command::Serve { bind } => {
            if !cli.quiet {
                eprintln!(
                    "{} {}",
                    cyan("◆"),
                    bold(&format!("T&C Analyzer on http://{bind}"))
                );
            }
            web::serve(Arc::new(analyzer), bind)
                .await
                .context("Server stopped")?;
        }
        Command::Analyze {
            ref input,
            json,
            ref output,
        } => {
            let document = acquire(&analyzer, input).await?;
            for warning in document.warnings() {
                if !cli.quiet {
                    eprintln!("{} {}", yellow("⚠"), dim(&format!("{warning} (skipped)")));
                }
            }

            let result = analyzer
                .analyze_document(&document)
                .await
                .context("Analysis failed")?;

            if json {
                println!("{}", export_json(&result)?);
            } else {
                print_report(&result);
            }

            if let Some(path) = output {
                export_to_file(&result, path)
                    .await
                    .context("Failed to write export")?;
                if !cli.quiet {
                    eprintln!("{} {}", green("✔"), bold(&path.display().to_string()));
                }
            }
        }
    }

    Ok(())
}

/// Map CLI args to `AnalyzerConfig`.
fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    AnalyzerConfig::builder()
        .model_name(cli.model.clone())
        .summary_points(cli.summary_points)
        .temperature(cli.temperature)
        .download_timeout_secs(cli.download_timeout)
        .max_upload_bytes(cli.max_upload_mb.saturating_mul(1024 * 1024))
        .build()
        .context("Invalid configuration")
}

/// Resolve `input` to document text: URL, stdin, PDF file or text file.
async fn acquire(analyzer: &Analyzer, input: &str) -> Result<DocumentText> {
    if is_url(input) {
        return analyzer
            .fetch_url(input)
            .await
            .with_context(|| format!("Failed to fetch {input}"));
    }

    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(analyzer.submit_text(&text)?);
    }

    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {input}"))?;

    if bytes.starts_with(b"%PDF") {
        let file_name = PathBuf::from(input)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.to_string());
        return analyzer
            .upload_pdf(&file_name, bytes)
            .await
            .with_context(|| format!("Failed to extract text from {input}"));
    }

    let text = String::from_utf8(bytes).with_context(|| format!("{input} is not UTF-8 text"))?;
    Ok(analyzer.submit_text(&text)?)
}

fn print_report(result: &AnalysisResult) {
    let report = Report::from_result(result);
    for section in report.sections() {
        print_section(section);
    }
}

fn print_section(section: &Section) {
    let (icon, paint): (&str, fn(&str) -> String) = match section.tone {
        Tone::Summary => ("🔹", green as fn(&str) -> String),
        Tone::Warning => ("⚠️", red),
        Tone::Advisory => ("💡", yellow),
    };
    println!("\n{} {}", icon, bold(section.title));
    for entry in &section.entries {
        match entry {
            Entry::Item(item) => println!("  {} {}", paint("✅"), item),
            Entry::Labeled { label, text } => {
                println!("  {} {}", paint(&format!("{label}:")), text)
            }
            Entry::Notice(message) => println!("  {}", dim(message)),
        }
    }
}
