//! Unveil CLI - scan text for invisible and look-alike "stealth" characters.
//!
//! ```text
//! main() -> input::collect() -> unveil_core::scan() per source -> render(format)
//!                                                 \-> export::write_atomic(--output)
//! ```
//!
//! Reports go to stdout; diagnostics go to stderr through `tracing`.

mod export;
mod input;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use unveil_config::{OutputFormat, UnveilConfig};
use unveil_core::report::{ReportOptions, render_annotated, render_findings, render_summary};
use unveil_types::ScanResult;

use input::Source;

#[derive(Debug, Parser)]
#[command(name = "unveil", version, about = "Find, decode and strip invisible stealth characters")]
struct Cli {
    /// Files to scan. With none, or `-`, reads stdin.
    files: Vec<PathBuf>,

    /// Output format; overrides `[output] format` from the config file.
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write the cleaned transcript to this path (replaced atomically).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Omit the per-category breakdown table from reports.
    #[arg(long)]
    no_breakdown: bool,

    /// Exit with status 1 if any stealth character is found.
    #[arg(long)]
    fail_on_stealth: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Report,
    Annotated,
    Clean,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Report => OutputFormat::Report,
            FormatArg::Annotated => OutputFormat::Annotated,
            FormatArg::Clean => OutputFormat::Clean,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Effective settings after merging config and flags.
#[derive(Debug, Clone, Copy)]
struct Settings {
    format: OutputFormat,
    report: ReportOptions,
}

impl Settings {
    fn resolve(cli: &Cli, config: &UnveilConfig) -> Self {
        Self {
            format: cli.format.map_or(config.output.format, OutputFormat::from),
            report: ReportOptions {
                preview_width: config.report.preview_width,
                breakdown: config.report.breakdown && !cli.no_breakdown,
            },
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    #[serde(flatten)]
    result: &'a ScanResult,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the report; logs always go to stderr.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}

fn load_config() -> UnveilConfig {
    match UnveilConfig::load() {
        Ok(Some(config)) => config,
        Ok(None) => UnveilConfig::default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "{err}; using defaults");
            UnveilConfig::default()
        }
    }
}

/// Write one scanned source in the selected format.
fn render(
    out: &mut impl Write,
    source: &Source,
    result: &ScanResult,
    settings: Settings,
    with_header: bool,
) -> Result<()> {
    match settings.format {
        OutputFormat::Json => {
            let report = JsonReport {
                source: &source.name,
                result,
            };
            serde_json::to_writer(&mut *out, &report)
                .context("failed to serialize scan result")?;
            writeln!(out)?;
        }
        OutputFormat::Report => {
            write_header(out, source, with_header)?;
            write!(out, "{}", render_summary(result, settings.report))?;
            let findings = render_findings(result, settings.report);
            if !findings.is_empty() {
                writeln!(out, "FINDINGS")?;
                write!(out, "{findings}")?;
            }
        }
        OutputFormat::Annotated => {
            write_header(out, source, with_header)?;
            write_with_newline(out, &render_annotated(result, settings.report))?;
        }
        OutputFormat::Clean => {
            write_header(out, source, with_header)?;
            write_with_newline(out, &result.cleaned)?;
        }
    }
    Ok(())
}

/// `==> name <==`, as `head` and `tail` print for multiple files.
fn write_header(out: &mut impl Write, source: &Source, with_header: bool) -> std::io::Result<()> {
    if with_header {
        writeln!(out, "==> {} <==", source.name)?;
    }
    Ok(())
}

fn write_with_newline(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.output.is_some() && cli.files.len() > 1 {
        bail!("--output takes a single input, got {}", cli.files.len());
    }

    let config = load_config();
    let settings = Settings::resolve(cli, &config);
    let sources = input::collect(&cli.files)?;
    let with_header = sources.len() > 1;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut found_stealth = false;

    for (index, source) in sources.iter().enumerate() {
        let result = unveil_core::scan(&source.text);
        tracing::info!(
            source = %source.name,
            stealth = result.stats.stealth_count,
            total = result.stats.total_chars,
            "scanned"
        );
        found_stealth |= !result.is_clean();

        if with_header && index > 0 && settings.format != OutputFormat::Json {
            writeln!(out)?;
        }
        render(&mut out, source, &result, settings, with_header)?;

        if let Some(path) = &cli.output {
            export::write_atomic(path, result.cleaned.as_bytes())?;
        }
    }
    out.flush().context("failed to flush stdout")?;

    if cli.fail_on_stealth && found_stealth {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    run(&cli)
}
