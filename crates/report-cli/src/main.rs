//! Command-line renderer for analysis result payloads
//!
//! # Usage
//!
//! ```bash
//! # Render a saved payload as Markdown
//! cargo run -p report-cli -- result.json
//!
//! # Read from stdin, print tables
//! cat result.json | cargo run -p report-cli -- --format text -
//! ```

use anyhow::Context;
use clap::Parser;
use report_core::report::NO_RESULTS_NOTICE;
use report_core::{FormatterFactory, OutputFormat, ReportAssembler, ReportConfig, ReportError};
use report_utils::{LogFormat, default_filter, init_tracing_with};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "report-cli")]
#[command(about = "Render an analysis result payload as a report", long_about = None)]
struct Args {
    /// Payload JSON file, or `-` for stdin
    payload: String,

    /// Output format: markdown, text or json
    #[arg(short, long, default_value = "markdown")]
    format: OutputFormat,

    /// JSON file with report configuration overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_payload(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read payload from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read payload {source}"))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing_with(default_filter(args.verbose), log_format);

    let config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    debug!(?config, "Loaded report configuration");

    let raw = read_payload(&args.payload)?;
    let result = match report_core::parse_payload(&raw) {
        Ok(result) => result,
        Err(ReportError::MissingPayload) => {
            eprintln!("{NO_RESULTS_NOTICE}");
            return Ok(());
        }
        Err(err) => return Err(err).context("payload is not a valid analysis result"),
    };

    let assembler = ReportAssembler::new(config);
    let report = assembler.assemble(&result);

    info!(
        symbol = result.symbol().unwrap_or("N/A"),
        sections = report.sections.len(),
        demo = report.is_demo(),
        "Report assembled"
    );

    let formatter = FormatterFactory::create(args.format, assembler.config());
    println!("{}", formatter.format(&report)?);

    Ok(())
}
