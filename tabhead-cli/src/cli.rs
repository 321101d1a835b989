use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Args, Parser, Subcommand};
use tabhead::{OutputFormat, failure_count, inspect, output};
use tracing::info;

use crate::config::HeadersSettings;
use crate::logging::init_tracing;
use crate::server::{self, DEFAULT_PORT, ServeConfig, ServeError};

#[derive(Debug, Parser)]
#[command(
    name = "tabhead",
    version,
    about = "Inspect header rows of tabular files and serve static files"
)]
pub struct Cli {
    /// Increase diagnostics (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the header row of each file
    Headers(HeadersArgs),
    /// Serve a directory over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Default, Args)]
pub struct HeadersArgs {
    /// Files to inspect, relative to --base-dir
    pub sources: Vec<String>,

    /// Output style: compact or itemized
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Directory that relative sources are resolved against
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Field delimiter (single ASCII character or "tab")
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Strip surrounding whitespace from header fields
    #[arg(short, long)]
    pub trim: bool,

    /// YAML settings file (sources, format, `base_dir`, delimiter, trim)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl HeadersArgs {
    /// Settings from `--config` (if any) with flags layered on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn settings(&self) -> Result<HeadersSettings> {
        let base = match &self.config {
            Some(path) => HeadersSettings::load(path)?,
            None => HeadersSettings::default(),
        };
        let flags = HeadersSettings {
            sources: self.sources.clone(),
            format: self.format,
            base_dir: self.base_dir.clone(),
            delimiter: self.delimiter.clone(),
            trim: self.trim.then_some(true),
        };
        Ok(base.merged_with(flags))
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory to serve
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

/// Parse arguments and run the selected command.
///
/// # Errors
///
/// Returns an error for invalid settings, output failures, or server failures.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Headers(args) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_headers(&args, &mut out)
        }
        Command::Serve(args) => {
            let config = ServeConfig {
                port: args.port,
                root: args.root,
                verbose: cli.verbose,
            };
            run_serve(&config).await
        }
    }
}

/// Inspect every configured source and write the results.
///
/// Unreadable sources are part of the output, not an error.
///
/// # Errors
///
/// Returns an error if the settings are invalid or writing fails.
pub fn run_headers(args: &HeadersArgs, out: &mut dyn Write) -> Result<()> {
    let (sources, config) = args.settings()?.into_inspection()?;
    info!(
        sources = sources.len(),
        base_dir = %config.base_dir.display(),
        format = %config.format,
        "inspecting header rows"
    );

    let results = inspect(&sources, &config);
    info!(
        total = results.len(),
        failed = failure_count(&results),
        "inspection finished"
    );

    let written = if args.json {
        output::write_json(&results, out)
    } else {
        output::write_text(&results, config.format, out)
    };
    written.context("Failed to write results")?;
    out.flush()?;
    Ok(())
}

/// Run the static file server.
///
/// # Errors
///
/// Returns an error if the server cannot start or fails while running.
pub async fn run_serve(config: &ServeConfig) -> Result<()> {
    match server::serve(config).await {
        Err(e @ ServeError::PortBusy { .. }) => Err(anyhow!(
            "{e}\nTry another --port or check whether a server is already running."
        )),
        result => result.map_err(anyhow::Error::from),
    }
}
