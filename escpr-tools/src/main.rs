//! escpr2 - ESC/P-R 2 print job inspector and rewriter
//!
//! # Usage
//!
//! ```bash
//! # Print every command in a captured job
//! escpr2 decode job.bin
//!
//! # Compare two captures
//! escpr2 decode reference.bin other.bin
//!
//! # Rewrite a captured IPP request body with the configured print mode
//! escpr2 patch request.bin patched.bin
//!
//! # Rewrite a bare ESC/P-R stream and print what was inserted
//! escpr2 patch --raw --summary --mode CmOff job.bin patched.bin
//!
//! # Show or set the persisted print mode
//! escpr2 config
//! escpr2 config MonochromeCalibrated
//! ```

mod error;
mod report;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use escpr_patch::{PatchEngine, PrintMode, RequestInterceptor, SendDocumentInterceptor};
use escpr_protocol::{registry, CommandCollection};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ToolError;
use crate::settings::Settings;

/// escpr2 - Inspect and rewrite ESC/P-R 2 print jobs
#[derive(Parser, Debug)]
#[command(name = "escpr2")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the decoded commands of a capture, or diff two captures
    Decode {
        /// Captured job (the reference when comparing)
        file: PathBuf,

        /// Second capture to compare against the first
        other: Option<PathBuf>,
    },

    /// Rewrite a captured print job
    Patch {
        /// Captured request body
        input: PathBuf,

        /// Where to write the rewritten body
        output: PathBuf,

        /// Print mode (overrides the configured one)
        #[arg(long)]
        mode: Option<PrintMode>,

        /// Settings file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// HTTP method the request was sent with
        #[arg(long, default_value = "POST")]
        method: String,

        /// Input is a bare ESC/P-R stream, not an IPP request
        #[arg(long)]
        raw: bool,

        /// Print a JSON summary of the inserted commands
        #[arg(long, requires = "raw")]
        summary: bool,
    },

    /// Show or set the persisted print mode
    Config {
        /// Settings file
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// New print mode (Auto, ColorManagementOff, MonochromeCalibrated)
        mode: Option<PrintMode>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "escpr2=info,escpr_protocol=info,escpr_patch=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ToolError> {
    let cli = Cli::parse();
    registry::validate()?;

    match cli.command {
        Commands::Decode { file, other } => decode(&file, other.as_deref()),
        Commands::Patch {
            input,
            output,
            mode,
            config,
            method,
            raw,
            summary,
        } => {
            let mode = match mode {
                Some(mode) => mode,
                None => Settings::load(&Settings::resolve_path(config)?)?.print_mode,
            };
            patch(&input, &output, mode, &method, raw, summary)
        }
        Commands::Config { config, mode } => configure(Settings::resolve_path(config)?, mode),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ToolError> {
    std::fs::read(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(file: &Path, other: Option<&Path>) -> Result<(), ToolError> {
    let reference = CommandCollection::from_bytes(&read_file(file)?);
    match other {
        None => print!("{}", report::single(&reference)),
        Some(other) => {
            let other = CommandCollection::from_bytes(&read_file(other)?);
            print!("{}", report::comparison(&reference, &other));
        }
    }
    Ok(())
}

fn patch(
    input: &Path,
    output: &Path,
    mode: PrintMode,
    method: &str,
    raw: bool,
    summary: bool,
) -> Result<(), ToolError> {
    info!("Print mode: {}", mode);
    let body = read_file(input)?;

    let patched = if raw {
        let patched = PatchEngine::new(mode).patch_with_summary(&body)?;
        if summary {
            println!("{}", report::summary(&patched.summary)?);
        }
        patched.buffer
    } else {
        SendDocumentInterceptor::new(mode)
            .intercept_request(method, &body)
            .apply(body)
    };

    std::fs::write(output, &patched).map_err(|source| ToolError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("Wrote {} bytes to {}", patched.len(), output.display());
    Ok(())
}

fn configure(path: PathBuf, mode: Option<PrintMode>) -> Result<(), ToolError> {
    let mut settings = Settings::load(&path)?;
    let Some(mode) = mode else {
        println!("{}", settings.print_mode);
        return Ok(());
    };

    let old = settings.print_mode;
    settings.print_mode = mode;
    settings.save(&path)?;
    println!("Set mode from {} to {}", old, mode);
    Ok(())
}
