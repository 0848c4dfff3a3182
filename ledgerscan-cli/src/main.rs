use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ledgerscan_analytics::BatchSummary;
use ledgerscan_ingest::{extract_document, source_for_path, BatchExtraction};
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

use crate::config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "ledgerscan",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERSCAN_BUILD_SHA"), ")"),
    about = "Extract transactions and summaries from bank statement text"
)]
struct Cli {
    /// Config file (default: ~/.ledgerscan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the combined transaction table of all statements
    Scan(InputArgs),

    /// Account check, marker counts and top credits per month
    Summary(SummaryArgs),

    /// List the account number found in each statement
    Identity {
        /// Statement files (.pdf via pdftotext, anything else as form-feed separated text)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Statement files (.pdf via pdftotext, anything else as form-feed separated text)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Description marker for cash-machine activity
    #[arg(long)]
    atm_marker: Option<String>,

    /// Description marker for peer-to-peer payments
    #[arg(long)]
    peer_marker: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.ledgerscan/config.toml with defaults
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Scan(input) => {
            let batch = extract_batch(&input.files, &cfg).await?;
            let format = input.format.unwrap_or(cfg.output.format);
            let mut out = std::io::stdout().lock();
            report::write_table(&mut out, &batch.combined_table(), format)?;
        }

        Command::Summary(args) => {
            if let Some(atm) = args.atm_marker {
                cfg.markers.atm = atm;
            }
            if let Some(peer) = args.peer_marker {
                cfg.markers.peer_payment = peer;
            }

            let batch = extract_batch(&args.input.files, &cfg).await?;
            let summary = BatchSummary::build(
                &batch.combined_table(),
                batch.identity_report(),
                &cfg.markers(),
            );
            for warning in summary.warnings() {
                warn!("{}", warning);
            }

            let format = args.input.format.unwrap_or(cfg.output.format);
            let mut out = std::io::stdout().lock();
            report::write_summary(&mut out, &batch.documents, &summary, format)?;
        }

        Command::Identity { files } => {
            let batch = extract_batch(&files, &cfg).await?;
            if batch.identity_report().is_mismatch() {
                warn!("statements belong to different accounts");
            }

            let mut out = std::io::stdout().lock();
            report::write_identities(&mut out, &batch.documents)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Run every statement through the pipeline on the blocking pool, one task per
/// document, and collect the results back in submission order.
async fn extract_batch(files: &[PathBuf], cfg: &Config) -> Result<BatchExtraction> {
    if files.iter().any(|p| is_pdf(p)) && which::which(&cfg.extract.pdftotext).is_err() {
        warn!(
            tool = %cfg.extract.pdftotext,
            "PDF text tool not found on PATH; PDF statements will be read as empty"
        );
    }

    let handles: Vec<_> = files
        .iter()
        .map(|path| {
            let source = source_for_path(path, &cfg.extract.pdftotext);
            tokio::task::spawn_blocking(move || extract_document(source.as_ref()))
        })
        .collect();

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        documents.push(handle.await.context("statement worker failed")?);
    }

    Ok(BatchExtraction::new(documents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_summary_flags() {
        let cli = Cli::parse_from([
            "ledgerscan",
            "summary",
            "a.txt",
            "b.pdf",
            "--format",
            "json",
            "--atm-marker",
            "cajero",
        ]);
        match cli.command {
            Command::Summary(args) => {
                assert_eq!(args.input.files.len(), 2);
                assert_eq!(args.input.format, Some(OutputFormat::Json));
                assert_eq!(args.atm_marker.as_deref(), Some("cajero"));
                assert_eq!(args.peer_marker, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scan_requires_files() {
        assert!(Cli::try_parse_from(["ledgerscan", "scan"]).is_err());
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("estado.PDF")));
        assert!(!is_pdf(Path::new("estado.txt")));
        assert!(!is_pdf(Path::new("estado")));
    }

    #[tokio::test]
    async fn test_extract_batch_keeps_order_and_survives_missing_files() {
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("ledgerscan-ingest/fixtures/statement.txt");
        let files = vec![PathBuf::from("/no/such/statement.txt"), fixture];

        let batch = extract_batch(&files, &Config::default()).await.unwrap();
        assert_eq!(batch.documents.len(), 2);
        assert!(!batch.documents[0].is_readable());
        assert!(batch.documents[1].is_readable());
        assert_eq!(batch.combined_table().len(), 7);
        assert!(!batch.identity_report().is_mismatch());
    }
}
