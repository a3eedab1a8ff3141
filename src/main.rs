//! Command-line front-end for the email-triage verification engine.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use email_triage_core::{
    AppError, Config, ConfigBuilder, Result, VerificationStatus, Verifier,
};

#[derive(Parser, Debug)]
#[command(
    name = "email-triage",
    version,
    about = "Classify email addresses as valid, risky or invalid"
)]
struct Cli {
    /// Addresses to verify.
    #[arg(value_name = "EMAIL")]
    emails: Vec<String>,

    /// Read addresses from a file: newline-delimited, or a JSON array when
    /// the path ends in .json.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write JSON results to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Drop duplicate addresses (case-insensitive) before verification.
    #[arg(long)]
    dedup: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH", env = "EMAIL_TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of addresses verified concurrently.
    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Per-command SMTP timeout in seconds.
    #[arg(long, value_name = "SECS")]
    smtp_timeout: Option<u64>,

    /// DNS lookup timeout in seconds.
    #[arg(long, value_name = "SECS")]
    dns_timeout: Option<u64>,

    /// Envelope sender used in the SMTP probe.
    #[arg(long, value_name = "EMAIL")]
    sender: Option<String>,

    /// Extra disposable-domain list file (one domain per line).
    #[arg(long, value_name = "PATH")]
    disposable_list: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut builder = ConfigBuilder::from_config_file(cli.config.as_deref())?;
    if let Some(n) = cli.max_concurrency {
        builder = builder.max_concurrency(n);
    }
    if let Some(secs) = cli.smtp_timeout {
        builder = builder.smtp_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.dns_timeout {
        builder = builder.dns_timeout(Duration::from_secs(secs));
    }
    if let Some(ref sender) = cli.sender {
        builder = builder.smtp_sender_email(sender.clone());
    }
    if let Some(ref path) = cli.disposable_list {
        builder = builder.disposable_list_path(path.clone());
    }
    builder.build()
}

fn collect_addresses(cli: &Cli) -> Result<Vec<String>> {
    let mut addresses = cli.emails.clone();

    if let Some(ref path) = cli.input {
        let raw = fs::read_to_string(path)?;
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let parsed: Vec<String> = serde_json::from_str(&raw)?;
            addresses.extend(parsed);
        } else {
            addresses.extend(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }
    }

    if cli.dedup {
        let mut seen = HashSet::new();
        addresses.retain(|address| seen.insert(address.trim().to_ascii_lowercase()));
    }

    if addresses.is_empty() {
        return Err(AppError::InsufficientInput(
            "no addresses given; pass them as arguments or via --input".to_string(),
        ));
    }
    Ok(addresses)
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    if let Some(ref origin) = config.loaded_config_path {
        tracing::info!("Using configuration from {}", origin);
    }
    let addresses = collect_addresses(&cli)?;
    let verifier = Verifier::new(config)?;

    let payload = if addresses.len() == 1 {
        let result = verifier.verify(&addresses[0]).await;
        eprintln!("{}: {} ({})", result.email, result.status, result.message);
        serde_json::to_value(result)?
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Verifying {} addresses...", addresses.len()));
        spinner.enable_steady_tick(Duration::from_millis(120));
        let results = verifier.verify_batch(&addresses).await;
        spinner.finish_and_clear();

        let valid = results
            .iter()
            .filter(|r| r.status == VerificationStatus::Valid)
            .count();
        let risky = results
            .iter()
            .filter(|r| r.status == VerificationStatus::Risky)
            .count();
        let invalid = results.len() - valid - risky;
        eprintln!(
            "{} address(es): {} valid, {} risky, {} invalid",
            results.len(),
            valid,
            risky,
            invalid
        );

        serde_json::json!({
            "batch_time": chrono::Utc::now().to_rfc3339(),
            "results": results,
        })
    };

    let mut rendered = if cli.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    rendered.push('\n');

    match cli.output {
        Some(ref path) => {
            fs::write(path, rendered)?;
            tracing::info!("Results written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
