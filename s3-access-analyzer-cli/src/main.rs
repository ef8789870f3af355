//! Command-line entry point for the S3 Access Analyzer.
//!
//! Exit codes: `0` when every bucket was reported, `1` when the audit could not
//! start or buckets could not be listed, `2` for invalid arguments.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::debug;
use s3_access_analyzer_audit::{
    render_json, render_text, AuditConfig, AuditService, RetryPolicy, DEFAULT_REGION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable block per bucket
    Text,
    /// A single JSON array covering every bucket
    Json,
}

/// Audit the S3 buckets of an account for public access and risky bucket policies.
#[derive(Debug, Parser)]
#[command(name = "s3-access-analyzer", version, about)]
struct Cli {
    /// AWS region used for S3 API calls
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Maximum number of buckets audited at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// Attempts made to list buckets before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: u32,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn audit_config(&self) -> AuditConfig {
        AuditConfig {
            region: self.region.clone(),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                ..RetryPolicy::default()
            },
            concurrency: usize::from(self.concurrency),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.audit_config();
    debug!("Audit configuration: {config:?}");

    if cli.format == OutputFormat::Text {
        println!("Starting S3 Bucket Access Analyzer...");
    }

    let service = AuditService::new(config)
        .await
        .context("Failed to initialize audit service")?;
    let audits = service.run().await.context("Error listing S3 buckets")?;

    match cli.format {
        OutputFormat::Text => {
            for audit in &audits {
                print!("{}", render_text(audit));
            }
            println!("S3 Bucket Access Analyzer completed.");
        }
        OutputFormat::Json => {
            println!("{}", render_json(&audits).context("Failed to serialize report")?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
