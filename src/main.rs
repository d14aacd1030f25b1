//! J TOK - short username availability scanner
//!
//! Generates every short name (2-4 characters by default), checks each profile page on a pool of
//! worker threads and saves the names that look available.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use j_tok::{
    report::{self, Reporter},
    types::{
        ScanConfig, ScanSummary, DEFAULT_BASE_URL, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
        DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS,
    },
    Charset, JTokError, UsernameSniper,
};

/// Find short usernames that look unregistered
#[derive(Parser, Debug)]
#[command(name = "j-tok")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of worker threads
    #[arg(short, long, env = "JTOK_THREADS", default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Shortest username length to try
    #[arg(long, env = "JTOK_MIN_LEN", default_value_t = DEFAULT_MIN_LENGTH)]
    min_len: usize,

    /// Longest username length to try
    #[arg(long, env = "JTOK_MAX_LEN", default_value_t = DEFAULT_MAX_LENGTH)]
    max_len: usize,

    /// Only use letters (a-z), no digits
    #[arg(long)]
    letters_only: bool,

    /// Platform base URL profiles are fetched from
    #[arg(long, env = "JTOK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "JTOK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Directory the results file is written to
    #[arg(long, env = "JTOK_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Print the run summary as JSON when done
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            threads: self.threads,
            min_length: self.min_len,
            max_length: self.max_len,
            charset: if self.letters_only {
                Charset::Letters
            } else {
                Charset::Alphanumeric
            },
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            output_dir: self.output_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the library
    if let Err(e) = j_tok::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    // Logs stay quiet by default so they do not tear the progress bar
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let sniper = match UsernameSniper::new(cli.scan_config()) {
        Ok(sniper) => sniper,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };

    let scan = tokio::task::spawn_blocking(move || run_scan(&sniper));

    tokio::select! {
        joined = scan => {
            let summary = match joined {
                Ok(Ok(summary)) => summary,
                Ok(Err(e)) => {
                    eprintln!("\n{}", e.user_message());
                    process::exit(1);
                }
                Err(e) => {
                    eprintln!("\n{}", JTokError::internal(format!("scan task failed: {}", e)).user_message());
                    process::exit(1);
                }
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            // Workers are still blocked on requests; leave without saving.
            println!("\n\nSearch interrupted by user\n");
            process::exit(130);
        }
    }

    Ok(())
}

/// Generate, scan, report and save. Runs on a blocking thread.
fn run_scan(sniper: &UsernameSniper) -> j_tok::Result<ScanSummary> {
    let config = sniper.config();
    report::print_header(config.min_length, config.max_length);

    println!("⏳ Generating usernames...");
    let candidates = sniper.candidates();
    println!("✓ Generated {} usernames to check\n", report::format_count(candidates.len() as u64));

    println!("🔍 Starting search for available usernames...\n");
    let reporter = Reporter::new(candidates.len() as u64);
    let summary = sniper.run_http(&candidates, |event| reporter.on_event(event))?;
    reporter.finish();

    report::print_results(&summary);
    if let Some(path) = report::save_results(&config.output_dir, &summary.found)? {
        println!("\n💾 Results saved to: {}", path.display());
    }
    println!("\n{}\n", "=".repeat(70));

    Ok(summary)
}
