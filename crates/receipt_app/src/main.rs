use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::config::{self, LogTarget};

/// Terminal client for the UPI receipt extractor.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// RON config file (defaults to ./receipt_client.ron when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extraction server root URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum)]
    log: Option<LogTarget>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // CLI flags > config file > defaults
    let mut config = config::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.server_url = server;
    }
    if let Some(log) = args.log {
        config.log_target = log;
    }

    receipt_logging::initialize(
        config.log_target.into(),
        config.log_level()?,
        &config.log_file,
    );

    platform::run_app(&config)
}
