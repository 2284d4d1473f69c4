use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

use sitewatch::Config;

#[derive(Parser)]
#[command(name = "sitewatch")]
#[command(about = "Mails the operator when a website goes down or recovers", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single check cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.once {
        return match sitewatch::run_once(&config).await {
            Ok(report) => {
                info!(
                    "Checked {} websites, {} down, {} notified",
                    report.checked, report.down, report.notified
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Check failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => error!("Unable to listen for shutdown signal: {e}"),
        }
    });

    sitewatch::monitor_websites(cli.config.as_deref(), config, token).await;
    ExitCode::SUCCESS
}
