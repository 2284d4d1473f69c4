use log::{error, info, warn};
use std::path::Path;
use std::time::Duration;
use tokio::{select, time::sleep};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::engine::{CycleReport, TransitionEngine};
use crate::error::Result;
use crate::notify::SmtpNotifier;
use crate::probe::HttpProber;
use crate::store::JsonStateStore;

/// Runs a single cycle against `config` with the HTTP prober, the JSON
/// state file and the SMTP notifier.
///
/// # Errors
///
/// Fails if a collaborator cannot be built, or if the state file cannot be
/// read or written.
pub async fn run_once(config: &Config) -> Result<CycleReport> {
    let prober = HttpProber::new(Duration::from_secs(config.config.timeout_secs))?;
    let store = JsonStateStore::new(config.state_path()?);
    let notifier = SmtpNotifier::new(&config.smtp)?;

    let engine = TransitionEngine::new(prober, store, notifier);
    engine.run_cycle(&config.sites).await
}

/// Continuously monitors the configured websites until `token` is cancelled.
///
/// # Behavior
///
/// - Re-reads the configuration at the start of every cycle, keeping the
///   previous one if the file became unreadable or invalid
/// - Runs one cycle, notifying by mail on status transitions
/// - Logs and survives a failed cycle; the next one starts on schedule
/// - Sleeps for the configured interval before the next cycle
pub async fn monitor_websites(
    config_path: Option<&Path>,
    initial: Config,
    token: CancellationToken,
) {
    let mut config = initial;

    info!("Starting website monitoring...");
    info!(
        "Check interval: {} seconds",
        config.config.check_interval_secs
    );
    info!("Timeout: {} seconds", config.config.timeout_secs);
    info!("Notifications go to {}", config.smtp.receiver);

    loop {
        if token.is_cancelled() {
            info!("Shutdown requested, stopping monitor");
            break;
        }

        match Config::load(config_path) {
            Ok(fresh) => config = fresh,
            Err(e) => warn!("Keeping previous configuration, reload failed: {e}"),
        }

        info!("Checking {} websites...", config.sites.len());
        match run_once(&config).await {
            Ok(report) => info!(
                "Cycle done: {} checked, {} down, {} notified, {} failed notifications",
                report.checked, report.down, report.notified, report.failed_notifications
            ),
            Err(e) => error!("Cycle failed: {e}"),
        }

        // Interruptible sleep
        select! {
            () = sleep(Duration::from_secs(config.config.check_interval_secs)) => {},
            () = token.cancelled() => {
                info!("Shutdown requested during sleep");
                break;
            }
        }
    }

    info!("Website monitoring stopped gracefully");
}
