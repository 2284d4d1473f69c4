use log::{error, info};
use std::collections::HashSet;

use crate::config::Site;
use crate::error::Result;
use crate::notify::Notifier;
use crate::probe::Prober;
use crate::status::{Status, StatusMap};
use crate::store::StateStore;

/// A status change worth telling the operator about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Down,
    Recovered,
}

impl Transition {
    pub fn message(self, url: &str) -> String {
        match self {
            Transition::Down => format!("Site {url} is not working"),
            Transition::Recovered => format!("Site {url} is working again"),
        }
    }
}

/// Decides whether going from `previous` to `current` warrants a message.
///
/// A site seen for the first time only alerts when it is already down, so
/// a new healthy site never produces a spurious "recovered" mail. A steady
/// state, up or down, never repeats a notification.
pub fn decide_transition(previous: Option<Status>, current: Status) -> Option<Transition> {
    match (previous, current) {
        (None, Status::Down) => Some(Transition::Down),
        (None, Status::Up) => None,
        (Some(previous), current) if previous == current => None,
        (Some(_), Status::Down) => Some(Transition::Down),
        (Some(_), Status::Up) => Some(Transition::Recovered),
    }
}

/// Drops entries for sites that are no longer configured.
pub fn prune(state: &mut StatusMap, sites: &[Site]) {
    let valid: HashSet<&str> = sites.iter().map(|site| site.url.as_str()).collect();
    state.retain(|url, _| valid.contains(url.as_str()));
}

/// Outcome of a single cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub down: usize,
    pub notified: usize,
    pub failed_notifications: usize,
}

/// Reconciles stored state against the site list, probes every site in
/// order and notifies on transitions.
pub struct TransitionEngine<P, S, N> {
    prober: P,
    store: S,
    notifier: N,
}

impl<P, S, N> TransitionEngine<P, S, N>
where
    P: Prober,
    S: StateStore,
    N: Notifier,
{
    pub fn new(prober: P, store: S, notifier: N) -> Self {
        Self {
            prober,
            store,
            notifier,
        }
    }

    /// Runs one cycle over `sites` and persists the resulting state once.
    ///
    /// A failed notification is logged and counted but does not stop the
    /// remaining sites from being processed or the state from being saved.
    ///
    /// # Errors
    ///
    /// Fails if the stored state cannot be loaded or the new state cannot
    /// be saved.
    pub async fn run_cycle(&self, sites: &[Site]) -> Result<CycleReport> {
        let mut state = self.store.load()?;
        prune(&mut state, sites);

        let mut report = CycleReport::default();
        for site in sites {
            let previous = state.get(&site.url).copied();
            let current = self.prober.probe(&site.url).await;

            report.checked += 1;
            if current == Status::Down {
                report.down += 1;
            }

            if let Some(transition) = decide_transition(previous, current) {
                let message = transition.message(&site.url);
                info!("{message}");

                match self.notifier.notify(&site.url, &message).await {
                    Ok(()) => report.notified += 1,
                    Err(e) => {
                        error!("Failed to send notification for {}: {e}", site.url);
                        report.failed_notifications += 1;
                    }
                }
            }

            state.insert(site.url.clone(), current);
        }

        self.store.save(&state)?;
        Ok(report)
    }
}
