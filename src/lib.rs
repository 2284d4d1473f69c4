pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod probe;
pub mod status;
pub mod store;
pub mod worker;

#[cfg(test)]
mod test_support;

pub use config::{Config, Site, SmtpConfig};
pub use engine::{CycleReport, Transition, TransitionEngine, decide_transition, prune};
pub use error::{Error, Result};
pub use notify::{Notifier, SmtpNotifier};
pub use probe::{HttpProber, Prober};
pub use status::{Status, StatusMap};
pub use store::{JsonStateStore, StateStore};
pub use worker::{monitor_websites, run_once};
