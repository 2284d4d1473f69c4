use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::Result;
use crate::status::Status;

/// Reachability check for a single URL.
#[allow(async_fn_in_trait)]
pub trait Prober {
    /// Never fails: every failure cause is reported as [`Status::Down`].
    async fn probe(&self, url: &str) -> Status;
}

/// Probes with a timeout-bounded HTTP GET.
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// # Errors
    ///
    /// Fails if the HTTP client (TLS backend) cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Status {
        // No way of telling a network error from a real outage on the server side
        match self.client.get(url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => {
                debug!("{url}: UP");
                Status::Up
            }
            Ok(resp) => {
                debug!("{url}: DOWN (HTTP {})", resp.status());
                Status::Down
            }
            Err(e) => {
                debug!("{url}: DOWN ({e})");
                Status::Down
            }
        }
    }
}
