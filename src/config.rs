use lettre::message::Mailbox;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Error, Result};

const APP_DIR: &str = "sitewatch";
const CONFIG_ENV: &str = "SITEWATCH_CONFIG";
const PASSWORD_ENV: &str = "SMTP_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub config: ConfigOptions,
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigOptions {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
    /// From address; defaults to `username` for providers that log in with
    /// the mailbox itself.
    pub sender: Option<String>,
    pub receiver: String,
}

impl SmtpConfig {
    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or(&self.username)
    }
}

/// A monitored website, keyed by its URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub url: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_check_interval_secs() -> u64 {
    60
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            check_interval_secs: default_check_interval_secs(),
            state_path: None,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or from the default location
    /// when `path` is `None`.
    ///
    /// The default location is the `SITEWATCH_CONFIG` environment variable
    /// (a `.env` file is honoured) and otherwise
    /// `<config dir>/sitewatch/config.toml`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, if no SMTP password is
    /// available, or if validation rejects the content.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        let content = fs::read_to_string(&path)?;
        Config::parse(&content)
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content)?;

        // if password is not set use env with dotenvy
        if config.smtp.password.is_none() {
            config.smtp.password = Some(dotenvy::var(PASSWORD_ENV)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Where the status file lives: the configured path, or
    /// `<data dir>/sitewatch/status.json`.
    ///
    /// # Errors
    ///
    /// Fails when no path is configured and the platform has no data dir.
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config.state_path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join("status.json"))
            .ok_or_else(|| Error::Config("no data directory for the state file".into()))
    }

    fn validate(&self) -> Result<()> {
        if self.config.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".into()));
        }
        if self.config.check_interval_secs == 0 {
            return Err(Error::Config("check_interval_secs must be positive".into()));
        }

        // Reject bad addresses here so a cycle never fails before probing
        self.smtp.sender().parse::<Mailbox>()?;
        self.smtp.receiver.parse::<Mailbox>()?;

        let mut seen = HashSet::new();
        for site in &self.sites {
            let parsed = Url::parse(&site.url)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "unsupported scheme in {}: {}",
                    site.url,
                    parsed.scheme()
                )));
            }
            if !seen.insert(site.url.as_str()) {
                return Err(Error::Config(format!("duplicate site {}", site.url)));
            }
        }
        Ok(())
    }
}

fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = dotenvy::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .ok_or_else(|| Error::Config("no config directory, pass --config".into()))
}
