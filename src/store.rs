use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;
use crate::status::{Status, StatusMap};

/// Durable URL → status state, read and rewritten once per cycle.
pub trait StateStore {
    /// Returns an empty map on first run.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed state; corruption is never masked.
    fn load(&self) -> Result<StatusMap>;

    /// Replaces the stored state with `state` in full.
    ///
    /// # Errors
    ///
    /// Fails if the state cannot be written.
    fn save(&self, state: &StatusMap) -> Result<()>;
}

/// State kept as a JSON object of `"url": "up" | "down"` in a single file.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<StatusMap> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state at {}, starting empty", self.path.display());
                return Ok(StatusMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, state: &StatusMap) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let sorted: BTreeMap<&str, Status> =
            state.iter().map(|(url, status)| (url.as_str(), *status)).collect();
        let json = serde_json::to_string_pretty(&sorted)?;

        // Write beside the target then rename so readers never see a partial file
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
