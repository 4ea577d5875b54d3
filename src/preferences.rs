use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AgentError;

/// Durable per-user record. Keys this crate does not know are kept as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_weather_city: Option<String>,
    #[serde(default)]
    pub has_been_welcomed: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Preferences {
    pub fn preferred_city(&self) -> Option<&str> {
        self.preferred_weather_city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// JSON file backed store. Writes are serialized; last writer wins.
pub struct PreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files degrade to an empty record.
    pub fn load(&self) -> Preferences {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Preferences::default(),
            Err(e) => {
                log::warn!("Could not read {:?}: {}. Starting with fresh data.", self.path, e);
                return Preferences::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!(
                    "{:?} is corrupted or empty ({}). Starting with fresh data.",
                    self.path,
                    e
                );
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), AgentError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        prefs.serialize(&mut serializer)?;

        let _guard = self.write_lock.lock();
        fs::write(&self.path, buf).map_err(|source| AgentError::PreferencesWrite {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Preferences saved to {:?}", self.path);
        Ok(())
    }
}
