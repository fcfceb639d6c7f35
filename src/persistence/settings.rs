use crate::domain::session::DEFAULT_DURATION_SECS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    #[serde(default)]
    pub last_category: Option<String>,
}

fn default_session_minutes() -> u32 {
    DEFAULT_DURATION_SECS / 60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            last_category: None,
        }
    }
}

/// Load settings, falling back to defaults when missing or unreadable
pub fn load_settings<P: AsRef<Path>>(path: P) -> Settings {
    let path = path.as_ref();

    let content = match crate::persistence::read_file(path) {
        Ok(Some(content)) => content,
        Ok(None) => return Settings::default(),
        Err(e) => {
            log::warn!("Could not read settings: {:#}", e);
            return Settings::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed settings at {}: {}", path.display(), e);
        Settings::default()
    })
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
