//! Persisted login — stores the Last.fm session key on disk.
//!
//! The session file lives at `<config_dir>/lastfm-rs/session.json`:
//!
//! ```json
//! { "name": "alice", "key": "d580d57f32848f5dcf574d1ce18d78b2" }
//! ```

use anyhow::{Context, Result};
use lastfm_api::SessionInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SavedSession {
    pub name: Option<String>,
    pub key: Option<String>,
}

impl SavedSession {
    /// Load the saved session, or an empty one if none exists.
    pub fn load() -> Result<Self> {
        Self::read_from(&Self::path()?)
    }

    /// Like [`load`](Self::load), but an unreadable or corrupt file counts
    /// as logged out.
    pub fn load_or_default() -> Self {
        Self::or_logged_out(Self::load())
    }

    fn or_logged_out(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|e| {
            tracing::warn!("ignoring saved session: {e:#}");
            Self::default()
        })
    }

    fn read_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("corrupt session file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        let config = dirs::config_dir().context("cannot determine config directory")?;
        Ok(config.join("lastfm-rs").join("session.json"))
    }
}

impl From<SessionInfo> for SavedSession {
    fn from(info: SessionInfo) -> Self {
        Self {
            name: Some(info.name),
            key: Some(info.key),
        }
    }
}
