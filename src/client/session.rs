//! Persisted login for `moodctl`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::{AuthResponse, UserSummary};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub server: String,
    pub token: String,
    pub user: UserSummary,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn from_auth(server: &str, auth: AuthResponse) -> Self {
        Self {
            server: server.to_string(),
            token: auth.token,
            user: auth.user,
            saved_at: Utc::now(),
        }
    }
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let dir = if let Ok(custom_dir) = std::env::var("MOODTRACK_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("moodtrack")
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn load(dir: &Path) -> anyhow::Result<Option<Session>> {
    let file = dir.join(SESSION_FILE);
    if !file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(file)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn save(dir: &Path, session: &Session) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)?;
    Ok(())
}

/// Returns whether a session existed.
pub fn clear(dir: &Path) -> anyhow::Result<bool> {
    let file = dir.join(SESSION_FILE);
    if !file.exists() {
        return Ok(false);
    }
    fs::remove_file(file)?;
    Ok(true)
}
