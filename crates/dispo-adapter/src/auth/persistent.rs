/*
[INPUT]:  Session snapshots and a storage directory
[OUTPUT]: Persisted sessions surviving process restarts
[POS]:    Auth layer - persistent storage for signed-in sessions
[UPDATE]: When the session file format or naming conventions change
*/

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::SessionUser;

const SESSION_FILE: &str = "session.json";

/// Snapshot of a signed-in session, as written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: SessionUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Manages persistence of the signed-in session
#[derive(Debug, Clone)]
pub struct SessionFileStore {
    dir: PathBuf,
}

impl SessionFileStore {
    /// Create a new store backed by the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load the persisted session, if a readable one exists
    pub fn load(&self) -> Option<StoredSession> {
        let content = fs::read_to_string(self.file_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Write the session to disk, owner-readable only
    pub fn save(&self, session: &StoredSession) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.file_path();
        let content = serde_json::to_string_pretty(session)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&path, content)?;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;

        Ok(())
    }

    /// Remove the persisted session if present
    pub fn clear(&self) -> io::Result<()> {
        let path = self.file_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Path of the session file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}
