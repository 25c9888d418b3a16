//! Token and profile persisted between client invocations.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ClientResult;
use crate::auth::dto::{AuthResponse, PublicUser};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: PublicUser,
}

impl From<AuthResponse> for StoredSession {
    fn from(res: AuthResponse) -> Self {
        Self {
            token: res.token,
            user: res.user,
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/expense-tracker/session.json`, falling back to the
    /// working directory when no config dir is known.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("expense-tracker"))
            .unwrap_or_default()
            .join("session.json")
    }

    pub fn load(&self) -> ClientResult<Option<StoredSession>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    /// Removes the stored session; a missing file is not an error.
    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn session() -> StoredSession {
        StoredSession {
            token: "header.payload.signature".into(),
            user: PublicUser {
                id: Uuid::new_v4(),
                email: "me@example.com".into(),
                created_at: OffsetDateTime::UNIX_EPOCH,
            },
        }
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().unwrap(), None);
        let s = session();
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"{not json").unwrap();
        assert!(SessionStore::new(path).load().is_err());
    }
}
