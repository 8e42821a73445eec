use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The client's only persisted state: who is logged in and the tokens that
/// prove it. There is no client-side expiry; the session stays on disk until
/// cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns None when no session is stored or the file is unreadable.
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!(
            "fridgetrack-session-{}-{}.json",
            std::process::id(),
            name
        ));
        SessionStore::new(path)
    }

    #[test]
    fn save_load_clear_roundtrip() {
        let store = temp_store("roundtrip");
        let session = Session {
            user_id: 12,
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        };
        store.save(&session).expect("save");
        assert_eq!(store.load(), Some(session));

        store.clear().expect("clear");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store("idempotent");
        store.clear().expect("first clear");
        store.clear().expect("second clear");
    }

    #[test]
    fn load_ignores_corrupt_file() {
        let store = temp_store("corrupt");
        fs::write(
            store.path.clone(),
            "not json",
        )
        .unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }
}
