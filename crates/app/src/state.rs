//! Application state management

use std::path::{Path, PathBuf};

use chorale_core::{
    AdminSession, Database, Error, EventStore, KeyValueStore, MemoryStore, Result, SiteConfig,
    EVENTS_KEY,
};
use directories::ProjectDirs;

pub const DATABASE_FILE: &str = "chorale.db";
pub const CONFIG_FILE: &str = "chorale.toml";

/// Everything one run of the site needs, created once and passed by reference
pub struct AppState {
    pub config: SiteConfig,
    pub store: EventStore<Box<dyn KeyValueStore>>,
    pub session: AdminSession,
}

impl AppState {
    /// Open the data directory. If the database cannot be opened the run
    /// continues on in-memory storage.
    pub fn new(data_dir: &Path, config_path: &Path) -> Result<Self> {
        let config = SiteConfig::load_with_env(config_path)?;

        let backend: Box<dyn KeyValueStore> = match Database::open(data_dir.join(DATABASE_FILE)) {
            Ok(db) => {
                let revision = db.entries().revision(EVENTS_KEY).ok().flatten();
                tracing::debug!(schema = db.schema_version(), ?revision, "Database ready");
                Box::new(db)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database unavailable, changes will not be kept");
                Box::new(MemoryStore::new())
            }
        };

        Ok(Self::with_backend(config, backend))
    }

    pub fn with_backend(config: SiteConfig, backend: Box<dyn KeyValueStore>) -> Self {
        let session = AdminSession::new(config.admin_credential());
        Self {
            config,
            store: EventStore::load(backend),
            session,
        }
    }

    /// Default per-user data directory
    pub fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("mu", "lachorale", "chorale").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    /// Open the admin session for this run
    pub fn login(&mut self, password: Option<&str>) -> Result<()> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        let password = password
            .ok_or_else(|| Error::Authentication("admin password required (--password)".into()))?;
        if self.session.authenticate(password) {
            Ok(())
        } else {
            Err(Error::Authentication("incorrect password".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig {
            admin_password: Some("test-secret".into()),
            ..Default::default()
        }
    }

    #[test]
    fn login_requires_password() {
        let mut state = AppState::with_backend(config(), Box::new(MemoryStore::new()));

        assert!(matches!(state.login(None), Err(Error::Authentication(_))));
        assert!(matches!(
            state.login(Some("nope")),
            Err(Error::Authentication(_))
        ));
        assert!(state.login(Some("test-secret")).is_ok());
        assert!(state.login(None).is_ok());
    }

    #[test]
    fn new_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path(), &dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(state.store.len(), 3);
        assert!(!state.session.is_authenticated());
        assert!(dir.path().join(DATABASE_FILE).exists());
    }
}
