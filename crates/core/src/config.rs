//! Site configuration
//!
//! Loaded from `chorale.toml`; every key is optional. The admin secret is
//! never compiled in: it comes from the file or the environment, and without
//! one admin login is refused.
//!
//! ```toml
//! site_name = "La Grande Chorale de Sainte Croix"
//! payment_phone = "+230 5252 0000"
//! admin_password_hash = "$argon2id$v=19$..."
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::AdminCredential;

pub const DEFAULT_SITE_NAME: &str = "La Grande Chorale de Sainte Croix";
pub const DEFAULT_PAYMENT_PHONE: &str = "+230 5252 0000";

pub const ENV_ADMIN_PASSWORD: &str = "CHORALE_ADMIN_PASSWORD";
pub const ENV_ADMIN_PASSWORD_HASH: &str = "CHORALE_ADMIN_PASSWORD_HASH";

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site_name: String,
    /// Number buyers send mobile-money payments to
    pub payment_phone: String,
    pub admin_password: Option<String>,
    /// Argon2 PHC string; wins over `admin_password` when both are set
    pub admin_password_hash: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            payment_phone: DEFAULT_PAYMENT_PHONE.to_string(),
            admin_password: None,
            admin_password_hash: None,
        }
    }
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("site_name", &self.site_name)
            .field("payment_phone", &self.payment_phone)
            .field("admin", &self.admin_credential())
            .finish()
    }
}

impl SiteConfig {
    /// Parse TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read the file at `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load from `path`, then apply process environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply admin secret overrides from `lookup` (the environment in
    /// production, a map in tests)
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin_password = Some(password);
        }
        if let Some(hash) = lookup(ENV_ADMIN_PASSWORD_HASH) {
            self.admin_password_hash = Some(hash);
        }
        self
    }

    /// The credential the admin session checks against
    pub fn admin_credential(&self) -> AdminCredential {
        let non_empty = |s: &Option<String>| s.as_ref().filter(|v| !v.is_empty()).cloned();

        if let Some(hash) = non_empty(&self.admin_password_hash) {
            AdminCredential::Hashed(hash)
        } else if let Some(password) = non_empty(&self.admin_password) {
            AdminCredential::Plain(password)
        } else {
            AdminCredential::Disabled
        }
    }
}
