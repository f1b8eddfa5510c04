//! Admin session
//!
//! One shared credential gates every event mutation. The authenticated flag
//! lives only in this process: nothing is persisted, so each run starts
//! logged out.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// How the shared admin secret is configured
#[derive(Clone, Default)]
pub enum AdminCredential {
    /// No secret configured; nobody can log in
    #[default]
    Disabled,
    /// Compared verbatim
    Plain(String),
    /// Argon2 PHC string
    Hashed(String),
}

impl AdminCredential {
    pub fn is_configured(&self) -> bool {
        !matches!(self, AdminCredential::Disabled)
    }

    /// Check a candidate password against this credential
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            AdminCredential::Disabled => false,
            AdminCredential::Plain(secret) => {
                constant_time_eq(secret.as_bytes(), candidate.as_bytes())
            }
            AdminCredential::Hashed(phc) => match PasswordHash::new(phc) {
                Ok(parsed) => Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok(),
                Err(e) => {
                    warn!(error = %e, "Configured admin password hash is malformed");
                    false
                }
            },
        }
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminCredential::Disabled => write!(f, "Disabled"),
            AdminCredential::Plain(_) => write!(f, "Plain(..)"),
            AdminCredential::Hashed(_) => write!(f, "Hashed(..)"),
        }
    }
}

/// Hash a secret for the `admin_password_hash` setting
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| Error::Config(format!("could not hash password: {e}")))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Process-local admin login state
#[derive(Debug, Default)]
pub struct AdminSession {
    credential: AdminCredential,
    authenticated: bool,
}

impl AdminSession {
    pub fn new(credential: AdminCredential) -> Self {
        Self {
            credential,
            authenticated: false,
        }
    }

    /// Check a password; on success the session stays authenticated until
    /// [`AdminSession::logout`]. A wrong password does not log out an
    /// already authenticated session.
    pub fn authenticate(&mut self, candidate: &str) -> bool {
        if !self.credential.is_configured() {
            warn!("Admin login attempted but no admin password is configured");
            return false;
        }
        let ok = self.credential.verify(candidate);
        if ok {
            self.authenticated = true;
            info!("Admin session opened");
        }
        ok
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Gate for mutations
    pub fn require(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(Error::Authentication("incorrect password".into()))
        }
    }

    pub fn logout(&mut self) {
        if self.authenticated {
            info!("Admin session closed");
        }
        self.authenticated = false;
    }
}
