//! Login gate for the console.
//!
//! A fixed demo account guards the console. This is a placeholder gate, not
//! an authentication system: no hashing, expiry or rate limiting.

use thiserror::Error;

use super::remember::{RememberStore, RememberedLogin};

pub const DEMO_USERNAME: &str = "budstech";
pub const DEMO_PASSWORD: &str = "12345";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
}

pub type Result<T> = std::result::Result<T, AuthError>;

pub struct CredentialGate {
    store: Box<dyn RememberStore>,
}

impl CredentialGate {
    pub fn new(store: Box<dyn RememberStore>) -> Self {
        Self { store }
    }

    /// Read remembered credentials for pre-filling the login form.
    ///
    /// Store failures are logged and treated as "nothing remembered".
    pub fn remembered(&self) -> Option<RememberedLogin> {
        match self.store.load() {
            Ok(login) => login,
            Err(e) => {
                log::warn!("Failed to read remembered login: {e}");
                None
            }
        }
    }

    /// Check credentials and update the remember store on success.
    ///
    /// Failed attempts never touch the store.
    #[tracing::instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str, remember: bool) -> Result<()> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            log::info!("Rejected login for {username:?}");
            return Err(AuthError::InvalidCredentials);
        }

        let outcome = if remember {
            self.store.save(&RememberedLogin {
                username: username.to_string(),
                password: password.to_string(),
            })
        } else {
            self.store.clear()
        };
        if let Err(e) = outcome {
            log::warn!("Failed to update remembered login: {e}");
        }

        log::info!("Login accepted for {username:?}");
        Ok(())
    }

    pub fn store(&self) -> &dyn RememberStore {
        self.store.as_ref()
    }
}
