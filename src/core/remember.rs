//! "Remember me" storage for the login form.
//!
//! Two fixed keys hold the remembered username and password. The default
//! backend is the system keychain; [`MemoryStore`] keeps values in-process.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USER_KEY: &str = "rememberedUser";
pub const PASSWORD_KEY: &str = "rememberedPassword";

#[cfg(feature = "keyring")]
const SERVICE_NAME: &str = "budstech-admin";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "keyring")]
    #[error("Keyring error: {0}")]
    KeyringError(#[from] keyring::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Store Types
// ============================================================================

/// Credentials restored into the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedLogin {
    pub username: String,
    pub password: String,
}

/// Which backend holds remembered logins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RememberBackend {
    #[default]
    Keyring,
    Memory,
}

pub trait RememberStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Both values, or `None` unless both are present and non-empty.
    fn load(&self) -> Result<Option<RememberedLogin>> {
        let username = self.get(USER_KEY)?.filter(|v| !v.is_empty());
        let password = self.get(PASSWORD_KEY)?.filter(|v| !v.is_empty());
        Ok(username
            .zip(password)
            .map(|(username, password)| RememberedLogin { username, password }))
    }

    fn save(&self, login: &RememberedLogin) -> Result<()> {
        self.set(USER_KEY, &login.username)?;
        self.set(PASSWORD_KEY, &login.password)
    }

    fn clear(&self) -> Result<()> {
        self.remove(USER_KEY)?;
        self.remove(PASSWORD_KEY)
    }
}

/// Build the store selected in config.
pub fn open(backend: RememberBackend) -> Box<dyn RememberStore> {
    match backend {
        #[cfg(feature = "keyring")]
        RememberBackend::Keyring => Box::new(KeyringStore::new()),
        #[cfg(not(feature = "keyring"))]
        RememberBackend::Keyring => {
            log::warn!("Keyring support not compiled in; remembered logins last for this run only");
            Box::new(MemoryStore::new())
        }
        RememberBackend::Memory => Box::new(MemoryStore::new()),
    }
}

// ============================================================================
// Keyring Store
// ============================================================================

#[cfg(feature = "keyring")]
pub struct KeyringStore {
    service: String,
}

#[cfg(feature = "keyring")]
impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "keyring")]
impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, key)?)
    }
}

#[cfg(feature = "keyring")]
impl RememberStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?.set_password(value)?;
        log::debug!("Stored {key} in keyring service {}", self.service);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Memory Store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RememberStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}
