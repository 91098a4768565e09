use std::sync::Mutex;

use crate::persist::PersistError;

/// Storage key of the session credential.
pub const CREDENTIAL_KEY: &str = "access_token";

/// Durable home of the session credential.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, credential: &str) -> Result<(), PersistError>;
    fn remove(&self) -> Result<(), PersistError>;
}

/// Keeps the credential for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(credential.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    fn save(&self, credential: &str) -> Result<(), PersistError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| PersistError::Store("credential store poisoned".into()))?;
        *value = Some(credential.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| PersistError::Store("credential store poisoned".into()))?;
        *value = None;
        Ok(())
    }
}
