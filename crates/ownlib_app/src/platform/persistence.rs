use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ownlib_client::{
    ensure_state_dir, AtomicFileWriter, CredentialStore, PersistError, CREDENTIAL_KEY,
};
use ownlib_logging::{ownlib_debug, ownlib_info, ownlib_warn};

pub const STATE_FILENAME: &str = ".ownlib_session.ron";

/// Credential store backed by a small RON key-value file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILENAME)
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return BTreeMap::new();
            }
            Err(err) => {
                ownlib_warn!("Failed to read session state from {:?}: {}", path, err);
                return BTreeMap::new();
            }
        };

        match ron::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                ownlib_warn!("Failed to parse session state from {:?}: {}", path, err);
                BTreeMap::new()
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        let credential = Self::read_entries(&self.path())
            .remove(CREDENTIAL_KEY)
            .filter(|token| !token.is_empty());
        if credential.is_some() {
            ownlib_debug!("Loaded stored credential from {:?}", self.dir);
        }
        credential
    }

    fn save(&self, credential: &str) -> Result<(), PersistError> {
        ensure_state_dir(&self.dir)?;

        let mut entries = Self::read_entries(&self.path());
        entries.insert(CREDENTIAL_KEY.to_string(), credential.to_string());

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&entries, pretty)
            .map_err(|err| PersistError::Store(err.to_string()))?;
        AtomicFileWriter::new(self.dir.clone()).write(STATE_FILENAME, &content)?;
        ownlib_info!("Stored credential in {:?}", self.dir);
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistError> {
        AtomicFileWriter::new(self.dir.clone()).remove(STATE_FILENAME)?;
        ownlib_info!("Removed stored credential from {:?}", self.dir);
        Ok(())
    }
}
