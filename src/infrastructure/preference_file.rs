use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::ports::PreferenceStore;
use crate::domain::preferences::Theme;

const THEME_KEY: &str = "app-theme";

/// A preferences file that cannot be read or written is a server fault, not
/// an object storage one.
fn file_error(e: io::Error) -> DomainError {
    DomainError::Internal(format!("preferences file: {e}"))
}

/// Preferences kept as a flat JSON object of string values.
pub struct JsonPreferenceStore {
    path: PathBuf,
    /// Held across each read-modify-write of the file.
    file: Mutex<()>,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<BTreeMap<String, String>, DomainError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(file_error(e)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, DomainError> {
        self.file
            .lock()
            .map_err(|_| DomainError::Internal("preferences lock poisoned".to_string()))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, DomainError> {
        let entries = {
            let _file = self.lock()?;
            self.read()?
        };
        let Some(saved) = entries.get(THEME_KEY) else {
            return Ok(None);
        };
        match saved.parse() {
            Ok(theme) => Ok(Some(theme)),
            Err(_) => {
                log::warn!("Ignoring unknown saved theme '{}'", saved);
                Ok(None)
            }
        }
    }

    fn save_theme(&self, theme: Theme) -> Result<(), DomainError> {
        let _file = self.lock()?;
        let mut entries = self.read()?;
        entries.insert(THEME_KEY.to_string(), theme.as_str().to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(file_error)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?).map_err(file_error)?;
        Ok(())
    }
}
