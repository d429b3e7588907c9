use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::PreferenceStore;
use crate::domain::preferences::Theme;

/// Theme selection, falling back to the default configured at startup.
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
    default_theme: Theme,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>, default_theme: Theme) -> Self {
        Self {
            store,
            default_theme,
        }
    }

    pub fn theme(&self) -> Result<Theme, DomainError> {
        Ok(self.store.load_theme()?.unwrap_or(self.default_theme))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme, DomainError> {
        self.store.save_theme(theme)?;
        log::info!("Theme set to {}", theme);
        Ok(theme)
    }
}
