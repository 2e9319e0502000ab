use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the homepage is persisted.
pub const DEFAULT_PAGE_KEY: &str = "default_page";

/// Homepage used when nothing (or an empty string) has been saved.
pub const FALLBACK_DEFAULT_PAGE: &str = "https://duckduckgo.com/";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings dialog is not open")]
    DialogClosed,
}

/// Minimal key-value persistence used by the settings dialog and the Home command.
pub trait SettingsStore {
    fn get(&self, key: &str, default: &str) -> String;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Resolves the homepage, never returning an empty string.
pub fn default_page<S: SettingsStore + ?Sized>(store: &S, fallback: &str) -> String {
    let value = store.get(DEFAULT_PAGE_KEY, fallback);
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Immutable configuration threaded into the main window at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub app_name: String,
    pub fallback_home_page: String,
    pub initial_tab_label: String,
    pub blank_tab_label: String,
    pub settings_file: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            app_name: "Sprig Browser".to_string(),
            fallback_home_page: FALLBACK_DEFAULT_PAGE.to_string(),
            initial_tab_label: "Homepage".to_string(),
            blank_tab_label: "Blank".to_string(),
            settings_file: "user_data.json".to_string(),
        }
    }
}

/// Settings persisted as a flat JSON object of strings.
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonSettingsStore {
    /// Opens the store at `path`, creating the directory and an empty file if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let mut store = Self {
            path,
            values: BTreeMap::new(),
        };

        if store.path.exists() {
            store.values = Self::read_values(&store.path);
        } else {
            log::info!("[Settings] Creating user data at {}", store.path.display());
            store.write()?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_values(path: &Path) -> BTreeMap<String, String> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                BTreeMap::new()
            }),
            Err(e) => {
                log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                BTreeMap::new()
            }
        }
    }

    fn write(&self) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.write()?;
        log::debug!("[Settings] Saved {} = {}", key, value);
        Ok(())
    }
}

/// Non-persistent store, handy for tests and ephemeral profiles.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, String>,
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
