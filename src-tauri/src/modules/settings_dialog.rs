// Settings dialog model: one text field bound to the `default_page` key.

use crate::settings::{SettingsError, SettingsStore, DEFAULT_PAGE_KEY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogOutcome {
    Accepted,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    text: String,
}

impl SettingsDialog {
    pub const TITLE: &'static str = "Settings";

    /// Reads the current homepage into the text field.
    pub fn open<S: SettingsStore + ?Sized>(store: &S, fallback: &str) -> Self {
        Self {
            text: store.get(DEFAULT_PAGE_KEY, fallback),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Writes the field verbatim. Malformed URLs are accepted as-is.
    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) -> Result<(), SettingsError> {
        store.set(DEFAULT_PAGE_KEY, &self.text)
    }
}
