// Shared state managed by tauri.
// Every IPC command and engine callback goes through this one lock, which
// keeps the browser's callbacks strictly one-at-a-time.

use std::sync::Mutex;

use crate::modules::window::MainWindow;
use crate::settings::JsonSettingsStore;
use crate::shell::TauriWebViewFactory;

pub type BrowserWindow = MainWindow<TauriWebViewFactory, JsonSettingsStore>;

pub struct BrowserState {
    pub window: Mutex<BrowserWindow>,
}

impl BrowserState {
    pub fn new(window: BrowserWindow) -> Self {
        Self {
            window: Mutex::new(window),
        }
    }
}
