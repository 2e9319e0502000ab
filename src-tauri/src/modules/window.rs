// Main window orchestration - pure logic, no Tauri imports.
// Keeps the URL bar, window title and tab labels in sync with the tabs.

use crate::modules::navigation::with_default_scheme;
use crate::modules::settings_dialog::{DialogOutcome, SettingsDialog};
use crate::modules::tabs::TabContainer;
use crate::modules::toolbar::ToolbarCommand;
use crate::modules::webview::{TabId, WebView, WebViewFactory};
use crate::settings::{default_page, BrowserConfig, SettingsError, SettingsStore};
use serde::Serialize;

/// What the shell has to do after a toolbar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// No active tab, or the settings dialog is blocking the toolbar.
    Ignored,
    OpenSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSummary {
    pub id: TabId,
    pub label: String,
    pub active: bool,
}

/// Everything the chrome page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeSnapshot {
    pub tabs: Vec<TabSummary>,
    pub active_index: Option<usize>,
    pub url_bar: String,
    pub title: String,
    pub settings_open: bool,
}

pub struct MainWindow<F: WebViewFactory, S: SettingsStore> {
    config: BrowserConfig,
    settings: S,
    tabs: TabContainer<F>,
    url_bar: String,
    title: String,
    dialog: Option<SettingsDialog>,
}

impl<F: WebViewFactory, S: SettingsStore> MainWindow<F, S> {
    pub fn new(config: BrowserConfig, settings: S, factory: F) -> Self {
        let title = config.app_name.clone();
        Self {
            config,
            settings,
            tabs: TabContainer::new(factory),
            url_bar: String::new(),
            title,
            dialog: None,
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabContainer<F> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabContainer<F> {
        &mut self.tabs
    }

    pub fn url_bar(&self) -> &str {
        &self.url_bar
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn settings_dialog(&self) -> Option<&SettingsDialog> {
        self.dialog.as_ref()
    }

    /// Current homepage, re-read from the store on every use.
    pub fn home_page(&self) -> String {
        default_page(&self.settings, &self.config.fallback_home_page)
    }

    /// Opens the homepage tab and resets the title to the bare app name.
    pub fn startup(&mut self) -> Option<TabId> {
        let label = self.config.initial_tab_label.clone();
        let id = self.add_new_tab(None, &label);
        self.title = self.config.app_name.clone();
        id
    }

    /// Opens a tab on `url`, or on the homepage when `url` is `None`.
    pub fn add_new_tab(&mut self, url: Option<&str>, label: &str) -> Option<TabId> {
        let before = self.tabs.active_id();
        let home = self.home_page();
        match self.tabs.create_tab(url, label, &home) {
            Ok(id) => {
                self.after_pointer_move(before);
                Some(id)
            }
            Err(e) => {
                log::warn!("[Tabs] {}", e);
                None
            }
        }
    }

    pub fn tab_bar_double_clicked(&mut self, index: i32) -> Option<TabId> {
        let before = self.tabs.active_id();
        let home = self.home_page();
        let label = self.config.blank_tab_label.clone();
        match self.tabs.on_tab_bar_double_click(index, &label, &home) {
            Ok(created) => {
                self.after_pointer_move(before);
                created
            }
            Err(e) => {
                log::warn!("[Tabs] {}", e);
                None
            }
        }
    }

    pub fn close_tab(&mut self, index: usize) -> bool {
        let before = self.tabs.active_id();
        let Some(removed) = self.tabs.close_tab(index) else {
            return false;
        };
        // The web view goes away with its tab.
        drop(removed);
        self.after_pointer_move(before);
        true
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        let before = self.tabs.active_id();
        if !self.tabs.select(index) {
            return false;
        }
        self.after_pointer_move(before);
        true
    }

    /// A new document started loading in tab `id`; its old title no longer applies.
    pub fn on_load_started(&mut self, id: TabId, url: &str) {
        if let Some(tab) = self.tabs.get_mut(id) {
            tab.view_mut().forget_title();
        }
        self.on_url_changed(id, url);
    }

    pub fn on_url_changed(&mut self, id: TabId, url: &str) {
        if self.tabs.active_id() == Some(id) {
            self.url_bar = url.to_string();
        }
    }

    pub fn on_load_finished(&mut self, id: TabId) {
        if let Some(tab) = self.tabs.get_mut(id) {
            let title = tab.view().title();
            tab.set_label(title);
        }
    }

    /// Title updates that arrive after load-finished still reach the label.
    pub fn on_title_changed(&mut self, id: TabId) {
        self.on_load_finished(id);
        if self.tabs.active_id() == Some(id) {
            self.refresh_title();
        }
    }

    pub fn dispatch(&mut self, command: ToolbarCommand) -> Dispatch {
        if self.dialog.is_some() {
            log::debug!("[Toolbar] {:?} ignored while settings are open", command);
            return Dispatch::Ignored;
        }

        if command == ToolbarCommand::Settings {
            self.open_settings();
            return Dispatch::OpenSettings;
        }

        let home = self.home_page();
        let Some(tab) = self.tabs.active_mut() else {
            return Dispatch::Ignored;
        };
        let view = tab.view_mut();

        match command {
            ToolbarCommand::Back => view.back(),
            ToolbarCommand::Forward => view.forward(),
            ToolbarCommand::Reload => view.reload(),
            ToolbarCommand::Stop => view.stop(),
            ToolbarCommand::Home => view.load(&home),
            // Opened above.
            ToolbarCommand::Settings => {}
        }

        Dispatch::Handled
    }

    /// Loads URL-field text into the active tab, defaulting the scheme.
    pub fn submit_url(&mut self, text: &str) -> Dispatch {
        if self.dialog.is_some() {
            return Dispatch::Ignored;
        }
        let target = with_default_scheme(text);
        match self.tabs.active_mut() {
            Some(tab) => {
                log::debug!("[Navigation] {} -> {}", tab.id(), target);
                tab.view_mut().load(&target);
                Dispatch::Handled
            }
            None => Dispatch::Ignored,
        }
    }

    pub fn open_settings(&mut self) -> &SettingsDialog {
        let fallback = &self.config.fallback_home_page;
        self.dialog
            .get_or_insert_with(|| SettingsDialog::open(&self.settings, fallback))
    }

    /// Saves the dialog's text. Fails if the dialog has already been closed.
    pub fn save_settings(&mut self, text: &str) -> Result<(), SettingsError> {
        let dialog = self.dialog.as_mut().ok_or(SettingsError::DialogClosed)?;
        dialog.set_text(text);
        dialog.save(&mut self.settings)?;
        log::info!("[Settings] Default page set to {}", text);
        Ok(())
    }

    /// Closes the dialog. Cancel never reverts a save that already happened.
    pub fn close_settings(&mut self, outcome: DialogOutcome) {
        if self.dialog.take().is_some() {
            log::debug!("[Settings] Dialog closed: {:?}", outcome);
        }
    }

    pub fn snapshot(&self) -> ChromeSnapshot {
        let active = self.tabs.active_index();
        ChromeSnapshot {
            tabs: self
                .tabs
                .iter()
                .enumerate()
                .map(|(i, t)| TabSummary {
                    id: t.id(),
                    label: t.label().to_string(),
                    active: Some(i) == active,
                })
                .collect(),
            active_index: active,
            url_bar: self.url_bar.clone(),
            title: self.title.clone(),
            settings_open: self.dialog.is_some(),
        }
    }

    fn after_pointer_move(&mut self, before: Option<TabId>) {
        let now = self.tabs.active_id();
        if now == before {
            return;
        }

        if let Some(tab) = before.and_then(|id| self.tabs.get_mut(id)) {
            tab.view_mut().set_visible(false);
        }
        if let Some(tab) = self.tabs.active_mut() {
            tab.view_mut().set_visible(true);
        }

        self.current_tab_changed();
    }

    fn current_tab_changed(&mut self) {
        if let Some(url) = self.tabs.active().map(|t| t.view().url()) {
            self.url_bar = url;
        }
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        if let Some(page_title) = self.tabs.active().map(|t| t.view().title()) {
            self.title = format!("{} - {}", page_title, self.config.app_name);
        }
    }
}
