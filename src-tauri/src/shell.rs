// Tauri glue: the real web views, the IPC commands the chrome page calls,
// and the engine callbacks routed back into the browser state.

use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{
    AppHandle, Emitter, Manager, PhysicalPosition, PhysicalSize, Webview, WebviewBuilder,
    WebviewUrl, Window, WindowEvent,
};
use url::Url;

use crate::modules::settings_dialog::{DialogOutcome, SettingsDialog};
use crate::modules::toolbar::{ToolbarCommand, ToolbarItem, TOOLBAR};
use crate::modules::webview::{TabId, WebView, WebViewError, WebViewFactory};
use crate::modules::window::{ChromeSnapshot, Dispatch, MainWindow};
use crate::settings::{BrowserConfig, JsonSettingsStore};
use crate::state::{BrowserState, BrowserWindow};

pub const MAIN_WINDOW: &str = "main";
pub const SETTINGS_WINDOW: &str = "settings";
pub const CHROME_STATE_EVENT: &str = "chrome-state";

/// Toolbar row plus tab strip, in logical pixels.
const CHROME_HEIGHT_LOGICAL: f64 = 56.0 + 28.0;

// --- Web view adapter ---

/// A tab's content webview, laid out below the chrome inside the main window.
pub struct TauriWebView {
    webview: Webview,
    window: Window,
    title: String,
    visible: bool,
}

impl TauriWebView {
    /// Stores the engine's latest document title.
    pub fn record_title(&mut self, title: String) {
        self.title = title;
    }

    /// Fills the content area when visible, collapses to nothing otherwise.
    pub fn layout(&self) {
        let rect = match content_rect(&self.window, self.visible) {
            Ok(rect) => rect,
            Err(e) => {
                log::warn!("[Shell] Failed to measure window: {}", e);
                return;
            }
        };
        if let Err(e) = self.webview.set_bounds(rect) {
            log::warn!("[Shell] Failed to lay out {}: {}", self.webview.label(), e);
        }
    }

    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.eval(script) {
            log::warn!("[Shell] Script failed in {}: {}", self.webview.label(), e);
        }
    }
}

impl WebView for TauriWebView {
    fn load(&mut self, url: &str) {
        self.title.clear();
        match Url::parse(url) {
            Ok(parsed) => {
                if let Err(e) = self.webview.navigate(parsed) {
                    log::warn!("[Shell] Navigation to {} failed: {}", url, e);
                }
            }
            Err(e) => {
                // Let the engine show its own error page for addresses we cannot parse.
                log::debug!("[Shell] Handing unparseable URL {:?} to the engine: {}", url, e);
                match serde_json::to_string(url) {
                    Ok(literal) => self.eval(&format!("window.location.href = {}", literal)),
                    Err(e) => log::warn!("[Shell] Cannot encode {}: {}", url, e),
                }
            }
        }
    }

    fn url(&self) -> String {
        self.webview
            .url()
            .map(|u| u.to_string())
            .unwrap_or_default()
    }

    /// Engines report the address while a page has no title yet.
    fn title(&self) -> String {
        if self.title.is_empty() {
            self.url()
        } else {
            self.title.clone()
        }
    }

    fn back(&mut self) {
        self.eval("window.history.back()");
    }

    fn forward(&mut self) {
        self.eval("window.history.forward()");
    }

    fn reload(&mut self) {
        self.eval("window.location.reload()");
    }

    fn stop(&mut self) {
        self.eval("window.stop()");
    }

    fn forget_title(&mut self) {
        self.title.clear();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.layout();
    }
}

impl Drop for TauriWebView {
    fn drop(&mut self) {
        if let Err(e) = self.webview.close() {
            log::warn!("[Shell] Failed to close {}: {}", self.webview.label(), e);
        }
    }
}

pub struct TauriWebViewFactory {
    window: Window,
}

impl TauriWebViewFactory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl WebViewFactory for TauriWebViewFactory {
    type View = TauriWebView;

    fn create(&mut self, id: TabId) -> Result<TauriWebView, WebViewError> {
        let create_err = |e: String| WebViewError::Create(id, e);

        let blank = Url::parse("about:blank").map_err(|e| create_err(e.to_string()))?;
        let builder = WebviewBuilder::new(id.label(), WebviewUrl::External(blank))
            .on_page_load(forward_page_load)
            .on_document_title_changed(forward_title_change);

        let rect = content_rect(&self.window, true).map_err(|e| create_err(e.to_string()))?;
        let webview = self
            .window
            .add_child(builder, rect.position, rect.size)
            .map_err(|e| create_err(e.to_string()))?;

        log::debug!("[Shell] Created webview {}", webview.label());
        Ok(TauriWebView {
            webview,
            window: self.window.clone(),
            title: String::new(),
            visible: true,
        })
    }
}

fn content_rect(window: &Window, visible: bool) -> tauri::Result<tauri::Rect> {
    let physical_size = window.inner_size()?;
    let scale_factor = window.scale_factor()?;
    let chrome_physical = (CHROME_HEIGHT_LOGICAL * scale_factor) as u32;

    let size = if visible {
        let height = physical_size.height.saturating_sub(chrome_physical).max(100);
        PhysicalSize::new(physical_size.width, height)
    } else {
        PhysicalSize::new(0, 0)
    };

    Ok(tauri::Rect {
        position: tauri::Position::Physical(PhysicalPosition::new(0, chrome_physical as i32)),
        size: tauri::Size::Physical(size),
    })
}

// --- Engine callbacks ---
//
// Callbacks may arrive on the thread that is busy creating a webview while
// holding the browser lock, so they are replayed on the async runtime.

fn forward_page_load(webview: Webview, payload: PageLoadPayload<'_>) {
    let Some(id) = TabId::from_label(webview.label()) else {
        return;
    };
    let url = payload.url().to_string();
    let event = payload.event();
    let app = webview.app_handle().clone();

    tauri::async_runtime::spawn(async move {
        let result = with_browser(&app, |browser| match event {
            PageLoadEvent::Started => browser.on_load_started(id, &url),
            PageLoadEvent::Finished => {
                browser.on_url_changed(id, &url);
                browser.on_load_finished(id);
            }
        });
        if let Err(e) = result {
            log::warn!("[Shell] Dropped page-load event for {}: {}", id, e);
        }
    });
}

fn forward_title_change(webview: Webview, title: String) {
    let Some(id) = TabId::from_label(webview.label()) else {
        return;
    };
    let app = webview.app_handle().clone();

    tauri::async_runtime::spawn(async move {
        let result = with_browser(&app, |browser| {
            if let Some(tab) = browser.tabs_mut().get_mut(id) {
                tab.view_mut().record_title(title);
            }
            browser.on_title_changed(id);
        });
        if let Err(e) = result {
            log::warn!("[Shell] Dropped title event for {}: {}", id, e);
        }
    });
}

// --- State access ---

/// Runs `f` against the browser under its lock, then republishes the chrome state.
pub fn with_browser<T>(app: &AppHandle, f: impl FnOnce(&mut BrowserWindow) -> T) -> Result<T, String> {
    let state = app
        .try_state::<BrowserState>()
        .ok_or("browser state is not initialized")?;
    let mut browser = state.window.lock().map_err(|e| e.to_string())?;
    let result = f(&mut browser);
    publish(app, &browser);
    Ok(result)
}

fn publish(app: &AppHandle, browser: &BrowserWindow) {
    let snapshot = browser.snapshot();

    if let Some(main) = app.get_window(MAIN_WINDOW) {
        if let Err(e) = main.set_title(&snapshot.title) {
            log::warn!("[Shell] Failed to set window title: {}", e);
        }
    }

    if let Err(e) = app.emit(CHROME_STATE_EVENT, snapshot) {
        log::warn!("[Shell] Failed to emit chrome state: {}", e);
    }
}

fn relayout(app: &AppHandle) -> Result<(), String> {
    with_browser(app, |browser| {
        for tab in browser.tabs().iter() {
            tab.view().layout();
        }
    })
}

/// Builds the browser, opens the homepage tab and hooks window events.
pub fn init(app: &mut tauri::App) -> Result<(), Box<dyn std::error::Error>> {
    let main_window = app
        .get_window(MAIN_WINDOW)
        .ok_or("main window is not configured")?;

    let config = BrowserConfig::default();
    let data_dir = app.path().app_data_dir()?;
    let store = JsonSettingsStore::open(data_dir.join(&config.settings_file))?;
    log::info!("[Settings] Using {}", store.path().display());

    // Managed before the first tab exists so its page-load callbacks find the state.
    let browser = MainWindow::new(config, store, TauriWebViewFactory::new(main_window.clone()));
    app.manage(BrowserState::new(browser));

    with_browser(app.handle(), |browser| {
        if browser.startup().is_none() {
            log::warn!("[Shell] Starting without a homepage tab");
        }
    })?;

    let handle = app.handle().clone();
    main_window.on_window_event(move |event| {
        if let WindowEvent::Resized(_) = event {
            let app = handle.clone();
            tauri::async_runtime::spawn(async move {
                if let Err(e) = relayout(&app) {
                    log::warn!("[Shell] Relayout failed: {}", e);
                }
            });
        }
    });

    Ok(())
}

fn show_settings_window(app: &AppHandle, app_name: &str) -> Result<(), String> {
    if let Some(win) = app.get_webview_window(SETTINGS_WINDOW) {
        if let Err(e) = win.set_focus() {
            log::warn!("[Shell] Failed to focus settings window: {}", e);
        }
        return Ok(());
    }

    let settings_window = tauri::WebviewWindowBuilder::new(
        app,
        SETTINGS_WINDOW,
        WebviewUrl::App("settings.html".into()),
    )
    .title(format!("{} - {}", app_name, SettingsDialog::TITLE))
    .inner_size(420.0, 140.0)
    .resizable(false)
    .minimizable(false)
    .maximizable(false)
    .always_on_top(true)
    .center()
    .focused(true)
    .build()
    .map_err(|e| e.to_string())?;

    // Closing the window any other way counts as cancel.
    let handle = app.clone();
    settings_window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            let app = handle.clone();
            tauri::async_runtime::spawn(async move {
                let result =
                    with_browser(&app, |browser| browser.close_settings(DialogOutcome::Cancelled));
                if let Err(e) = result {
                    log::warn!("[Shell] Settings dialog left open after window closed: {}", e);
                }
            });
        }
    });

    Ok(())
}

// --- Commands invoked by the chrome and settings pages ---

#[tauri::command]
pub async fn toolbar_items() -> Vec<ToolbarItem> {
    TOOLBAR.to_vec()
}

#[tauri::command]
pub async fn chrome_state(app: AppHandle) -> Result<ChromeSnapshot, String> {
    with_browser(&app, |browser| browser.snapshot())
}

#[tauri::command]
pub async fn toolbar_command(app: AppHandle, command: ToolbarCommand) -> Result<(), String> {
    let (dispatch, app_name) = with_browser(&app, |browser| {
        (browser.dispatch(command), browser.config().app_name.clone())
    })?;

    if dispatch == Dispatch::OpenSettings {
        if let Err(e) = show_settings_window(&app, &app_name) {
            // Without a window nothing would ever close the dialog.
            log::warn!("[Shell] Failed to open settings window: {}", e);
            with_browser(&app, |browser| browser.close_settings(DialogOutcome::Cancelled))?;
            return Err(e);
        }
    }
    Ok(())
}

#[tauri::command]
pub async fn submit_url(app: AppHandle, text: String) -> Result<(), String> {
    with_browser(&app, |browser| {
        browser.submit_url(&text);
    })
}

#[tauri::command]
pub async fn tab_bar_double_clicked(app: AppHandle, index: i32) -> Result<(), String> {
    with_browser(&app, |browser| {
        browser.tab_bar_double_clicked(index);
    })
}

#[tauri::command]
pub async fn select_tab(app: AppHandle, index: usize) -> Result<(), String> {
    with_browser(&app, |browser| {
        browser.select_tab(index);
    })
}

#[tauri::command]
pub async fn close_tab(app: AppHandle, index: usize) -> Result<(), String> {
    with_browser(&app, |browser| {
        browser.close_tab(index);
    })
}

#[tauri::command]
pub async fn settings_text(app: AppHandle) -> Result<String, String> {
    with_browser(&app, |browser| browser.open_settings().text().to_string())
}

#[tauri::command]
pub async fn save_settings(app: AppHandle, text: String) -> Result<(), String> {
    with_browser(&app, |browser| browser.save_settings(&text))?.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn close_settings(app: AppHandle, accepted: bool) -> Result<(), String> {
    let outcome = if accepted {
        DialogOutcome::Accepted
    } else {
        DialogOutcome::Cancelled
    };
    with_browser(&app, |browser| browser.close_settings(outcome))?;

    if let Some(win) = app.get_webview_window(SETTINGS_WINDOW) {
        win.close().map_err(|e| e.to_string())?;
    }
    Ok(())
}
