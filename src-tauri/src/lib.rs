// Sprig Browser library entry point.
// Exposes every module so main.rs stays a one-liner and the logic can be
// tested without a window.

use tauri::Manager;

pub mod settings;
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

// Tauri glue
pub mod shell;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            if let Some(main) = app.get_window(shell::MAIN_WINDOW) {
                if let Err(e) = main.set_focus() {
                    log::warn!("[Shell] Failed to focus main window: {}", e);
                }
            }
        }))
        .setup(|app| {
            let level = if cfg!(debug_assertions) {
                log::LevelFilter::Info
            } else {
                log::LevelFilter::Warn
            };
            app.handle()
                .plugin(tauri_plugin_log::Builder::default().level(level).build())?;

            shell::init(app)
        })
        .invoke_handler(tauri::generate_handler![
            shell::toolbar_items,
            shell::chrome_state,
            shell::toolbar_command,
            shell::submit_url,
            shell::tab_bar_double_clicked,
            shell::select_tab,
            shell::close_tab,
            shell::settings_text,
            shell::save_settings,
            shell::close_settings
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
