// Module exports for pure logic
pub mod navigation;
pub mod settings_dialog;     // Homepage form
pub mod tabs;                // Tab container + active pointer
pub mod toolbar;             // Command table
pub mod webview;             // Engine seam
pub mod window;              // Orchestration
