// Seam between the browser logic and the embedded engine.
// The tauri-backed implementation lives in `shell`; tests use the fakes below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier tying a web view's notifications back to its tab.
/// Ids are handed out monotonically and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u64);

impl TabId {
    const LABEL_PREFIX: &'static str = "tab-";

    /// Webview label used by the shell for this tab.
    pub fn label(&self) -> String {
        format!("{}{}", Self::LABEL_PREFIX, self.0)
    }

    /// Parses a webview label produced by [`TabId::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        label
            .strip_prefix(Self::LABEL_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(Self)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tab({})", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebViewError {
    #[error("failed to create web view for {0}: {1}")]
    Create(TabId, String),
}

/// One embedded rendering surface.
pub trait WebView {
    fn load(&mut self, url: &str);
    fn url(&self) -> String;
    fn title(&self) -> String;
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);

    /// Drops the cached document title when a new page starts loading.
    fn forget_title(&mut self) {}

    /// Shows or hides the surface when the active tab changes.
    fn set_visible(&mut self, _visible: bool) {}
}

/// Creates the web view owned by a new tab.
pub trait WebViewFactory {
    type View: WebView;

    fn create(&mut self, id: TabId) -> Result<Self::View, WebViewError>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn label_round_trips() {
        let id = TabId(42);
        assert_eq!(id.label(), "tab-42");
        assert_eq!(TabId::from_label(&id.label()), Some(id));
    }

    #[rstest]
    #[case("main")]
    #[case("tab-")]
    #[case("tab-x")]
    #[case("settings")]
    fn foreign_labels_are_rejected(#[case] label: &str) {
        assert_eq!(TabId::from_label(label), None);
    }
}
