// Tab container - pure logic, no Tauri imports.
// Owns every tab and its web view, and tracks which one is active.

use crate::modules::webview::{TabId, WebView, WebViewError, WebViewFactory};

/// One browsing context: a web view plus the label shown in the tab strip.
#[derive(Debug)]
pub struct Tab<V> {
    id: TabId,
    view: V,
    label: String,
}

impl<V: WebView> Tab<V> {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

/// Ordered tabs plus the active pointer.
///
/// Invariants: once a tab exists the container never drops back to zero tabs
/// through `close_tab`, and `active` always indexes an existing tab while the
/// container is non-empty.
pub struct TabContainer<F: WebViewFactory> {
    factory: F,
    tabs: Vec<Tab<F::View>>,
    active: Option<usize>,
    next_id: u64,
}

impl<F: WebViewFactory> TabContainer<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            tabs: Vec::new(),
            active: None,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab<F::View>> {
        self.tabs.iter()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Tab<F::View>> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab<F::View>> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active().map(|t| t.id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab<F::View>> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// Appends a tab loading `url` (or `default_page`) and makes it active.
    pub fn create_tab(
        &mut self,
        url: Option<&str>,
        label: &str,
        default_page: &str,
    ) -> Result<TabId, WebViewError> {
        let id = TabId(self.next_id);
        let mut view = self.factory.create(id)?;
        self.next_id += 1;

        let url = url.unwrap_or(default_page);
        view.load(url);

        self.tabs.push(Tab {
            id,
            view,
            label: label.to_string(),
        });
        self.active = Some(self.tabs.len() - 1);

        log::info!("[Tabs] Created {} '{}' -> {}", id, label, url);
        Ok(id)
    }

    /// Removes the tab at `index` unless it is the last one.
    ///
    /// The removed tab is returned; dropping it releases its web view.
    pub fn close_tab(&mut self, index: usize) -> Option<Tab<F::View>> {
        if self.tabs.len() < 2 || index >= self.tabs.len() {
            return None;
        }

        let removed = self.tabs.remove(index);

        // Prefer the tab that slid into the removed slot, else the new last one.
        self.active = match self.active {
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };

        log::info!("[Tabs] Closed {} '{}'", removed.id, removed.label);
        Some(removed)
    }

    /// Moves the active pointer; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// A double-click that lands on no tab opens a new one.
    pub fn on_tab_bar_double_click(
        &mut self,
        index: i32,
        label: &str,
        default_page: &str,
    ) -> Result<Option<TabId>, WebViewError> {
        let on_existing_tab = usize::try_from(index).is_ok_and(|i| i < self.tabs.len());
        if on_existing_tab {
            return Ok(None);
        }
        self.create_tab(None, label, default_page).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::webview::fake::FakeFactory;
    use rstest::rstest;

    const HOME: &str = "https://home.test/";

    fn container_with(n: usize) -> TabContainer<FakeFactory> {
        let mut tabs = TabContainer::new(FakeFactory::default());
        for i in 0..n {
            tabs.create_tab(Some(format!("https://{}.test/", i).as_str()), "Blank", HOME)
                .unwrap();
        }
        tabs
    }

    #[test]
    fn create_tab_appends_and_activates() {
        let mut tabs = container_with(2);
        let id = tabs.create_tab(Some("https://new.test/"), "New", HOME).unwrap();

        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs.active_index(), Some(2));
        assert_eq!(tabs.active_id(), Some(id));
        let active = tabs.active().unwrap();
        assert_eq!(active.label(), "New");
        assert_eq!(active.view().loads, vec!["https://new.test/"]);
    }

    #[test]
    fn create_tab_without_url_uses_default_page() {
        let mut tabs = container_with(0);
        tabs.create_tab(None, "Blank", HOME).unwrap();
        assert_eq!(tabs.active().unwrap().view().loads, vec![HOME]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut tabs = container_with(2);
        let closed = tabs.close_tab(1).unwrap();
        let fresh = tabs.create_tab(None, "Blank", HOME).unwrap();
        assert_ne!(closed.id(), fresh);
    }

    #[test]
    fn factory_failure_leaves_container_untouched() {
        let mut tabs = container_with(1);
        tabs.factory.fail = true;

        assert!(tabs.create_tab(None, "Blank", HOME).is_err());
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.active_index(), Some(0));
    }

    #[test]
    fn last_tab_cannot_be_closed() {
        let mut tabs = container_with(1);
        assert!(tabs.close_tab(0).is_none());
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs.active_index(), Some(0));
    }

    #[rstest]
    // (tabs, active, close, expected active afterwards)
    #[case(3, 2, 2, 1)]
    #[case(3, 1, 1, 1)]
    #[case(3, 0, 0, 0)]
    #[case(3, 2, 0, 1)]
    #[case(3, 0, 2, 0)]
    fn close_tab_keeps_active_pointer_valid(
        #[case] n: usize,
        #[case] active: usize,
        #[case] close: usize,
        #[case] expected: usize,
    ) {
        let mut tabs = container_with(n);
        tabs.select(active);
        let survivor = if active == close {
            None
        } else {
            tabs.active_id()
        };

        assert!(tabs.close_tab(close).is_some());

        assert_eq!(tabs.active_index(), Some(expected));
        if let Some(id) = survivor {
            assert_eq!(tabs.active_id(), Some(id));
        }
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut tabs = container_with(2);
        assert!(tabs.close_tab(7).is_none());
        assert!(!tabs.select(7));
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_index(), Some(1));
    }

    #[rstest]
    #[case(-1, true)]
    #[case(5, true)]
    #[case(0, false)]
    #[case(1, false)]
    fn double_click_only_opens_on_empty_area(#[case] index: i32, #[case] opens: bool) {
        let mut tabs = container_with(2);
        let created = tabs.on_tab_bar_double_click(index, "Blank", HOME).unwrap();

        assert_eq!(created.is_some(), opens);
        assert_eq!(tabs.len(), if opens { 3 } else { 2 });
    }

    #[test]
    fn never_reaches_zero_tabs() {
        let mut tabs = container_with(1);
        // Deterministic pseudo-random mix of opens and closes.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                tabs.create_tab(None, "Blank", HOME).unwrap();
            } else {
                let index = (seed as usize >> 4) % (tabs.len() + 1);
                tabs.close_tab(index);
            }
            assert!(!tabs.is_empty());
            let active = tabs.active_index().unwrap();
            assert!(active < tabs.len());
        }
    }
}
