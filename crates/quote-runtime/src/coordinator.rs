//! # Selection Coordinator
//!
//! Applies a plan selection to the engine and plays the page effects that
//! announce it.
//!
//! ## Announce Sequence
//! ```text
//! select_plan("premium", announce = true)
//!   │
//!   ├─ engine.set_plan("premium")        unknown key → stop, nothing else
//!   ├─ set_root_data("selectedPlan", "premium")
//!   ├─ scroll_into_view("simulator", smooth, start)
//!   ├─ add_marker("simulator", "is-flash")
//!   └─ after 600ms: remove_marker("simulator", "is-flash")
//! ```

use std::sync::Arc;
use std::time::Duration;

use quote_core::EstimateEngine;
use tracing::debug;

use crate::config::PageSettings;
use crate::host::{PageHost, ScrollBehavior, ScrollBlock};

/// Options for [`SelectionCoordinator::select_plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions {
    /// Scroll to and highlight the estimator after selecting.
    pub announce: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        SelectOptions { announce: true }
    }
}

impl SelectOptions {
    /// In-widget selection: state only, no scroll or highlight.
    pub fn quiet() -> Self {
        SelectOptions { announce: false }
    }
}

/// Wraps plan selection with the page effects that go with it.
#[derive(Clone)]
pub struct SelectionCoordinator {
    host: Arc<dyn PageHost>,
    page: PageSettings,
}

impl SelectionCoordinator {
    pub fn new(host: Arc<dyn PageHost>, page: PageSettings) -> Self {
        SelectionCoordinator { host, page }
    }

    pub fn page(&self) -> &PageSettings {
        &self.page
    }

    /// Selects a plan and, if asked, announces it on the page.
    ///
    /// ## Returns
    /// `false` when the key is unknown. No effect runs in that case.
    pub fn select_plan(&self, engine: &mut EstimateEngine, key: &str, opts: SelectOptions) -> bool {
        if !engine.set_plan(key) {
            debug!(plan_key = %key, "Ignoring unknown plan key");
            return false;
        }

        self.publish_plan_attribute(&engine.state().plan_key);

        if opts.announce {
            self.scroll_to(&self.page.section_id);
            self.flash();
        }

        true
    }

    /// Mirrors the selected plan on the page's root element.
    pub fn publish_plan_attribute(&self, plan_key: &str) {
        self.host.set_root_data(&self.page.plan_attribute, plan_key);
    }

    /// Smoothly scrolls a section to the top of the viewport.
    pub fn scroll_to(&self, section_id: &str) -> bool {
        let scrolled = self
            .host
            .scroll_into_view(section_id, ScrollBehavior::Smooth, ScrollBlock::Start);
        if !scrolled {
            debug!(section_id = %section_id, "Scroll target not on page");
        }
        scrolled
    }

    /// Highlights the estimator section for the configured duration.
    fn flash(&self) {
        let section = self.page.section_id.clone();
        let class = self.page.flash_class.clone();

        if !self.host.add_marker(&section, &class) {
            debug!(section_id = %section, "Highlight target not on page");
            return;
        }

        schedule_removal(Arc::clone(&self.host), section, class, self.page.flash_duration());
    }
}

/// Removes the marker after `after`, or right away when no runtime is running.
fn schedule_removal(host: Arc<dyn PageHost>, section: String, class: String, after: Duration) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(after).await;
                host.remove_marker(&section, &class);
            });
        }
        Err(_) => {
            debug!(section_id = %section, "No runtime for highlight timer; removing marker now");
            host.remove_marker(&section, &class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{Effect, RecordingHost};
    use quote_core::Catalog;

    fn setup(host: Arc<RecordingHost>) -> (SelectionCoordinator, EstimateEngine) {
        let coordinator = SelectionCoordinator::new(host, PageSettings::default());
        let engine = EstimateEngine::with_defaults(Arc::new(Catalog::builtin()));
        (coordinator, engine)
    }

    #[tokio::test]
    async fn test_announce_runs_scroll_then_flash() {
        let host = Arc::new(RecordingHost::standard_page());
        let (coordinator, mut engine) = setup(host.clone());

        assert!(coordinator.select_plan(&mut engine, "premium", SelectOptions::default()));
        assert_eq!(engine.state().pages, 10);

        assert_eq!(
            host.effects(),
            vec![
                Effect::RootData("selectedPlan".into(), "premium".into()),
                Effect::Scroll("simulator".into(), ScrollBehavior::Smooth, ScrollBlock::Start),
                Effect::AddMarker("simulator".into(), "is-flash".into()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_flash_marker_removed_after_600ms() {
        let host = Arc::new(RecordingHost::standard_page());
        let (coordinator, mut engine) = setup(host.clone());

        coordinator.select_plan(&mut engine, "light", SelectOptions::default());
        assert!(host.has_marker("simulator", "is-flash"));

        // Let the removal task start its timer at t = 0.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(599)).await;
        tokio::task::yield_now().await;
        assert!(host.has_marker("simulator", "is-flash"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!host.has_marker("simulator", "is-flash"));
        assert_eq!(
            host.effects().last(),
            Some(&Effect::RemoveMarker("simulator".into(), "is-flash".into()))
        );
    }

    #[test]
    fn test_flash_without_runtime_removes_immediately() {
        let host = Arc::new(RecordingHost::standard_page());
        let (coordinator, mut engine) = setup(host.clone());

        coordinator.select_plan(&mut engine, "light", SelectOptions::default());
        assert!(!host.has_marker("simulator", "is-flash"));
    }

    #[test]
    fn test_quiet_selection_has_no_page_motion() {
        let host = Arc::new(RecordingHost::standard_page());
        let (coordinator, mut engine) = setup(host.clone());

        assert!(coordinator.select_plan(&mut engine, "light", SelectOptions::quiet()));
        assert_eq!(
            host.effects(),
            vec![Effect::RootData("selectedPlan".into(), "light".into())]
        );
    }

    #[test]
    fn test_unknown_plan_has_no_effects() {
        let host = Arc::new(RecordingHost::standard_page());
        let (coordinator, mut engine) = setup(host.clone());
        let before = engine.state().clone();

        assert!(!coordinator.select_plan(&mut engine, "enterprise", SelectOptions::default()));
        assert_eq!(engine.state(), &before);
        assert!(host.effects().is_empty());
    }

    #[test]
    fn test_missing_section_is_tolerated() {
        let host = Arc::new(RecordingHost::empty_page());
        let (coordinator, mut engine) = setup(host.clone());

        assert!(coordinator.select_plan(&mut engine, "premium", SelectOptions::default()));
        assert_eq!(engine.state().plan_key, "premium");
        assert_eq!(host.root_data("selectedPlan").as_deref(), Some("premium"));
        assert!(!coordinator.scroll_to("contact"));
    }
}
