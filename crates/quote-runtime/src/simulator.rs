//! # Simulator
//!
//! The mounted estimator widget: one engine, its page effects, and its
//! subscription to the `select-plan` bus.
//!
//! ## Mount Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Simulator::mount(config, host, bus)                                    │
//! │                                                                         │
//! │  1. Build EstimateEngine from config.catalog() + config.defaults        │
//! │     (unknown default plan → first catalog plan)                        │
//! │  2. SummarySink::attach  → initial push into the summary field          │
//! │  3. set_root_data(plan_attribute, plan_key)                            │
//! │  4. bus.subscribe()      → exactly one subscription                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The simulator owns the engine outright. Widget controls call `&mut self`
//! methods; bus messages queue in the broadcast receiver and are applied one
//! at a time by [`Simulator::pump`] or [`Simulator::run`].

use std::sync::Arc;

use quote_core::{EstimateEngine, EstimateSnapshot};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::bus::{SelectPlan, SignalBus, SELECT_PLAN_EVENT};
use crate::config::SimulatorConfig;
use crate::coordinator::{SelectOptions, SelectionCoordinator};
use crate::host::PageHost;
use crate::sink::SummarySink;

/// A mounted estimator.
pub struct Simulator {
    engine: EstimateEngine,
    coordinator: SelectionCoordinator,
    sink: SummarySink,
    signals: broadcast::Receiver<SelectPlan>,
}

impl Simulator {
    /// Mounts the estimator on a page and subscribes to the bus.
    pub fn mount(config: &SimulatorConfig, host: Arc<dyn PageHost>, bus: &SignalBus) -> Self {
        let catalog = config.catalog();

        if catalog.find_plan(&config.defaults.plan).is_none() {
            warn!(
                plan_key = %config.defaults.plan,
                fallback = %catalog.first_plan().key,
                "Default plan not in catalog, falling back to first plan"
            );
        }

        let mut engine = EstimateEngine::new(Arc::new(catalog), config.defaults.initial_state());

        let sink = SummarySink::new(Arc::clone(&host), config.page.summary_field.clone());
        sink.attach(&mut engine);

        let coordinator = SelectionCoordinator::new(host, config.page.clone());
        coordinator.publish_plan_attribute(&engine.state().plan_key);

        let signals = bus.subscribe();

        info!(
            plan_key = %engine.state().plan_key,
            pages = engine.state().pages,
            channel = SELECT_PLAN_EVENT,
            "Simulator mounted"
        );

        Simulator {
            engine,
            coordinator,
            sink,
            signals,
        }
    }

    // =========================================================================
    // Widget Controls
    // =========================================================================

    /// Plan chosen inside the widget. No scroll or highlight.
    pub fn select_plan(&mut self, key: &str) -> bool {
        self.coordinator
            .select_plan(&mut self.engine, key, SelectOptions::quiet())
    }

    /// Plan chosen from elsewhere on the page.
    pub fn announce_plan(&mut self, key: &str) -> bool {
        self.coordinator
            .select_plan(&mut self.engine, key, SelectOptions::default())
    }

    pub fn increment_pages(&mut self) -> u32 {
        self.engine.increment_pages()
    }

    pub fn decrement_pages(&mut self) -> u32 {
        self.engine.decrement_pages()
    }

    pub fn set_pages_direct(&mut self, pages: i64) -> u32 {
        self.engine.set_pages_direct(pages)
    }

    pub fn toggle_option(&mut self, key: &str) -> bool {
        self.engine.toggle_option(key)
    }

    /// "Contact with this estimate": refresh the summary field, then scroll
    /// to the contact form.
    pub fn go_contact(&mut self) -> bool {
        self.sink.push(self.engine.summary_text());
        let section = self.coordinator.page().contact_section_id.clone();
        self.coordinator.scroll_to(&section)
    }

    pub fn snapshot(&self) -> EstimateSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &EstimateEngine {
        &self.engine
    }

    // =========================================================================
    // Bus Handling
    // =========================================================================

    /// Applies one bus message. Empty keys are ignored.
    pub fn handle_signal(&mut self, msg: &SelectPlan) -> bool {
        if msg.is_empty() {
            debug!("Ignoring select-plan message without planKey");
            return false;
        }
        self.announce_plan(&msg.plan_key)
    }

    /// Applies every queued bus message without waiting.
    ///
    /// ## Returns
    /// Number of messages taken off the queue.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.signals.try_recv() {
                Ok(msg) => {
                    self.handle_signal(&msg);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Simulator lagged behind select-plan bus");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        handled
    }

    /// Waits for the next bus message. `None` once every publisher is gone.
    pub async fn next_signal(&mut self) -> Option<SelectPlan> {
        loop {
            match self.signals.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Simulator lagged behind select-plan bus");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Applies bus messages until every publisher is gone.
    pub async fn run(&mut self) {
        while let Some(msg) = self.next_signal().await {
            self.handle_signal(&msg);
        }
        debug!("select-plan bus closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{Effect, RecordingHost};
    use crate::host::{ScrollBehavior, ScrollBlock};

    fn mount(host: &Arc<RecordingHost>, bus: &SignalBus) -> Simulator {
        Simulator::mount(&SimulatorConfig::default(), host.clone(), bus)
    }

    #[test]
    fn test_mount_pushes_summary_and_attribute() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let sim = mount(&host, &bus);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(host.field_writes(), vec![sim.engine().summary_text().to_string()]);
        assert_eq!(host.root_data("selectedPlan").as_deref(), Some("standard"));
        assert_eq!(sim.snapshot().total_yen, 417_000);
    }

    #[test]
    fn test_unknown_default_plan_falls_back() {
        let host = Arc::new(RecordingHost::standard_page());
        let mut config = SimulatorConfig::default();
        config.defaults.plan = "gold".into();

        let sim = Simulator::mount(&config, host.clone(), &SignalBus::default());
        assert_eq!(sim.engine().state().plan_key, "light");
        assert_eq!(host.root_data("selectedPlan").as_deref(), Some("light"));
    }

    #[test]
    fn test_bus_round_trip_equals_direct_announce() {
        let via_bus_host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let mut via_bus = mount(&via_bus_host, &bus);
        bus.publish_json(r#"{"planKey":"standard"}"#).unwrap();
        assert_eq!(via_bus.pump(), 1);

        let direct_host = Arc::new(RecordingHost::standard_page());
        let mut direct = mount(&direct_host, &SignalBus::default());
        assert!(direct.announce_plan("standard"));

        assert_eq!(via_bus.snapshot(), direct.snapshot());
        assert_eq!(via_bus_host.effects(), direct_host.effects());
        assert_eq!(via_bus.engine().state().pages, 6);
    }

    #[test]
    fn test_empty_and_unknown_messages_are_ignored() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let mut sim = mount(&host, &bus);
        let before = sim.snapshot();
        let effects_before = host.effects().len();

        bus.publish_json("{}").unwrap();
        bus.publish_plan("   ");
        bus.publish_plan("enterprise");
        assert_eq!(sim.pump(), 3);

        assert_eq!(sim.snapshot(), before);
        assert_eq!(host.effects().len(), effects_before);
    }

    #[test]
    fn test_messages_apply_in_arrival_order() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let mut sim = mount(&host, &bus);

        bus.publish_plan("premium");
        bus.publish_plan("light");
        sim.pump();

        assert_eq!(sim.engine().state().plan_key, "light");
        assert_eq!(sim.engine().state().pages, 3);
    }

    #[test]
    fn test_lagged_receiver_keeps_newest_messages() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::new(2);
        let mut sim = mount(&host, &bus);

        for key in ["light", "premium", "standard", "premium"] {
            bus.publish_plan(key);
        }

        assert_eq!(sim.pump(), 2);
        assert_eq!(sim.engine().state().plan_key, "premium");
    }

    #[test]
    fn test_touched_pages_survive_bus_selection() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let mut sim = mount(&host, &bus);

        sim.increment_pages();
        bus.publish_plan("light");
        sim.pump();

        assert_eq!(sim.engine().state().plan_key, "light");
        assert_eq!(sim.engine().state().pages, 14);
    }

    #[test]
    fn test_go_contact_pushes_then_scrolls() {
        let host = Arc::new(RecordingHost::standard_page());
        let mut sim = mount(&host, &SignalBus::default());
        let before = host.effects().len();

        assert!(sim.go_contact());

        let effects = host.effects();
        assert_eq!(
            &effects[before..],
            &[
                Effect::WriteField(
                    r#"input[name="estimate_summary"]"#.into(),
                    sim.engine().summary_text().into()
                ),
                Effect::Scroll("contact".into(), ScrollBehavior::Smooth, ScrollBlock::Start),
            ]
        );
    }

    #[test]
    fn test_in_widget_selection_does_not_scroll() {
        let host = Arc::new(RecordingHost::standard_page());
        let mut sim = mount(&host, &SignalBus::default());

        assert!(sim.select_plan("premium"));
        assert!(!host
            .effects()
            .iter()
            .any(|e| matches!(e, Effect::Scroll(..) | Effect::AddMarker(..))));
        assert_eq!(host.root_data("selectedPlan").as_deref(), Some("premium"));
    }

    #[tokio::test]
    async fn test_run_until_bus_closes() {
        let host = Arc::new(RecordingHost::standard_page());
        let bus = SignalBus::default();
        let mut sim = mount(&host, &bus);

        bus.publish_plan("premium");
        drop(bus);

        sim.run().await;
        assert_eq!(sim.engine().state().plan_key, "premium");
        assert!(sim.next_signal().await.is_none());
    }
}
