//! # quote-runtime: Page Runtime for the Quote Simulator
//!
//! This crate connects the pure estimate engine from `quote-core` to the page
//! it is embedded in: the plan buttons that publish selections, the estimator
//! section that scrolls and flashes, and the contact form that receives the
//! summary.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Simulator Runtime                          │
//! │                                                                         │
//! │   Pricing cards / CTAs                                                  │
//! │          │ publish_plan / publish_json                                  │
//! │          ▼                                                              │
//! │   ┌────────────────┐   subscribe (once)   ┌──────────────────────────┐  │
//! │   │   SignalBus    │ ───────────────────► │        Simulator         │  │
//! │   │  "select-plan" │                      │                          │  │
//! │   └────────────────┘                      │  ┌────────────────────┐  │  │
//! │                                           │  │  EstimateEngine    │  │  │
//! │                                           │  └─────────┬──────────┘  │  │
//! │                                           │            │ summary     │  │
//! │   ┌────────────────────────┐              │  ┌─────────▼──────────┐  │  │
//! │   │ SelectionCoordinator   │ ◄────────────│  │   SummarySink      │  │  │
//! │   │ root attr, scroll,     │              │  └─────────┬──────────┘  │  │
//! │   │ flash                  │              └────────────┼─────────────┘  │
//! │   └───────────┬────────────┘                           │                │
//! │               ▼                                        ▼                │
//! │   ┌─────────────────────────────────────────────────────────────────┐  │
//! │   │                    PageHost (trait object)                      │  │
//! │   └─────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`bus`] - `select-plan` broadcast channel and payload
//! - [`config`] - Simulator configuration (defaults, page, bus, catalog)
//! - [`coordinator`] - Plan selection with scroll and highlight
//! - [`error`] - Runtime error types
//! - [`host`] - Page effect trait
//! - [`simulator`] - The mounted estimator
//! - [`sink`] - Summary field adapter
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use quote_runtime::{NoOpHost, SignalBus, Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::load_or_default(None);
//! let bus = SignalBus::new(config.bus.capacity);
//! let mut simulator = Simulator::mount(&config, Arc::new(NoOpHost), &bus);
//!
//! bus.publish_plan("premium");
//! simulator.pump();
//! assert_eq!(simulator.snapshot().plan_key, "premium");
//! ```

pub mod bus;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod host;
pub mod simulator;
pub mod sink;

pub use bus::{SelectPlan, SignalBus, SELECT_PLAN_EVENT};
pub use config::{BusSettings, DefaultsSettings, PageSettings, SimulatorConfig};
pub use coordinator::{SelectOptions, SelectionCoordinator};
pub use error::{RuntimeError, RuntimeResult};
pub use host::{NoOpHost, PageHost, ScrollBehavior, ScrollBlock};
pub use simulator::Simulator;
pub use sink::SummarySink;
