//! # quote-core: Pure Pricing Logic for the Quote Simulator
//!
//! This crate is the **heart** of the quote simulator. It contains the plan
//! catalog, the fee arithmetic and the estimate state machine as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quote Simulator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host Page / Terminal                         │   │
//! │  │   Pricing buttons ──► Stepper ──► Option checkboxes ──► Form    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ select-plan / commands                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  quote-runtime (bus, coordinator, sink)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │  engine   │  │  summary  │  │   │
//! │  │   │   Plan    │  │    Yen    │  │ Estimate  │  │ text and  │  │   │
//! │  │   │   AddOn   │  │           │  │  Engine   │  │ breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO DOCUMENT ACCESS • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog entries and breakdown lines
//! - [`money`] - `Yen` type with integer arithmetic
//! - [`catalog`] - Validated plan/option lookup table
//! - [`pricing`] - Derived fee functions
//! - [`summary`] - Summary text and line-item breakdown
//! - [`engine`] - Estimate state, mutations and snapshots
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog and page-count rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use quote_core::{Catalog, EstimateEngine};
//!
//! let mut engine = EstimateEngine::with_defaults(Arc::new(Catalog::default()));
//!
//! // standard plan, 13 pages, estimate simulator option
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.total_yen, 417_000);
//!
//! engine.set_pages_direct(45);
//! assert_eq!(engine.snapshot().pages, 30);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod pricing;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use engine::{EstimateEngine, EstimateSnapshot, EstimateState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Yen;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest page count the estimator accepts.
pub const MIN_PAGES: u32 = 1;

/// Largest page count the estimator accepts.
///
/// ## Business Reason
/// Sites above 30 pages are quoted individually, so the stepper stops here.
pub const MAX_PAGES: u32 = 30;

/// Plan selected when the estimator mounts.
pub const DEFAULT_PLAN_KEY: &str = "standard";

/// Page count shown when the estimator mounts.
pub const DEFAULT_PAGES: u32 = 13;

/// Options preselected when the estimator mounts.
pub const DEFAULT_ADD_ON_KEYS: &[&str] = &["sim"];
