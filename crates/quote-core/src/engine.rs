//! # Estimate Engine
//!
//! Holds the visitor's current selection and derives every fee, the total
//! and the summary from it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   EstimateState (single implicit state)                 │
//! │                                                                         │
//! │   plan_key ─ pages ∈ [1, 30] ─ selected_options ─ has_touched_pages     │
//! │                                                                         │
//! │   Transition            Effect                                          │
//! │   ──────────            ──────                                          │
//! │   set_plan(key)         unknown key → no-op                             │
//! │                         untouched   → pages = plan.included_pages       │
//! │   increment_pages()     touched, pages = min(30, pages + 1)             │
//! │   decrement_pages()     touched, pages = max(1, pages − 1)              │
//! │   set_pages_direct(n)   touched, pages = clamp(n, 1, 30)                │
//! │   toggle_option(key)    flip membership (unknown keys allowed)          │
//! │                                                                         │
//! │   Every transition is total and synchronous. After it returns, the     │
//! │   summary has been recomputed and observers have been notified.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Summary Observers
//! The engine memoizes the summary text. Each mutation invalidates it; when
//! the recomputed text differs, every registered observer is called with the
//! new text before the mutation returns.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Yen;
use crate::pricing;
use crate::summary;
use crate::types::{AddOn, BreakdownLine, Plan};
use crate::validation::clamp_pages;
use crate::{DEFAULT_ADD_ON_KEYS, DEFAULT_PAGES, DEFAULT_PLAN_KEY, MAX_PAGES, MIN_PAGES};

/// Callback invoked with the new summary text whenever it changes.
pub type SummaryObserver = Box<dyn FnMut(&str) + Send>;

// =============================================================================
// Estimate State
// =============================================================================

/// The visitor's current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EstimateState {
    /// Key of the selected plan.
    pub plan_key: String,

    /// Page count, always within `[MIN_PAGES, MAX_PAGES]` once owned by an engine.
    pub pages: u32,

    /// Selected option keys (membership only).
    pub selected_options: BTreeSet<String>,

    /// Whether the visitor has ever set the page count directly.
    pub has_touched_pages: bool,
}

impl EstimateState {
    /// Creates an untouched state.
    pub fn new<I, S>(plan_key: impl Into<String>, pages: u32, selected_options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EstimateState {
            plan_key: plan_key.into(),
            pages,
            selected_options: selected_options.into_iter().map(Into::into).collect(),
            has_touched_pages: false,
        }
    }
}

impl Default for EstimateState {
    fn default() -> Self {
        EstimateState::new(
            DEFAULT_PLAN_KEY,
            DEFAULT_PAGES,
            DEFAULT_ADD_ON_KEYS.iter().copied(),
        )
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// State plus every derived value, computed fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSnapshot {
    pub plan_key: String,
    pub plan_name: String,
    pub pages: u32,
    pub selected_options: Vec<String>,
    pub has_touched_pages: bool,
    pub plan_base_yen: i64,
    pub included_pages: u32,
    pub extra_pages: u32,
    pub extra_pages_fee_yen: i64,
    pub options_fee_yen: i64,
    pub total_yen: i64,
    /// Selected options that exist in the catalog, in catalog order.
    pub selected_add_ons: Vec<AddOn>,
    pub breakdown: Vec<BreakdownLine>,
    pub summary_text: String,
}

impl EstimateSnapshot {
    /// Derives a snapshot from a catalog and a state.
    pub fn derive(catalog: &Catalog, state: &EstimateState) -> Self {
        let plan = catalog.resolve_plan(&state.plan_key);
        let extra_pages = pricing::extra_pages(plan, state.pages);
        let extra_pages_fee = pricing::extra_pages_fee(plan, state.pages);
        let options_fee = pricing::options_fee(catalog, &state.selected_options);
        let total = pricing::total(catalog, plan, state.pages, &state.selected_options);
        let selected_add_ons = selected_add_ons(catalog, &state.selected_options);

        EstimateSnapshot {
            plan_key: state.plan_key.clone(),
            plan_name: plan.name.clone(),
            pages: state.pages,
            selected_options: state.selected_options.iter().cloned().collect(),
            has_touched_pages: state.has_touched_pages,
            plan_base_yen: plan.base_yen,
            included_pages: plan.included_pages,
            extra_pages,
            extra_pages_fee_yen: extra_pages_fee.amount(),
            options_fee_yen: options_fee.amount(),
            total_yen: total.amount(),
            breakdown: summary::breakdown(plan, extra_pages, extra_pages_fee, &selected_add_ons),
            summary_text: summary::summary_text(
                plan,
                state.pages,
                extra_pages,
                &selected_add_ons,
                total,
            ),
            selected_add_ons,
        }
    }

    #[inline]
    pub fn plan_base(&self) -> Yen {
        Yen::from_yen(self.plan_base_yen)
    }

    #[inline]
    pub fn extra_pages_fee(&self) -> Yen {
        Yen::from_yen(self.extra_pages_fee_yen)
    }

    #[inline]
    pub fn options_fee(&self) -> Yen {
        Yen::from_yen(self.options_fee_yen)
    }

    #[inline]
    pub fn total(&self) -> Yen {
        Yen::from_yen(self.total_yen)
    }
}

/// Catalog options whose key is selected, in catalog order.
fn selected_add_ons(catalog: &Catalog, selected: &BTreeSet<String>) -> Vec<AddOn> {
    catalog
        .add_ons()
        .iter()
        .filter(|o| selected.contains(&o.key))
        .cloned()
        .collect()
}

// =============================================================================
// Estimate Engine
// =============================================================================

/// Owns the estimate state and recomputes derived values on every change.
pub struct EstimateEngine {
    catalog: Arc<Catalog>,
    state: EstimateState,
    summary: String,
    observers: Vec<SummaryObserver>,
}

impl EstimateEngine {
    /// Creates an engine from an initial state.
    ///
    /// ## Normalisation
    /// - A plan key missing from the catalog is replaced by the first plan's key
    /// - Pages are clamped into `[MIN_PAGES, MAX_PAGES]`
    /// - The touched flag starts cleared
    pub fn new(catalog: Arc<Catalog>, initial: EstimateState) -> Self {
        let mut state = initial;

        if catalog.find_plan(&state.plan_key).is_none() {
            state.plan_key = catalog.first_plan().key.clone();
        }
        state.pages = clamp_pages(state.pages as i64);
        state.has_touched_pages = false;

        let summary = EstimateSnapshot::derive(&catalog, &state).summary_text;

        EstimateEngine {
            catalog,
            state,
            summary,
            observers: Vec::new(),
        }
    }

    /// Creates an engine with the site's default selection.
    pub fn with_defaults(catalog: Arc<Catalog>) -> Self {
        Self::new(catalog, EstimateState::default())
    }

    /// The catalog this engine prices against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Current raw state.
    pub fn state(&self) -> &EstimateState {
        &self.state
    }

    /// The selected plan.
    pub fn current_plan(&self) -> &Plan {
        self.catalog.resolve_plan(&self.state.plan_key)
    }

    /// The current summary text.
    pub fn summary_text(&self) -> &str {
        &self.summary
    }

    /// Registers a callback fired with the new summary whenever it changes.
    pub fn on_summary_change<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Selects a plan.
    ///
    /// ## Returns
    /// `false` when the key is not in the catalog (state untouched).
    pub fn set_plan(&mut self, key: &str) -> bool {
        let Some(plan) = self.catalog.find_plan(key) else {
            return false;
        };

        let included = plan.included_pages;
        self.state.plan_key = plan.key.clone();

        // Follow the plan's allowance until the visitor picks a page count.
        if !self.state.has_touched_pages {
            self.state.pages = clamp_pages(included as i64);
        }

        self.refresh();
        true
    }

    /// Stepper "+" button.
    pub fn increment_pages(&mut self) -> u32 {
        self.state.has_touched_pages = true;
        self.state.pages = (self.state.pages + 1).min(MAX_PAGES);
        self.refresh();
        self.state.pages
    }

    /// Stepper "−" button.
    pub fn decrement_pages(&mut self) -> u32 {
        self.state.has_touched_pages = true;
        self.state.pages = self.state.pages.saturating_sub(1).max(MIN_PAGES);
        self.refresh();
        self.state.pages
    }

    /// Direct numeric input (range slider, number box). Out-of-range values
    /// are clamped, never rejected.
    pub fn set_pages_direct(&mut self, pages: i64) -> u32 {
        self.state.has_touched_pages = true;
        self.state.pages = clamp_pages(pages);
        self.refresh();
        self.state.pages
    }

    /// Flips an option's membership.
    ///
    /// ## Returns
    /// `true` when the option is selected after the call.
    pub fn toggle_option(&mut self, key: &str) -> bool {
        let selected = if self.state.selected_options.remove(key) {
            false
        } else {
            self.state.selected_options.insert(key.to_string());
            true
        };

        self.refresh();
        selected
    }

    /// State plus every derived value, computed now.
    pub fn snapshot(&self) -> EstimateSnapshot {
        EstimateSnapshot::derive(&self.catalog, &self.state)
    }

    /// Recomputes the summary and notifies observers when it changed.
    fn refresh(&mut self) {
        let summary = EstimateSnapshot::derive(&self.catalog, &self.state).summary_text;
        if summary == self.summary {
            return;
        }

        self.summary = summary;
        for observer in &mut self.observers {
            observer(&self.summary);
        }
    }
}

impl fmt::Debug for EstimateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EstimateEngine")
            .field("state", &self.state)
            .field("summary", &self.summary)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
