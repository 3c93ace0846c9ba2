//! # Domain Types
//!
//! Catalog entries and the line items derived from an estimate.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌─────────────────┐  ┌──────────────────┐  │
//! │  │        Plan          │  │     AddOn       │  │  BreakdownLine   │  │
//! │  │  ──────────────────  │  │  ─────────────  │  │  ──────────────  │  │
//! │  │  key                 │  │  key            │  │  kind            │  │
//! │  │  name                │  │  name           │  │  label           │  │
//! │  │  base_yen            │  │  price_yen      │  │  amount_yen      │  │
//! │  │  included_pages      │  └─────────────────┘  └──────────────────┘  │
//! │  │  extra_per_page_yen  │                                              │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog entries are immutable for the lifetime of an estimator. Amounts
//! are stored as raw yen so they serialize as plain numbers; accessors
//! return [`Yen`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Yen;

// =============================================================================
// Plan
// =============================================================================

/// A priced service tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Plan {
    /// Unique identifier, e.g. `standard`.
    pub key: String,

    /// Display label.
    pub name: String,

    /// Price covering the first `included_pages` pages.
    pub base_yen: i64,

    /// Number of pages covered by the base price.
    pub included_pages: u32,

    /// Marginal price per page beyond `included_pages`.
    pub extra_per_page_yen: i64,
}

impl Plan {
    /// Creates a plan entry.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        base_yen: i64,
        included_pages: u32,
        extra_per_page_yen: i64,
    ) -> Self {
        Plan {
            key: key.into(),
            name: name.into(),
            base_yen,
            included_pages,
            extra_per_page_yen,
        }
    }

    /// Returns the base price.
    #[inline]
    pub fn base(&self) -> Yen {
        Yen::from_yen(self.base_yen)
    }

    /// Returns the per-extra-page rate.
    #[inline]
    pub fn extra_per_page(&self) -> Yen {
        Yen::from_yen(self.extra_per_page_yen)
    }
}

// =============================================================================
// Add-on Option
// =============================================================================

/// A flat-priced optional add-on, independently selectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddOn {
    /// Unique identifier, e.g. `sim`.
    pub key: String,

    /// Display label.
    pub name: String,

    /// Flat price added when selected.
    pub price_yen: i64,
}

impl AddOn {
    /// Creates an option entry.
    pub fn new(key: impl Into<String>, name: impl Into<String>, price_yen: i64) -> Self {
        AddOn {
            key: key.into(),
            name: name.into(),
            price_yen,
        }
    }

    /// Returns the flat price.
    #[inline]
    pub fn price(&self) -> Yen {
        Yen::from_yen(self.price_yen)
    }

    /// Label shown next to the checkbox, e.g. `+¥40,000`.
    pub fn price_label(&self) -> String {
        format!("+{}", self.price())
    }
}

// =============================================================================
// Breakdown Line
// =============================================================================

/// What a breakdown line is charging for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// The selected plan's base price.
    PlanBase,
    /// Pages beyond the plan's allowance.
    ExtraPages,
    /// A selected add-on.
    AddOn,
}

/// One row of the itemised price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub kind: LineKind,
    pub label: String,
    pub amount_yen: i64,
}

impl BreakdownLine {
    /// Returns the line amount.
    #[inline]
    pub fn amount(&self) -> Yen {
        Yen::from_yen(self.amount_yen)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
