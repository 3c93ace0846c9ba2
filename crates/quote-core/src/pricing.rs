//! # Pricing Module
//!
//! Derived fee functions. Every value here is a pure function of the
//! estimate inputs and the catalog; nothing is stored.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  extra_pages     = max(0, pages − plan.included_pages)                  │
//! │  extra_pages_fee = extra_pages × plan.extra_per_page                    │
//! │  options_fee     = Σ price(option) for selected options in catalog      │
//! │  total           = plan.base + extra_pages_fee + options_fee            │
//! │                                                                         │
//! │  Example: standard (¥300,000, 6 incl., ¥11,000/page), 13 pages, {sim}   │
//! │    extra_pages = 7, fee = ¥77,000, options = ¥40,000, total ¥417,000    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::Catalog;
use crate::money::Yen;
use crate::types::Plan;

/// Pages beyond the plan's allowance. Never negative, so downgrading to a
/// plan with more included pages simply yields zero.
#[inline]
pub fn extra_pages(plan: &Plan, pages: u32) -> u32 {
    pages.saturating_sub(plan.included_pages)
}

/// Fee for pages beyond the plan's allowance.
#[inline]
pub fn extra_pages_fee(plan: &Plan, pages: u32) -> Yen {
    plan.extra_per_page() * extra_pages(plan, pages)
}

/// Sum of the selected options' prices. Keys missing from the catalog
/// contribute zero.
pub fn options_fee<'a, I>(catalog: &Catalog, selected: I) -> Yen
where
    I: IntoIterator<Item = &'a String>,
{
    selected
        .into_iter()
        .map(|key| catalog.add_on_price(key))
        .sum()
}

/// Grand total for a plan, page count and option selection.
pub fn total<'a, I>(catalog: &Catalog, plan: &Plan, pages: u32, selected: I) -> Yen
where
    I: IntoIterator<Item = &'a String>,
{
    plan.base() + extra_pages_fee(plan, pages) + options_fee(catalog, selected)
}

// =============================================================================
// Unit Tests
// =============================================================================
