//! # Page Host
//!
//! The page the simulator is embedded in, seen as a handful of effects.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PageHost Effects                                │
//! │                                                                         │
//! │  scroll_into_view(section, behavior, block)  ──► section scrolled       │
//! │  add_marker(section, class)                  ──► class added            │
//! │  remove_marker(section, class)               ──► class removed          │
//! │  write_field(selector, value)                ──► form field value set   │
//! │  set_root_data(attribute, value)             ──► <html data-…="value">  │
//! │                                                                         │
//! │  Every effect is fire-and-forget. A `false` return means the node was  │
//! │  not on the page and nothing happened.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Scroll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Vertical alignment of the scrolled element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Effects the simulator applies to its host page.
///
/// Implementations must tolerate missing nodes: they return `false` (or do
/// nothing) instead of failing.
pub trait PageHost: Send + Sync {
    /// Scrolls a section into view. Returns `false` if the section is missing.
    fn scroll_into_view(&self, section_id: &str, behavior: ScrollBehavior, block: ScrollBlock) -> bool;

    /// Adds a marker class to a section. Returns `false` if the section is missing.
    fn add_marker(&self, section_id: &str, class: &str) -> bool;

    /// Removes a marker class from a section.
    fn remove_marker(&self, section_id: &str, class: &str);

    /// Overwrites a form field's value. Returns `false` if the field is missing.
    fn write_field(&self, selector: &str, value: &str) -> bool;

    /// Sets a data attribute on the page's root element.
    fn set_root_data(&self, attribute: &str, value: &str);
}

/// Host with no page behind it.
pub struct NoOpHost;

impl PageHost for NoOpHost {
    fn scroll_into_view(&self, _section_id: &str, _behavior: ScrollBehavior, _block: ScrollBlock) -> bool {
        false
    }
    fn add_marker(&self, _section_id: &str, _class: &str) -> bool {
        false
    }
    fn remove_marker(&self, _section_id: &str, _class: &str) {}
    fn write_field(&self, _selector: &str, _value: &str) -> bool {
        false
    }
    fn set_root_data(&self, _attribute: &str, _value: &str) {}
}

// =============================================================================
// Test Support
// =============================================================================
