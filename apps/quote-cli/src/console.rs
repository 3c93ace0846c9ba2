//! Console page host: every section exists, effects go to the log.

use std::sync::Mutex;

use quote_runtime::{PageHost, ScrollBehavior, ScrollBlock};
use tracing::info;

/// A page whose effects are logged instead of rendered.
#[derive(Default)]
pub struct ConsoleHost {
    field: Mutex<Option<String>>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to the summary field.
    pub fn field_value(&self) -> Option<String> {
        self.field.lock().ok().and_then(|v| v.clone())
    }
}

impl PageHost for ConsoleHost {
    fn scroll_into_view(&self, section_id: &str, behavior: ScrollBehavior, block: ScrollBlock) -> bool {
        info!(section_id, ?behavior, ?block, "scroll");
        true
    }

    fn add_marker(&self, section_id: &str, class: &str) -> bool {
        info!(section_id, class, "marker on");
        true
    }

    fn remove_marker(&self, section_id: &str, class: &str) {
        info!(section_id, class, "marker off");
    }

    fn write_field(&self, selector: &str, value: &str) -> bool {
        info!(selector, value, "field");
        if let Ok(mut field) = self.field.lock() {
            *field = Some(value.to_string());
        }
        true
    }

    fn set_root_data(&self, attribute: &str, value: &str) {
        info!(attribute, value, "root data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keeps_last_write() {
        let host = ConsoleHost::new();
        assert_eq!(host.field_value(), None);
        host.write_field("input", "a");
        host.write_field("input", "b");
        assert_eq!(host.field_value().as_deref(), Some("b"));
    }
}
