//! # Summary Sink
//!
//! Keeps the contact form's hidden summary field in step with the estimate,
//! so an inquiry carries the estimate the visitor was looking at.

use std::sync::Arc;

use quote_core::EstimateEngine;
use tracing::debug;

use crate::host::PageHost;

/// Writes summary text into a single form field. Last write wins.
#[derive(Clone)]
pub struct SummarySink {
    host: Arc<dyn PageHost>,
    selector: String,
}

impl SummarySink {
    pub fn new(host: Arc<dyn PageHost>, selector: impl Into<String>) -> Self {
        SummarySink {
            host,
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Overwrites the field. Returns `false` if the field is not on the page.
    pub fn push(&self, text: &str) -> bool {
        let written = self.host.write_field(&self.selector, text);
        if !written {
            debug!(selector = %self.selector, "Summary field not on page");
        }
        written
    }

    /// Pushes the current summary once, then follows every change.
    pub fn attach(&self, engine: &mut EstimateEngine) {
        self.push(engine.summary_text());

        let sink = self.clone();
        engine.on_summary_change(move |text| {
            sink.push(text);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::RecordingHost;
    use quote_core::Catalog;

    const FIELD: &str = r#"input[name="estimate_summary"]"#;

    fn engine() -> EstimateEngine {
        EstimateEngine::with_defaults(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn test_attach_pushes_initial_summary() {
        let host = Arc::new(RecordingHost::standard_page());
        let mut engine = engine();
        SummarySink::new(host.clone(), FIELD).attach(&mut engine);

        assert_eq!(host.field_writes().len(), 1);
        assert_eq!(
            host.field_value(FIELD).as_deref(),
            Some("プラン：スタンダード ｜ ページ数：13（追加 7） ｜ オプション：見積もりシミュレーター ｜ 合計：¥417,000")
        );
    }

    #[test]
    fn test_one_push_per_change() {
        let host = Arc::new(RecordingHost::standard_page());
        let mut engine = engine();
        SummarySink::new(host.clone(), FIELD).attach(&mut engine);

        engine.increment_pages();
        engine.toggle_option("form");
        engine.set_pages_direct(1);
        // Already at the lower bound: summary unchanged, no push.
        engine.decrement_pages();

        let writes = host.field_writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes.last().map(String::as_str), Some(engine.summary_text()));
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let host = Arc::new(RecordingHost::empty_page());
        let mut engine = engine();
        let sink = SummarySink::new(host.clone(), FIELD);
        sink.attach(&mut engine);

        engine.toggle_option("seo");
        assert!(host.effects().is_empty());
        assert!(!sink.push("x"));
    }
}
