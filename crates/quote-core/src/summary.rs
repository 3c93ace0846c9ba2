//! # Summary Module
//!
//! Builds the one-line summary pushed into the contact form, and the
//! itemised breakdown shown under the estimator.
//!
//! ## Summary Shape
//! ```text
//! プラン：スタンダード ｜ ページ数：13（追加 7） ｜ オプション：見積もりシミュレーター ｜ 合計：¥417,000
//! ```
//!
//! Option names follow catalog order regardless of the order they were
//! ticked, so the same selection always produces the same text.

use crate::money::Yen;
use crate::types::{AddOn, BreakdownLine, LineKind, Plan};

/// Separator between summary fields.
pub const FIELD_SEPARATOR: &str = " ｜ ";

/// Separator between option names.
pub const OPTION_SEPARATOR: &str = " / ";

/// Shown in place of option names when nothing is selected.
pub const NO_OPTIONS: &str = "なし";

/// Composes the summary line.
pub fn summary_text(
    plan: &Plan,
    pages: u32,
    extra_pages: u32,
    selected_add_ons: &[AddOn],
    total: Yen,
) -> String {
    let options = if selected_add_ons.is_empty() {
        NO_OPTIONS.to_string()
    } else {
        selected_add_ons
            .iter()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(OPTION_SEPARATOR)
    };

    [
        format!("プラン：{}", plan.name),
        format!("ページ数：{}（追加 {}）", pages, extra_pages),
        format!("オプション：{}", options),
        format!("合計：{}", total),
    ]
    .join(FIELD_SEPARATOR)
}

/// Builds the itemised breakdown.
///
/// ## Line Order
/// 1. Plan base price (always)
/// 2. Extra pages (only when the fee is non-zero)
/// 3. One line per selected option, catalog order
///
/// The amounts always add up to the estimate total.
pub fn breakdown(
    plan: &Plan,
    extra_pages: u32,
    extra_pages_fee: Yen,
    selected_add_ons: &[AddOn],
) -> Vec<BreakdownLine> {
    let mut lines = Vec::with_capacity(selected_add_ons.len() + 2);

    lines.push(BreakdownLine {
        kind: LineKind::PlanBase,
        label: format!("{}プラン基本料金", plan.name),
        amount_yen: plan.base_yen,
    });

    if extra_pages_fee.is_positive() {
        lines.push(BreakdownLine {
            kind: LineKind::ExtraPages,
            label: format!("追加ページ（{}）", extra_pages),
            amount_yen: extra_pages_fee.amount(),
        });
    }

    lines.extend(selected_add_ons.iter().map(|o| BreakdownLine {
        kind: LineKind::AddOn,
        label: o.name.clone(),
        amount_yen: o.price_yen,
    }));

    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Plan {
        Plan::new("standard", "スタンダード", 300_000, 6, 11_000)
    }

    #[test]
    fn test_summary_text_with_option() {
        let text = summary_text(
            &standard(),
            13,
            7,
            &[AddOn::new("sim", "見積もりシミュレーター", 40_000)],
            Yen::from_yen(417_000),
        );
        assert_eq!(
            text,
            "プラン：スタンダード ｜ ページ数：13（追加 7） ｜ オプション：見積もりシミュレーター ｜ 合計：¥417,000"
        );
    }

    #[test]
    fn test_summary_text_without_options() {
        let light = Plan::new("light", "ライト", 150_000, 3, 12_000);
        let text = summary_text(&light, 3, 0, &[], Yen::from_yen(150_000));
        assert_eq!(
            text,
            "プラン：ライト ｜ ページ数：3（追加 0） ｜ オプション：なし ｜ 合計：¥150,000"
        );
    }

    #[test]
    fn test_summary_joins_option_names() {
        let text = summary_text(
            &standard(),
            6,
            0,
            &[
                AddOn::new("form", "お問い合わせフォーム", 25_000),
                AddOn::new("wp", "WordPress組み込み", 60_000),
            ],
            Yen::from_yen(385_000),
        );
        assert!(text.contains("オプション：お問い合わせフォーム / WordPress組み込み"));
    }

    #[test]
    fn test_breakdown_omits_zero_extra_pages() {
        let lines = breakdown(&standard(), 0, Yen::zero(), &[]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::PlanBase);
        assert_eq!(lines[0].label, "スタンダードプラン基本料金");
    }

    #[test]
    fn test_breakdown_lines() {
        let add_ons = [AddOn::new("sim", "見積もりシミュレーター", 40_000)];
        let lines = breakdown(&standard(), 7, Yen::from_yen(77_000), &add_ons);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].kind, LineKind::ExtraPages);
        assert_eq!(lines[1].label, "追加ページ（7）");
        assert_eq!(lines[2].kind, LineKind::AddOn);

        let sum: Yen = lines.iter().map(BreakdownLine::amount).sum();
        assert_eq!(sum.amount(), 417_000);
    }
}
