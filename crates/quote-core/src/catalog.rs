//! # Catalog Module
//!
//! The read-only lookup table of plans and options.
//!
//! ## Invariants
//! - At least one plan exists, so [`Catalog::first_plan`] never fails
//! - Plan keys are unique, option keys are unique
//! - Every entry passed [`validate_catalog`](crate::validation::validate_catalog)
//!
//! These hold for every `Catalog` value because the fields are private and
//! both construction paths (`Catalog::new` and deserialization) validate.
//!
//! ## Lookup Contract
//! ```text
//! find_plan("premium")  ──► Some(&Plan)
//! find_plan("gold")     ──► None          (caller decides; never panics)
//! resolve_plan("gold")  ──► first plan    (display fallback)
//! add_on_price("xyz")   ──► ¥0            (unknown options cost nothing)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Yen;
use crate::types::{AddOn, Plan};
use crate::validation::validate_catalog;

/// Unvalidated catalog shape, as read from configuration.
#[derive(Debug, Clone, Deserialize)]
struct CatalogData {
    plans: Vec<Plan>,
    #[serde(default)]
    add_ons: Vec<AddOn>,
}

impl TryFrom<CatalogData> for Catalog {
    type Error = CoreError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Catalog::new(data.plans, data.add_ons)
    }
}

/// Validated plan and option catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "CatalogData")]
pub struct Catalog {
    plans: Vec<Plan>,
    add_ons: Vec<AddOn>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty plan lists, invalid entries and
    /// duplicate keys.
    pub fn new(plans: Vec<Plan>, add_ons: Vec<AddOn>) -> CoreResult<Self> {
        validate_catalog(&plans, &add_ons)?;
        Ok(Catalog { plans, add_ons })
    }

    /// The three tiers and nine options offered on the site.
    pub fn builtin() -> Self {
        Catalog {
            plans: vec![
                Plan::new("light", "ライト", 150_000, 3, 12_000),
                Plan::new("standard", "スタンダード", 300_000, 6, 11_000),
                Plan::new("premium", "プレミアム", 500_000, 10, 10_000),
            ],
            add_ons: vec![
                AddOn::new("form", "お問い合わせフォーム", 25_000),
                AddOn::new("sim", "見積もりシミュレーター", 40_000),
                AddOn::new("wp", "WordPress組み込み", 60_000),
                AddOn::new("cms", "CMS導入", 50_000),
                AddOn::new("seo", "高度なSEO対策", 80_000),
                AddOn::new("anim", "アニメーション実装", 60_000),
                AddOn::new("api", "外部API連携", 100_000),
                AddOn::new("dash", "データ分析ダッシュボード", 120_000),
                AddOn::new("multi", "多言語対応", 150_000),
            ],
        }
    }

    /// All plans, in display order.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// All options, in display order.
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// Looks up a plan by key.
    pub fn find_plan(&self, key: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.key == key)
    }

    /// Looks up an option by key.
    pub fn find_add_on(&self, key: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|o| o.key == key)
    }

    /// The first plan in the catalog.
    pub fn first_plan(&self) -> &Plan {
        &self.plans[0]
    }

    /// Looks up a plan by key, falling back to the first plan.
    pub fn resolve_plan(&self, key: &str) -> &Plan {
        self.find_plan(key).unwrap_or_else(|| self.first_plan())
    }

    /// Price of an option, or zero when the key is not in the catalog.
    pub fn add_on_price(&self, key: &str) -> Yen {
        self.find_add_on(key).map(AddOn::price).unwrap_or_default()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(validate_catalog(catalog.plans(), catalog.add_ons()).is_ok());
        assert_eq!(catalog.plans().len(), 3);
        assert_eq!(catalog.add_ons().len(), 9);
    }

    #[test]
    fn test_find_plan() {
        let catalog = Catalog::default();
        let premium = catalog.find_plan("premium").unwrap();
        assert_eq!(premium.included_pages, 10);
        assert!(catalog.find_plan("gold").is_none());
    }

    #[test]
    fn test_resolve_plan_falls_back_to_first() {
        let catalog = Catalog::default();
        assert_eq!(catalog.resolve_plan("gold").key, "light");
        assert_eq!(catalog.resolve_plan("standard").key, "standard");
    }

    #[test]
    fn test_add_on_price_unknown_is_zero() {
        let catalog = Catalog::default();
        assert_eq!(catalog.add_on_price("sim").amount(), 40_000);
        assert!(catalog.add_on_price("nope").is_zero());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Catalog::new(vec![], vec![]),
            Err(CoreError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"plans":[{"key":"a","name":"A","base_yen":1,"included_pages":1,"extra_per_page_yen":0}]}"#;
        let catalog: Catalog = serde_json::from_str(ok).unwrap();
        assert_eq!(catalog.first_plan().key, "a");
        assert!(catalog.add_ons().is_empty());

        let empty = r#"{"plans":[]}"#;
        assert!(serde_json::from_str::<Catalog>(empty).is_err());
    }

    #[test]
    fn test_typescript_shape() {
        let decl = Catalog::decl();
        assert!(decl.contains("plans: Array<Plan>"));
        assert!(decl.contains("add_ons: Array<AddOn>"));
    }
}
