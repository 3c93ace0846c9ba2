//! # Validation Module
//!
//! Catalog rules and the page-count policy.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation vs. Clamping                            │
//! │                                                                         │
//! │  Catalog / configuration (built once, by the site owner)               │
//! │  ├── Empty keys or names         → ValidationError::Required           │
//! │  ├── Negative prices             → ValidationError::OutOfRange         │
//! │  ├── included_pages == 0         → ValidationError::MustBePositive     │
//! │  └── Duplicate keys              → CoreError::Duplicate*Key            │
//! │                                                                         │
//! │  Visitor input (stepper, slider, number box)                           │
//! │  └── Any integer                 → clamp_pages() into [1, 30]          │
//! │                                  (never rejected)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{AddOn, Plan};
use crate::{MAX_PAGES, MIN_PAGES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Page Count Policy
// =============================================================================

/// Clamps any page-count input into `[MIN_PAGES, MAX_PAGES]`.
///
/// ## Example
/// ```rust
/// use quote_core::validation::clamp_pages;
///
/// assert_eq!(clamp_pages(45), 30);
/// assert_eq!(clamp_pages(0), 1);
/// assert_eq!(clamp_pages(-7), 1);
/// assert_eq!(clamp_pages(12), 12);
/// ```
pub fn clamp_pages(pages: i64) -> u32 {
    pages.clamp(MIN_PAGES as i64, MAX_PAGES as i64) as u32
}

/// Validates a configured page count without clamping.
///
/// Used for configuration defaults, where an out-of-range value is a typo
/// worth reporting rather than silently correcting.
pub fn validate_pages(pages: u32) -> ValidationResult<()> {
    if !(MIN_PAGES..=MAX_PAGES).contains(&pages) {
        return Err(ValidationError::OutOfRange {
            field: "pages".to_string(),
            min: MIN_PAGES as i64,
            max: MAX_PAGES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a catalog key (plan or option).
pub fn validate_key(field: &str, key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Largest price a catalog entry may carry (¥1 trillion).
///
/// Keeps `base + (MAX_PAGES - 1) × extra + Σ options` far inside `i64`.
pub const MAX_PRICE_YEN: i64 = 1_000_000_000_000;

/// Validates a price in yen. Zero is allowed.
pub fn validate_price_yen(field: &str, yen: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_YEN).contains(&yen) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_YEN,
        });
    }

    Ok(())
}

/// Validates a single plan entry.
pub fn validate_plan(plan: &Plan) -> ValidationResult<()> {
    validate_key("plan key", &plan.key)?;
    validate_name("plan name", &plan.name)?;
    validate_price_yen("base price", plan.base_yen)?;
    validate_price_yen("extra page price", plan.extra_per_page_yen)?;

    if plan.included_pages == 0 {
        return Err(ValidationError::MustBePositive {
            field: "included pages".to_string(),
        });
    }

    Ok(())
}

/// Validates a single option entry.
pub fn validate_add_on(add_on: &AddOn) -> ValidationResult<()> {
    validate_key("option key", &add_on.key)?;
    validate_name("option name", &add_on.name)?;
    validate_price_yen("option price", add_on.price_yen)
}

// =============================================================================
// Catalog Validator
// =============================================================================

/// Validates a whole catalog: non-empty plan list, valid entries and unique
/// keys within each list.
pub fn validate_catalog(plans: &[Plan], add_ons: &[AddOn]) -> CoreResult<()> {
    if plans.is_empty() {
        return Err(CoreError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    for plan in plans {
        validate_plan(plan)?;
        if !seen.insert(plan.key.as_str()) {
            return Err(CoreError::DuplicatePlanKey(plan.key.clone()));
        }
    }

    let mut seen = HashSet::new();
    for add_on in add_ons {
        validate_add_on(add_on)?;
        if !seen.insert(add_on.key.as_str()) {
            return Err(CoreError::DuplicateAddOnKey(add_on.key.clone()));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pages() {
        assert_eq!(clamp_pages(45), 30);
        assert_eq!(clamp_pages(30), 30);
        assert_eq!(clamp_pages(1), 1);
        assert_eq!(clamp_pages(0), 1);
        assert_eq!(clamp_pages(i64::MIN), 1);
        assert_eq!(clamp_pages(i64::MAX), 30);
    }

    #[test]
    fn test_validate_pages() {
        assert!(validate_pages(1).is_ok());
        assert!(validate_pages(30).is_ok());
        assert!(validate_pages(0).is_err());
        assert!(validate_pages(31).is_err());
    }

    #[test]
    fn test_validate_plan() {
        assert!(validate_plan(&Plan::new("light", "ライト", 150_000, 3, 12_000)).is_ok());
        assert!(validate_plan(&Plan::new("", "ライト", 150_000, 3, 12_000)).is_err());
        assert!(validate_plan(&Plan::new("light", " ", 150_000, 3, 12_000)).is_err());
        assert!(validate_plan(&Plan::new("light", "ライト", -1, 3, 12_000)).is_err());
        assert!(validate_plan(&Plan::new("light", "ライト", 150_000, 0, 12_000)).is_err());
    }

    #[test]
    fn test_validate_price_upper_bound() {
        assert!(validate_price_yen("price", MAX_PRICE_YEN).is_ok());
        assert!(matches!(
            validate_price_yen("price", MAX_PRICE_YEN + 1),
            Err(ValidationError::OutOfRange { max: MAX_PRICE_YEN, .. })
        ));
        assert!(validate_plan(&Plan::new("p", "P", 0, 1, i64::MAX / 4)).is_err());
        assert!(validate_add_on(&AddOn::new("o", "O", i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_add_on() {
        assert!(validate_add_on(&AddOn::new("form", "フォーム", 0)).is_ok());
        assert!(validate_add_on(&AddOn::new("form", "フォーム", -100)).is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicates() {
        let plans = vec![
            Plan::new("light", "ライト", 150_000, 3, 12_000),
            Plan::new("light", "ライト2", 160_000, 3, 12_000),
        ];
        let err = validate_catalog(&plans, &[]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePlanKey(ref k) if k == "light"));

        let plans = vec![Plan::new("light", "ライト", 150_000, 3, 12_000)];
        let add_ons = vec![AddOn::new("wp", "WP", 60_000), AddOn::new("wp", "WP", 60_000)];
        let err = validate_catalog(&plans, &add_ons).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateAddOnKey(_)));
    }

    #[test]
    fn test_validate_catalog_rejects_empty() {
        assert!(matches!(
            validate_catalog(&[], &[]),
            Err(CoreError::EmptyCatalog)
        ));
    }
}
