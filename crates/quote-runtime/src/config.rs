//! # Simulator Configuration
//!
//! Configuration management for the quote simulator.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUOTE_DEFAULT_PLAN=premium                                         │
//! │     QUOTE_DEFAULT_PAGES=10                                             │
//! │     QUOTE_DEFAULT_OPTIONS=form,sim                                     │
//! │     QUOTE_FLASH_MS=600                                                 │
//! │     QUOTE_BUS_CAPACITY=64                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/quote-simulator/simulator.toml (Linux)                   │
//! │     ~/Library/Application Support/com.quote.simulator/ (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     standard plan, 13 pages, {sim}, built-in catalog                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [defaults]
//! plan = "standard"
//! pages = 13
//! options = ["sim"]
//!
//! [page]
//! section_id = "simulator"
//! contact_section_id = "contact"
//! flash_class = "is-flash"
//! flash_ms = 600
//! summary_field = 'input[name="estimate_summary"]'
//! plan_attribute = "selectedPlan"
//!
//! [bus]
//! capacity = 64
//!
//! # Optional: replaces the built-in catalog entirely
//! [[catalog.plans]]
//! key = "light"
//! name = "ライト"
//! base_yen = 150000
//! included_pages = 3
//! extra_per_page_yen = 12000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use quote_core::validation::{validate_key, validate_pages};
use quote_core::{Catalog, EstimateState, DEFAULT_ADD_ON_KEYS, DEFAULT_PAGES, DEFAULT_PLAN_KEY};

use crate::error::{RuntimeError, RuntimeResult};

// =============================================================================
// Default Selection
// =============================================================================

/// The selection shown when the simulator mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    /// Initially selected plan key.
    #[serde(default = "default_plan")]
    pub plan: String,

    /// Initial page count.
    #[serde(default = "default_pages")]
    pub pages: u32,

    /// Initially selected option keys.
    #[serde(default = "default_options")]
    pub options: Vec<String>,
}

fn default_plan() -> String {
    DEFAULT_PLAN_KEY.to_string()
}

fn default_pages() -> u32 {
    DEFAULT_PAGES
}

fn default_options() -> Vec<String> {
    DEFAULT_ADD_ON_KEYS.iter().map(|k| k.to_string()).collect()
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        DefaultsSettings {
            plan: default_plan(),
            pages: default_pages(),
            options: default_options(),
        }
    }
}

impl DefaultsSettings {
    /// The untouched estimate state these defaults describe.
    pub fn initial_state(&self) -> EstimateState {
        EstimateState::new(self.plan.clone(), self.pages, self.options.iter().cloned())
    }
}

// =============================================================================
// Page Settings
// =============================================================================

/// Where on the host page the simulator's effects land.
///
/// ## Page Touch Points
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  <html data-selected-plan="standard">     ◄── plan_attribute            │
/// │    ...                                                                  │
/// │    <section id="simulator" class="is-flash">  ◄── section_id,           │
/// │      (estimator)                                  flash_class/flash_ms  │
/// │    </section>                                                           │
/// │    <section id="contact">                 ◄── contact_section_id        │
/// │      <input name="estimate_summary">      ◄── summary_field             │
/// │    </section>                                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Section scrolled to and highlighted when a plan is announced.
    #[serde(default = "default_section_id")]
    pub section_id: String,

    /// Section scrolled to by the "contact with this estimate" action.
    #[serde(default = "default_contact_section_id")]
    pub contact_section_id: String,

    /// Marker class applied during the highlight.
    #[serde(default = "default_flash_class")]
    pub flash_class: String,

    /// Highlight duration (milliseconds).
    #[serde(default = "default_flash_ms")]
    pub flash_ms: u64,

    /// Selector of the hidden field receiving the summary.
    #[serde(default = "default_summary_field")]
    pub summary_field: String,

    /// Root-element data attribute carrying the selected plan key.
    #[serde(default = "default_plan_attribute")]
    pub plan_attribute: String,
}

fn default_section_id() -> String {
    "simulator".to_string()
}

fn default_contact_section_id() -> String {
    "contact".to_string()
}

fn default_flash_class() -> String {
    "is-flash".to_string()
}

fn default_flash_ms() -> u64 {
    600
}

fn default_summary_field() -> String {
    r#"input[name="estimate_summary"]"#.to_string()
}

fn default_plan_attribute() -> String {
    "selectedPlan".to_string()
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            section_id: default_section_id(),
            contact_section_id: default_contact_section_id(),
            flash_class: default_flash_class(),
            flash_ms: default_flash_ms(),
            summary_field: default_summary_field(),
            plan_attribute: default_plan_attribute(),
        }
    }
}

impl PageSettings {
    /// Highlight duration.
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

// =============================================================================
// Bus Settings
// =============================================================================

/// Signal bus settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSettings {
    /// Messages retained for a subscriber that falls behind.
    #[serde(default = "default_bus_capacity")]
    pub capacity: usize,
}

fn default_bus_capacity() -> usize {
    64
}

impl Default for BusSettings {
    fn default() -> Self {
        BusSettings {
            capacity: default_bus_capacity(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Initial selection.
    #[serde(default)]
    pub defaults: DefaultsSettings,

    /// Host page touch points.
    #[serde(default)]
    pub page: PageSettings,

    /// Signal bus settings.
    #[serde(default)]
    pub bus: BusSettings,

    /// Replacement catalog. The built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
}

impl SimulatorConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (simulator.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RuntimeResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading simulator config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load simulator config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> RuntimeResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RuntimeError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RuntimeError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| RuntimeError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Simulator config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// A default plan that is well-formed but absent from the catalog is
    /// accepted here; the simulator falls back to the first plan at mount.
    pub fn validate(&self) -> RuntimeResult<()> {
        validate_key("default plan", &self.defaults.plan)?;
        validate_pages(self.defaults.pages)?;

        if self.bus.capacity == 0 {
            return Err(RuntimeError::InvalidConfig(
                "bus capacity must be greater than 0".into(),
            ));
        }

        let page = &self.page;
        for (field, value) in [
            ("section_id", &page.section_id),
            ("contact_section_id", &page.contact_section_id),
            ("flash_class", &page.flash_class),
            ("summary_field", &page.summary_field),
            ("plan_attribute", &page.plan_attribute),
        ] {
            if value.trim().is_empty() {
                return Err(RuntimeError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }

        Ok(())
    }

    /// Returns the configured catalog, or the built-in one.
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_default()
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from a variable lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(plan) = lookup("QUOTE_DEFAULT_PLAN") {
            debug!(plan = %plan, "Overriding default plan from environment");
            self.defaults.plan = plan;
        }

        if let Some(pages) = lookup("QUOTE_DEFAULT_PAGES") {
            match pages.parse::<u32>() {
                Ok(p) => self.defaults.pages = p,
                Err(_) => warn!(pages = %pages, "Ignoring non-numeric QUOTE_DEFAULT_PAGES"),
            }
        }

        if let Some(options) = lookup("QUOTE_DEFAULT_OPTIONS") {
            self.defaults.options = options
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(ms) = lookup("QUOTE_FLASH_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.page.flash_ms = ms;
            }
        }

        if let Some(capacity) = lookup("QUOTE_BUS_CAPACITY") {
            if let Ok(c) = capacity.parse::<usize>() {
                debug!(capacity = c, "Overriding bus capacity from environment");
                self.bus.capacity = c;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quote", "simulator")
            .map(|dirs| dirs.config_dir().join("simulator.toml"))
    }
}
