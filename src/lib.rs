//! Pixellij: a Zellij plugin for searching Pixabay images from the terminal.
//!
//! Type a query, page through matching images, open one in a full-size
//! preview, and hand its URL to the desktop browser. Results accumulate page by
//! page ("load more"), and responses for superseded queries are discarded.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ Events          ▲ Actions
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - PaginationController (query, pages, staleness)   │
//! │  - OverlayController (preview, dismissal listener)  │
//! │  - Event handling, view model computation           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Gateway       │   │ Worker Layer  │
//! │ (ui/)         │   │ (gateway/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Request URL │   │ - JSON decode │
//! │ - Theming     │   │ - Tickets     │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) - ResultItem, PixellijError       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/pixellij.wasm" {
//!     api_key "12345678-abcdef"
//!     per_page "24"
//!     orientation "all"
//!     theme "catppuccin-latte"
//!     trace_level "debug"
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{PixellijError, Result, ResultItem};
pub use ui::Theme;

use gateway::{GatewayConfig, PixabayGateway};
use std::collections::BTreeMap;

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Provider request settings (`api_key`, `endpoint`, `per_page`,
    /// `image_type`, `orientation`, `safe_search`).
    pub gateway: GatewayConfig,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: String,

    /// Path to a custom TOML theme; `~` means the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            theme_name: ui::theme::DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij passes to `load`.
    ///
    /// Unknown keys are ignored and unparsable values fall back to defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pixellij::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc".to_string());
    /// map.insert("per_page".to_string(), "1000".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.gateway.api_key.as_deref(), Some("abc"));
    /// assert_eq!(config.gateway.per_page, 200);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let per_page = text("per_page")
            .and_then(|value| value.parse::<u32>().ok())
            .map_or(defaults.gateway.per_page, GatewayConfig::clamp_per_page);

        let safe_search = text("safe_search")
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(defaults.gateway.safe_search);

        Self {
            gateway: GatewayConfig {
                api_key: text("api_key"),
                endpoint: text("endpoint").unwrap_or(defaults.gateway.endpoint),
                per_page,
                image_type: text("image_type").unwrap_or(defaults.gateway.image_type),
                orientation: text("orientation").unwrap_or(defaults.gateway.orientation),
                safe_search,
            },
            theme_name: text("theme").unwrap_or(defaults.theme_name),
            theme_file: text("theme_file"),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Resolves the configured theme, falling back to the default on errors.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using default"),
            }
        }

        Theme::from_name(&self.theme_name).unwrap_or_else(|e| {
            tracing::warn!(theme_name = %self.theme_name, error = %e, "unknown theme, using default");
            Theme::default()
        })
    }
}

/// Builds the initial application state from `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        per_page = config.gateway.per_page,
        has_api_key = config.gateway.api_key.is_some(),
        theme = %config.theme_name,
        "initializing pixellij plugin"
    );

    AppState::new(PixabayGateway::new(config.gateway.clone()), config.load_theme())
}
