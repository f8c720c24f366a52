//! Color themes and ANSI escape sequence generation.
//!
//! Themes are TOML documents; four Catppuccin flavors are compiled in and a
//! custom file can be supplied with the `theme_file` plugin option.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha` (default)
//! - `catppuccin-latte`
//! - `catppuccin-frappe`
//! - `catppuccin-macchiato`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#cba6f7"
//! id_fg = "#fab387"
//! url_fg = "#74c7ec"
//! loading_fg = "#f9e2af"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! overlay_border = "#cba6f7"
//! ```
//!
//! `header_bg` and `overlay_bg` are optional.

use crate::domain::error::{PixellijError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

const ESC: &str = "\u{001b}[";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: footer, subtitles, captions of unselected rows.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Image id column.
    pub id_fg: String,
    /// Thumbnail and full-size URLs.
    pub url_fg: String,

    /// Loading indicator in the status line.
    pub loading_fg: String,
    /// Error messages.
    pub error_fg: String,
    pub empty_state_fg: String,

    pub overlay_border: String,
    #[serde(default)]
    pub overlay_bg: Option<String>,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`PixellijError::Theme`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        let source = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return Err(PixellijError::Theme(format!("unknown built-in theme '{name}'"))),
        };
        Self::parse(source)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PixellijError::Io`] if the file cannot be read and
    /// [`PixellijError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source)
    }

    fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PixellijError::Theme(e.to_string()))
    }

    /// Fallback palette used if the built-in default fails to parse.
    fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let grey = || "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                selection_fg: "#000000".to_string(),
                selection_bg: white(),
                text_normal: white(),
                text_dim: grey(),
                border: grey(),
                search_bar_border: white(),
                id_fg: white(),
                url_fg: grey(),
                loading_fg: white(),
                error_fg: white(),
                empty_state_fg: white(),
                overlay_border: white(),
                overlay_bg: None,
            },
        }
    }

    /// Parses `#rrggbb` (the `#` is optional); anything else is white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(255)
        };
        if hex.len() != 6 {
            return (255, 255, 255);
        }
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground color escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("{ESC}38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("{ESC}48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|_| Self::monochrome())
    }
}
