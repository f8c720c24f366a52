//! Terminal user interface.
//!
//! Rendering is declarative: the application state is reduced to a
//! [`UIViewModel`], which the components draw as ANSI text.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready data computed from state
//! - [`layout`]: Screen geometry shared by drawing and mouse hit-testing
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Per-region drawing
//! - [`helpers`]: Frame buffer and text fitting
//! - [`theme`]: Color schemes and ANSI escapes
//!
//! # Example
//!
//! ```rust
//! use pixellij::app::AppState;
//! use pixellij::gateway::{GatewayConfig, PixabayGateway};
//! use pixellij::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(PixabayGateway::new(GatewayConfig::default()), Theme::default());
//! let screen = render_to_string(&state, 24, 80);
//! assert!(screen.contains("Search Pixabay images"));
//! ```

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayInfo, SearchBarInfo, StatusLine, UIViewModel,
};
