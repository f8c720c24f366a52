//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (`main.rs`) and the gateway,
//! worker and UI layers. Data flows one way:
//!
//! ```text
//! User Input → Events → Event Handler → Controllers → Actions → Side Effects
//!                           ↑                                      ↓
//!                           └──── Web responses / Worker replies ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and intent routing
//! - [`modes`]: Input mode state
//! - [`overlay`]: Full-size preview overlay controller
//! - [`pagination`]: Query/page lifecycle and response reconciliation
//! - [`session`]: Session state owned by the pagination controller
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod overlay;
pub mod pagination;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use overlay::{DismissGesture, ListenerRegistry, OverlayController, OverlayState};
pub use pagination::{PaginationController, Reconciliation, SCROLL_OFFSET_ROWS};
pub use session::{SessionState, SessionStatus};
pub use state::AppState;
