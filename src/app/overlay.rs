//! Full-size preview overlay and its dismissal listener.
//!
//! The overlay shows one image's full-size URL and caption on top of the result
//! list. While it is open, Escape and clicks on the backdrop close it. That
//! routing is modelled as a [`DismissListener`] guard taken from a
//! [`ListenerRegistry`]: the controller holds the guard exactly while the
//! overlay is open, and dropping it (on close or when the controller goes away)
//! releases the listener.

use std::cell::Cell;
use std::rc::Rc;

/// What the overlay is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Open {
        full_image_url: String,
        caption: String,
    },
}

impl OverlayState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Counts attached dismissal listeners.
///
/// Cloning the registry shares the same counter, so a test or the plugin shim
/// can keep a handle and observe attach/release from outside the controller.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Rc<Cell<usize>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a listener; it stays attached until the guard is dropped.
    #[must_use]
    pub fn attach(&self) -> DismissListener {
        self.active.set(self.active.get() + 1);
        tracing::trace!(active = self.active.get(), "dismiss listener attached");
        DismissListener {
            active: Rc::clone(&self.active),
        }
    }

    /// Number of listeners currently attached.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

/// Guard for an attached dismissal listener.
#[derive(Debug)]
pub struct DismissListener {
    active: Rc<Cell<usize>>,
}

impl Drop for DismissListener {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        tracing::trace!(active = self.active.get(), "dismiss listener released");
    }
}

/// User gesture that may dismiss the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissGesture {
    EscapeKey,
    /// A click; `on_content` is true when it landed inside the overlay box.
    Click { on_content: bool },
}

/// Owns the [`OverlayState`] and the dismissal listener lifecycle.
#[derive(Debug, Default)]
pub struct OverlayController {
    state: OverlayState,
    listener: Option<DismissListener>,
    registry: ListenerRegistry,
}

impl OverlayController {
    #[must_use]
    pub fn new(registry: ListenerRegistry) -> Self {
        Self {
            state: OverlayState::Closed,
            listener: None,
            registry,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Whether dismissal gestures are currently routed to the overlay.
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Shows `full_image_url`, replacing whatever is open.
    pub fn open(&mut self, full_image_url: impl Into<String>, caption: impl Into<String>) {
        self.state = OverlayState::Open {
            full_image_url: full_image_url.into(),
            caption: caption.into(),
        };
        if self.listener.is_none() {
            self.listener = Some(self.registry.attach());
        }
    }

    /// Closes the overlay; closing a closed overlay changes nothing.
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.listener = None;
    }

    /// Closes the overlay if `gesture` is a dismissal. Returns true if it did.
    ///
    /// Clicks on the overlay content are ignored; only backdrop clicks and
    /// Escape dismiss, and only while the listener is attached.
    pub fn dismiss(&mut self, gesture: DismissGesture) -> bool {
        if !self.is_listening() {
            return false;
        }
        match gesture {
            DismissGesture::EscapeKey | DismissGesture::Click { on_content: false } => {
                tracing::debug!(gesture = ?gesture, "overlay dismissed");
                self.close();
                true
            }
            DismissGesture::Click { on_content: true } => false,
        }
    }
}
