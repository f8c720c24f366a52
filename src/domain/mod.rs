//! Domain layer for the Pixellij plugin.
//!
//! Holds the types shared by every other layer and free of Zellij APIs:
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`image`]: The [`ResultItem`] search hit model

pub mod error;
pub mod image;

pub use error::{PixellijError, Result};
pub use image::ResultItem;
