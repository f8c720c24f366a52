//! Sandbox filesystem helpers.
//!
//! Zellij plugins run under WASI with the host's working directory (usually
//! the user's home) mounted at `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
