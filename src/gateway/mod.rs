//! Fetch gateway: the boundary to the remote image search provider.
//!
//! The controller never talks HTTP. It mints a [`FetchTicket`], asks the
//! gateway for a [`PageRequest`], and later receives a decoded [`FetchedPage`]
//! (or an error) tagged with the same ticket.
//!
//! # Modules
//!
//! - [`ticket`]: Fetch identity carried through the request round trip
//! - [`pixabay`]: Pixabay URL construction and response decoding

pub mod pixabay;
pub mod ticket;

pub use pixabay::{decode_page, FetchedPage, GatewayConfig, PageRequest, PixabayGateway};
pub use ticket::FetchTicket;
