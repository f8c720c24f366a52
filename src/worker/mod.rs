//! Background worker thread for decoding provider responses.
//!
//! The plugin thread receives raw HTTP bodies from the host and forwards them
//! here; the worker decodes them and replies with typed pages. Messages carry
//! trace context so worker spans link to the plugin span that sent them.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::PixellijWorker;
pub use messages::{FetchFailure, TraceContext, WorkerMessage, WorkerResponse};
