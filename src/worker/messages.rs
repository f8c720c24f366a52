//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread hands raw provider responses to the worker for decoding
//! and gets typed pages back. Every message carries the [`FetchTicket`] of the
//! request it belongs to, so replies can be reconciled against the fetch the
//! plugin is waiting for. Trace context travels along for span linking.

use crate::domain::PixellijError;
use crate::gateway::{FetchTicket, FetchedPage};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when there is no valid OpenTelemetry span, e.g. when
    /// tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that stamp the current trace context on a variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a ", stringify!($variant), " message with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    decode_page(DecodePage { ticket: FetchTicket, status: u16, body: String, per_page: u32 }),
}

/// Messages sent from the plugin thread to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Decode the host's answer to one page request.
    DecodePage {
        ticket: FetchTicket,

        /// HTTP status reported by the host; 0 when no response arrived.
        status: u16,

        /// Raw response body.
        body: String,

        /// Page size the request was issued with, for last-page detection.
        per_page: u32,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::DecodePage { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Why a page could not be decoded, in a form that crosses the thread boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchFailure {
    Network { message: String },
    Provider { status: u16, message: String },
}

impl From<PixellijError> for FetchFailure {
    fn from(error: PixellijError) -> Self {
        match error {
            PixellijError::Network(message) => Self::Network { message },
            PixellijError::Provider { status, message } => Self::Provider { status, message },
            other => Self::Provider {
                status: 0,
                message: other.to_string(),
            },
        }
    }
}

impl From<FetchFailure> for PixellijError {
    fn from(failure: FetchFailure) -> Self {
        match failure {
            FetchFailure::Network { message } => Self::Network(message),
            FetchFailure::Provider { status, message } => Self::Provider { status, message },
        }
    }
}

/// Responses sent from the worker back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The page decoded successfully (possibly with zero items).
    PageDecoded { ticket: FetchTicket, page: FetchedPage },

    /// The response was an error or could not be decoded.
    PageFailed { ticket: FetchTicket, failure: FetchFailure },

    /// The worker could not process a message at all.
    Error { message: String },
}
