//! Worker thread that decodes provider responses.
//!
//! Pixabay bodies can be large, so JSON decoding runs here instead of on the
//! plugin thread that renders. The worker is stateless: each message is
//! decoded on its own and answered with exactly one [`WorkerResponse`].

use crate::gateway::decode_page;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state. Nothing survives between messages.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PixellijWorker;

impl PixellijWorker {
    /// Reconstructs the plugin thread's span as the remote parent of worker spans.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one message and returns its response.
    #[must_use]
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::DecodePage {
                ticket,
                status,
                body,
                per_page,
                ..
            } => {
                let _guard = tracing::debug_span!(
                    "worker_decode_page",
                    generation = ticket.generation,
                    query = %ticket.query,
                    page = ticket.page,
                    status = status,
                    body_len = body.len(),
                )
                .entered();

                match decode_page(&ticket, status, &body, per_page) {
                    Ok(page) => WorkerResponse::PageDecoded { ticket, page },
                    Err(e) => {
                        tracing::debug!(error = %e, "page decode failed");
                        WorkerResponse::PageFailed {
                            ticket,
                            failure: e.into(),
                        }
                    }
                }
            }
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Sets up tracing for the worker thread once, writing to the plugin's trace file.
fn init_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for PixellijWorker {
    /// Decodes the JSON `payload` as a [`WorkerMessage`] and posts the
    /// response back under the same message `name`.
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("Malformed worker message: {e}"),
                }
            }
        };

        reply(message, &response);
    }
}
