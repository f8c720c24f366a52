//! Tracing setup: `tracing` spans exported as OTLP/JSON to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → TracerProvider → FileSpanExporter
//!                                                            → pixellij-otlp.json (+ .1, .2)
//! ```
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `pixellij::app=trace`), defaulting to `info`.
//! Both the plugin thread and the worker call [`init_tracing`]; only the
//! first call in each thread's runtime installs a subscriber.

mod exporter;
mod otlp;
mod rotating_file;

use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name reported in every span batch.
const SERVICE_NAME: &str = "Pixellij";

/// Trace file name inside the plugin data directory.
const TRACE_FILE_NAME: &str = "pixellij-otlp.json";

/// Installs the global tracing subscriber.
///
/// Does nothing if the data directory cannot be created or a subscriber is
/// already installed.
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
