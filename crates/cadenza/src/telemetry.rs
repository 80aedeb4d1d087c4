//! Tracing subscriber setup.
//!
//! Console logging always; OpenTelemetry stdout span export with the
//! `observability` feature.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "observability")]
use opentelemetry::{KeyValue, global, trace::TracerProvider};
#[cfg(feature = "observability")]
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,cadenza=debug";

/// Configuration for the tracing stack.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for span attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Emit JSON-formatted logs
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Configuration for `service_name` at this crate's version.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            json_logs: false,
        }
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Flushes exported spans when dropped.
#[derive(Debug, Default)]
pub struct TelemetryGuard {
    #[cfg(feature = "observability")]
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        #[cfg(feature = "observability")]
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to flush spans: {e}");
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn fmt_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    }
}

/// Install the global subscriber. Keep the guard alive until exit.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(not(feature = "observability"))]
pub fn init_telemetry(
    config: &TelemetryConfig,
) -> Result<TelemetryGuard, Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(config.json_logs))
        .try_init()?;
    tracing::debug!(service = %config.service_name, "Telemetry initialized");
    Ok(TelemetryGuard::default())
}

/// Install the global subscriber with an OpenTelemetry stdout span exporter.
/// Keep the guard alive until exit so spans are flushed.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "observability")]
pub fn init_telemetry(
    config: &TelemetryConfig,
) -> Result<TelemetryGuard, Box<dyn std::error::Error + Send + Sync>> {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            config.service_version.clone(),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(config.service_name.clone());
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer(config.json_logs))
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;
    tracing::debug!(service = %config.service_name, "Telemetry initialized with span export");

    Ok(TelemetryGuard {
        provider: Some(provider),
    })
}

/// Route panics to the log as well as stderr.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "<unknown>".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        tracing::error!(%location, %payload, "Panic");
        previous(info);
    }));
}
