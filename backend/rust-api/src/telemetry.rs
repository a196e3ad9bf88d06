use anyhow::Context;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;

/// Builds an OTLP/HTTP span pipeline and installs its provider globally. The
/// returned provider must be passed to [`shutdown_telemetry`] on exit.
pub fn init_telemetry(endpoint: &str) -> anyhow::Result<(SdkTracer, SdkTracerProvider)> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .context("Failed to create OTLP exporter")?;

    let resource = Resource::builder_empty()
        .with_service_name("spierdomino-api")
        .with_attributes(vec![KeyValue::new(
            "service.version",
            env!("CARGO_PKG_VERSION"),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer("spierdomino-api");

    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok((tracer, provider))
}

/// Flushes spans still buffered in the batch exporter and closes the provider.
pub fn shutdown_telemetry(provider: &SdkTracerProvider) -> anyhow::Result<()> {
    provider
        .shutdown()
        .map_err(|e| anyhow::anyhow!("Failed to shut down tracer provider: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_closes_provider() {
        let provider = SdkTracerProvider::builder().build();

        assert!(shutdown_telemetry(&provider).is_ok());
        // A provider that was really shut down refuses a second shutdown.
        assert!(shutdown_telemetry(&provider).is_err());
    }
}
