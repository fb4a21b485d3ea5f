// metrics/mod.rs
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

pub const CONTROL_REQUESTS: &str = "device_control_requests_total";
pub const CONTROL_REJECTED: &str = "device_control_rejected_total";
pub const LOOKUPS: &str = "device_lookups_total";
pub const DEVICES_TRACKED: &str = "devices_tracked";

/// Installs the global recorder and serves `/metrics` on `port`. Must be
/// called from inside the tokio runtime.
pub fn setup_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to setup metrics: {}", e))?;
    tracing::info!("Metrics exporter listening on {}", addr);
    Ok(())
}

pub fn record_control(control_type: &str, devices: usize) {
    metrics::counter!(CONTROL_REQUESTS, "type" => control_type.to_string()).increment(1);
    metrics::gauge!(DEVICES_TRACKED).set(devices as f64);
}

pub fn record_rejected() {
    metrics::counter!(CONTROL_REJECTED).increment(1);
}

pub fn record_lookup(found: bool) {
    let result = if found { "found" } else { "not_found" };
    metrics::counter!(LOOKUPS, "result" => result).increment(1);
}
