use std::net::SocketAddr;

use crate::proto::Request;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total requests served. Labels: op, status.
pub const REQUESTS_TOTAL: &str = "atrium_requests_total";

/// Histogram: request latency in seconds. Labels: op.
pub const REQUEST_DURATION_SECONDS: &str = "atrium_request_duration_seconds";

/// Counter: bookings admitted.
pub const BOOKINGS_ADMITTED_TOTAL: &str = "atrium_bookings_admitted_total";

/// Counter: bookings rejected for conflicting with an existing booking.
pub const BOOKINGS_REJECTED_TOTAL: &str = "atrium_bookings_rejected_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "atrium_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "atrium_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "atrium_connections_rejected_total";

/// Gauge: rooms in the catalog.
pub const ROOMS: &str = "atrium_rooms";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a Request variant to a short label for metrics.
pub fn op_label(request: &Request) -> &'static str {
    match request {
        Request::Book { .. } => "book",
        Request::Bookings { .. } => "bookings",
    }
}
