use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref REQUESTS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "analytics_requests_total",
        "Total analytics requests received"
    ))
    .unwrap();
    pub static ref NOT_FOUND_TOTAL: Counter = Counter::with_opts(Opts::new(
        "analytics_not_found_total",
        "Total requests for equipment with no telemetry data"
    ))
    .unwrap();
    pub static ref UPSTREAM_UNAVAILABLE_TOTAL: Counter = Counter::with_opts(Opts::new(
        "analytics_upstream_unavailable_total",
        "Total requests failed because the ingestion service was unreachable"
    ))
    .unwrap();
    pub static ref MALFORMED_UPSTREAM_TOTAL: Counter = Counter::with_opts(Opts::new(
        "analytics_malformed_upstream_total",
        "Total requests failed on an undecodable upstream payload"
    ))
    .unwrap();
    pub static ref REQUEST_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "analytics_request_latency_seconds",
            "Time taken to serve an analytics request, upstream call included"
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0
        ])
    )
    .unwrap();
}

pub fn init_metrics() {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(NOT_FOUND_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(UPSTREAM_UNAVAILABLE_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(MALFORMED_UPSTREAM_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(REQUEST_LATENCY_SECONDS.clone()))
        .unwrap();
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
