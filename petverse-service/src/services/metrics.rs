//! Prometheus metrics for petverse-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Adoption attempts by outcome (adopted, already_adopted, not_found, error).
pub static ADOPTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "petverse_adoptions_total",
        "Total number of adoption attempts by outcome",
        &["outcome"]
    )
    .expect("Failed to register adoptions_total")
});

/// Chat requests by outcome (answered, empty_prompt, no_choices, failed).
pub static CHAT_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "petverse_chat_requests_total",
        "Total number of chat requests by outcome",
        &["outcome"]
    )
    .expect("Failed to register chat_requests_total")
});

/// Latency of calls to the chat completion provider.
pub static PROVIDER_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "petverse_provider_request_duration_seconds",
        "Chat provider request duration in seconds",
        &["status"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to register provider_request_duration")
});

/// Store resets by status.
pub static RESETS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "petverse_resets_total",
        "Total number of adoption resets",
        &["status"]
    )
    .expect("Failed to register resets_total")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "petverse_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// HTTP requests by method, matched route and status.
pub static HTTP_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "petverse_http_requests_total",
        "Total number of HTTP requests",
        &["method", "route", "status"]
    )
    .expect("Failed to register http_requests_total")
});

pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "petverse_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "route", "status"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]
    )
    .expect("Failed to register http_request_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&ADOPTIONS_TOTAL);
    Lazy::force(&CHAT_REQUESTS_TOTAL);
    Lazy::force(&PROVIDER_REQUEST_DURATION);
    Lazy::force(&RESETS_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&HTTP_REQUEST_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
