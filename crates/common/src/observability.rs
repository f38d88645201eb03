use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static CONTACT_SUBMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "venture_hub_contact_submissions_total",
        "Contact form submissions by outcome",
        &["outcome"]
    )
    .expect("register contact_submissions_total")
});

pub static BACKUP_WRITES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "venture_hub_backup_writes_total",
        "Contact messages written to local backup files"
    )
    .expect("register backup_writes_total")
});

pub static REMOTE_STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "venture_hub_remote_store_errors_total",
        "Failed calls to the remote key-value store"
    )
    .expect("register remote_store_errors_total")
});

pub static PREDICTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "venture_hub_predictions_total",
        "Prediction requests by outcome",
        &["outcome"]
    )
    .expect("register predictions_total")
});

pub static PREDICTION_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "venture_hub_prediction_duration_seconds",
        "Model inference duration in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]
    )
    .expect("register prediction_duration")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

/// Axum handler serving the default registry as Prometheus text.
pub async fn metrics_handler() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_metrics_include_registered_counters() {
        BACKUP_WRITES_TOTAL.inc();
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("venture_hub_backup_writes_total"));
    }
}
