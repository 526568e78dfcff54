// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the hairpin DNS controller.
//!
//! All metrics carry the `hairpin_dns_` prefix and live in
//! [`METRICS_REGISTRY`], which the `/metrics` endpoint encodes.
//!
//! # Example
//!
//! ```rust,no_run
//! use hairpin_dns::metrics::record_cycle_success;
//!
//! record_cycle_success(std::time::Duration::from_millis(120), 3);
//! ```

use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "hairpin_dns";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Reconciliation Metrics
// ============================================================================

/// Total number of reconciliation cycles by outcome
///
/// Labels:
/// - `status`: `success` or `error`
pub static CYCLES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconcile_cycles_total"),
        "Total number of reconciliation cycles by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of reconciliation cycles in seconds
pub static CYCLE_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconcile_cycle_duration_seconds"),
        "Duration of reconciliation cycles in seconds",
    )
    .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]);
    let histogram = Histogram::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of failed cycles by the step that failed
///
/// Labels:
/// - `stage`: `list_ingresses`, `get_configmap` or `write_configmap`
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of failed reconciliation cycles by stage",
    );
    let counter = CounterVec::new(opts, &["stage"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// ConfigMap Metrics
// ============================================================================

/// Total number of `ConfigMap` writes
///
/// Labels:
/// - `operation`: `create` or `update`
pub static CONFIGMAP_WRITES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_configmap_writes_total"),
        "Total number of CoreDNS ConfigMap writes by operation",
    );
    let counter = CounterVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Number of hostnames rewritten by the last successful cycle
pub static REWRITTEN_HOSTNAMES: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(
        format!("{METRICS_NAMESPACE}_rewritten_hostnames"),
        "Number of hostnames in the rewrite block after the last successful cycle",
    )
    .unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Unix timestamp of the last successful cycle
pub static LAST_SUCCESS_TIMESTAMP_SECONDS: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(
        format!("{METRICS_NAMESPACE}_last_success_timestamp_seconds"),
        "Unix timestamp of the last successful reconciliation cycle",
    )
    .unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful cycle
///
/// # Arguments
/// * `duration` - Duration of the cycle
/// * `hostnames` - Number of hostnames rendered into the rewrite block
#[allow(clippy::cast_precision_loss)]
pub fn record_cycle_success(duration: Duration, hostnames: usize) {
    CYCLES_TOTAL.with_label_values(&["success"]).inc();
    CYCLE_DURATION_SECONDS.observe(duration.as_secs_f64());
    REWRITTEN_HOSTNAMES.set(hostnames as f64);
    LAST_SUCCESS_TIMESTAMP_SECONDS.set(chrono::Utc::now().timestamp() as f64);
}

/// Record a failed cycle
///
/// # Arguments
/// * `duration` - Duration of the cycle up to the failure
/// * `stage` - The step that failed
pub fn record_cycle_error(duration: Duration, stage: &str) {
    CYCLES_TOTAL.with_label_values(&["error"]).inc();
    CYCLE_DURATION_SECONDS.observe(duration.as_secs_f64());
    ERRORS_TOTAL.with_label_values(&[stage]).inc();
}

/// Record a `ConfigMap` write
///
/// # Arguments
/// * `operation` - `create` or `update`
pub fn record_configmap_write(operation: &str) {
    CONFIGMAP_WRITES_TOTAL
        .with_label_values(&[operation])
        .inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_cycle_success() {
        let before = CYCLES_TOTAL.with_label_values(&["success"]).get();

        record_cycle_success(Duration::from_millis(500), 4);

        let after = CYCLES_TOTAL.with_label_values(&["success"]).get();
        assert!(after > before, "Success counter should increment");
        assert!(CYCLE_DURATION_SECONDS.get_sample_count() > 0);
        assert!(LAST_SUCCESS_TIMESTAMP_SECONDS.get() > 0.0);
    }

    #[test]
    fn test_record_cycle_error() {
        let before = ERRORS_TOTAL.with_label_values(&["get_configmap"]).get();

        record_cycle_error(Duration::from_millis(250), "get_configmap");

        let after = ERRORS_TOTAL.with_label_values(&["get_configmap"]).get();
        assert!(after > before, "Error counter should increment for the stage");
        assert!(CYCLES_TOTAL.with_label_values(&["error"]).get() > 0.0);
    }

    #[test]
    fn test_record_configmap_write() {
        record_configmap_write("create");
        assert!(CONFIGMAP_WRITES_TOTAL.with_label_values(&["create"]).get() > 0.0);
    }

    #[test]
    fn test_gather_metrics() {
        record_cycle_success(Duration::from_millis(100), 1);

        let metrics_text = gather_metrics().expect("Gathering metrics should succeed");
        assert!(
            metrics_text.contains("hairpin_dns_reconcile_cycles_total"),
            "Metrics should contain the cycle counter"
        );
        assert!(
            metrics_text.contains("hairpin_dns_last_success_timestamp_seconds"),
            "Metrics should contain the last success gauge"
        );
    }
}
