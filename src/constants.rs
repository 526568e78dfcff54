// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the hairpin DNS controller.
//!
//! Constants are organized by category for easy maintenance.

// ============================================================================
// CoreDNS Custom Configuration Constants
// ============================================================================

/// Name of the `ConfigMap` CoreDNS imports custom server blocks from
pub const COREDNS_CUSTOM_CONFIGMAP: &str = "coredns-custom";

/// Namespace holding the CoreDNS custom `ConfigMap`
pub const COREDNS_NAMESPACE: &str = "kube-system";

/// Default key of the rewrite block inside the `ConfigMap`.
///
/// CoreDNS loads every `*.override` key into the default server block.
pub const DEFAULT_OVERRIDE_KEY: &str = "hairpin.override";

/// Suffix CoreDNS expects on keys merged into the default server block
pub const OVERRIDE_KEY_SUFFIX: &str = ".override";

// ============================================================================
// Rewrite Directive Constants
// ============================================================================

/// CoreDNS `rewrite` plugin directive emitted once per hostname
pub const REWRITE_DIRECTIVE: &str = "rewrite name";

/// Cluster-internal DNS name of the hairpin proxy service
pub const HAIRPIN_PROXY_TARGET: &str = "hairpin-proxy.hairpin-proxy.svc.cluster.local";

// ============================================================================
// Reconciliation Constants
// ============================================================================

/// Period between two reconciliation cycles (15 seconds)
pub const RECONCILE_INTERVAL_SECS: u64 = 15;

/// Number of reconcile periods after which a stale last success flips readiness
pub const READINESS_STALE_PERIODS: u32 = 3;

/// Page size used when listing ingresses across all namespaces
pub const KUBE_LIST_PAGE_SIZE: u32 = 100;

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 2;

/// Thread name prefix for Tokio worker threads
pub const TOKIO_THREAD_NAME: &str = "hairpin-dns";

// ============================================================================
// Health and Metrics Server Constants
// ============================================================================

/// Port for the health and Prometheus metrics HTTP server
pub const HEALTH_SERVER_PORT: u16 = 8080;

/// Bind address for the health and metrics HTTP server
pub const HEALTH_SERVER_BIND_ADDRESS: &str = "0.0.0.0";

/// Path for the liveness probe
pub const HEALTHZ_PATH: &str = "/healthz";

/// Path for the readiness probe
pub const READYZ_PATH: &str = "/readyz";

/// Path for Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

// ============================================================================
// Environment Variables
// ============================================================================

/// Overrides the designated `ConfigMap` key
pub const ENV_OVERRIDE_KEY: &str = "HAIRPIN_OVERRIDE_KEY";

/// Overrides the health and metrics server port
pub const ENV_HEALTH_PORT: &str = "HAIRPIN_HEALTH_PORT";

/// Selects log output format (`text` or `json`)
pub const ENV_LOG_FORMAT: &str = "RUST_LOG_FORMAT";
