// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # hairpin-dns - CoreDNS rewrites for hairpin traffic
//!
//! Pods that call a publicly exposed hostname of their own cluster normally
//! leave through the external load balancer and come back in ("hairpin"
//! traffic). This controller keeps a CoreDNS `rewrite` block in sync with the
//! TLS hostnames of all ingresses so those names resolve to the in-cluster
//! hairpin proxy instead.
//!
//! ## Modules
//!
//! - [`extractor`] - TLS hostnames from ingresses
//! - [`rewrite`] - Rewrite block rendering and `ConfigMap` merging
//! - [`reconcilers`] - Periodic reconciliation loop
//! - [`store`] - Kubernetes API access behind the [`store::ClusterStore`] trait
//! - [`health`] - Last-success tracking for readiness
//! - [`server`] - `/healthz`, `/readyz` and `/metrics` endpoints
//!
//! ## Example
//!
//! ```rust
//! use hairpin_dns::constants::HAIRPIN_PROXY_TARGET;
//! use hairpin_dns::rewrite::render_rewrite_fragment;
//!
//! let hosts = vec!["a.example.com".to_string(), "b.example.com".to_string()];
//! let block = render_rewrite_fragment(&hosts, HAIRPIN_PROXY_TARGET);
//! assert_eq!(block.lines().count(), 2);
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod health;
pub mod labels;
pub mod metrics;
pub mod reconcilers;
pub mod rewrite;
pub mod server;
pub mod store;

#[cfg(test)]
mod test_support;
