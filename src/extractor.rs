// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Desired-state extraction from ingresses.
//!
//! Every hostname listed under `spec.tls[*].hosts` needs a rewrite, since
//! those are the names clients reach over HTTPS through the external load
//! balancer.

use k8s_openapi::api::networking::v1::Ingress;

/// Flatten the TLS hostnames of all ingresses into one ordered list.
///
/// Order follows the listing, then the TLS entries of each ingress, then the
/// hosts within an entry. Hostnames are passed through untouched: no case
/// folding, no wildcard handling and no de-duplication.
///
/// # Example
///
/// ```rust
/// use hairpin_dns::extractor::extract_tls_hosts;
///
/// assert!(extract_tls_hosts(&[]).is_empty());
/// ```
#[must_use]
pub fn extract_tls_hosts(ingresses: &[Ingress]) -> Vec<String> {
    ingresses
        .iter()
        .filter_map(|ingress| ingress.spec.as_ref())
        .filter_map(|spec| spec.tls.as_ref())
        .flatten()
        .filter_map(|tls| tls.hosts.as_ref())
        .flatten()
        .cloned()
        .collect()
}

/// Hostnames that appear more than once, in order of their second appearance.
///
/// Used for diagnostics only; duplicates are still rendered.
#[must_use]
pub fn duplicate_hosts(hosts: &[String]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    hosts
        .iter()
        .filter(|host| !seen.insert(host.as_str()))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod extractor_tests;
