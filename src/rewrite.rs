// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CoreDNS rewrite block rendering and `ConfigMap` merging.
//!
//! The rendered block is stored under a single `*.override` key of the
//! `coredns-custom` `ConfigMap`. CoreDNS imports it into the default server
//! block, so each line is a plain `rewrite` plugin directive:
//!
//! ```text
//! rewrite name app.example.com hairpin-proxy.hairpin-proxy.svc.cluster.local
//! ```

use crate::constants::REWRITE_DIRECTIVE;
use crate::labels::created_configmap_labels;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Render one `rewrite name <host> <target>` line per hostname.
///
/// Every line is newline-terminated. An empty host list renders an empty
/// string, not a placeholder.
///
/// # Example
///
/// ```rust
/// use hairpin_dns::rewrite::render_rewrite_fragment;
///
/// let hosts = vec!["foo.com".to_string()];
/// assert_eq!(
///     render_rewrite_fragment(&hosts, "proxy.svc.cluster.local"),
///     "rewrite name foo.com proxy.svc.cluster.local\n"
/// );
/// ```
#[must_use]
pub fn render_rewrite_fragment(hosts: &[String], target: &str) -> String {
    hosts
        .iter()
        .map(|host| format!("{REWRITE_DIRECTIVE} {host} {target}\n"))
        .collect()
}

/// Set `key` to `fragment` in the `ConfigMap` data, leaving every other key alone.
///
/// Returns `true` if the stored value changed (including when the key or the
/// whole `data` map was missing).
pub fn apply_fragment(configmap: &mut ConfigMap, key: &str, fragment: &str) -> bool {
    let data = configmap.data.get_or_insert_with(BTreeMap::new);
    if data.get(key).map(String::as_str) == Some(fragment) {
        return false;
    }
    data.insert(key.to_string(), fragment.to_string());
    true
}

/// Build a fresh `ConfigMap` holding only the rewrite block.
///
/// Used when the CoreDNS custom `ConfigMap` does not exist yet.
#[must_use]
pub fn build_configmap(namespace: &str, name: &str, key: &str, fragment: &str) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(created_configmap_labels()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(key.to_string(), fragment.to_string())])),
        ..Default::default()
    }
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod rewrite_tests;
