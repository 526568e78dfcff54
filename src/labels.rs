// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Label constants applied to resources the controller creates.

use std::collections::BTreeMap;

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the component name within the architecture
pub const K8S_COMPONENT: &str = "app.kubernetes.io/component";

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the name of a higher-level application this one is part of
pub const K8S_PART_OF: &str = "app.kubernetes.io/part-of";

// ============================================================================
// Label Values
// ============================================================================

/// Value for `app.kubernetes.io/managed-by` on objects created by this controller
pub const MANAGED_BY_HAIRPIN_DNS: &str = "hairpin-dns";

/// Value for `app.kubernetes.io/part-of`
pub const PART_OF_HAIRPIN_PROXY: &str = "hairpin-proxy";

/// Component value for the CoreDNS custom configuration
pub const COMPONENT_DNS_REWRITE: &str = "dns-rewrite";

/// Labels stamped on a `ConfigMap` the controller had to create itself.
///
/// Existing objects are never relabelled; labels are only set on creation.
#[must_use]
pub fn created_configmap_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        (K8S_MANAGED_BY.to_string(), MANAGED_BY_HAIRPIN_DNS.to_string()),
        (K8S_PART_OF.to_string(), PART_OF_HAIRPIN_PROXY.to_string()),
        (K8S_COMPONENT.to_string(), COMPONENT_DNS_REWRITE.to_string()),
    ])
}
