// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared fixtures for unit tests.

use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::api::networking::v1::{Ingress, IngressRule, IngressSpec, IngressTLS};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Build an ingress with one TLS entry per slice in `tls`.
///
/// An empty `tls` slice yields an ingress without a `tls` section at all.
pub fn ingress(namespace: &str, name: &str, tls: &[&[&str]]) -> Ingress {
    let tls = if tls.is_empty() {
        None
    } else {
        Some(
            tls.iter()
                .map(|hosts| IngressTLS {
                    hosts: Some(hosts.iter().map(|h| (*h).to_string()).collect()),
                    secret_name: Some(format!("{name}-tls")),
                })
                .collect(),
        )
    };

    Ingress {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            tls,
            rules: Some(vec![IngressRule {
                host: Some(format!("{name}.plain.example")),
                http: None,
            }]),
            ..Default::default()
        }),
        status: None,
    }
}

/// Build a `ConfigMap` with the given data entries.
pub fn configmap(namespace: &str, name: &str, data: &[(&str, &str)]) -> ConfigMap {
    ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(
            data.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        ),
        ..Default::default()
    }
}
