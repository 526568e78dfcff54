// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Access to the cluster objects the reconciler reads and writes.
//!
//! [`ClusterStore`] is the seam between the reconciliation cycle and the
//! Kubernetes API. [`KubeStore`] implements it on top of a `kube::Client`;
//! tests substitute an in-memory implementation.

use crate::reconcilers::pagination::list_all_paginated;
use anyhow::Result;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{ListParams, PostParams};
use kube::{Api, Client, ResourceExt};
use tracing::debug;

/// Read and write operations the reconciler needs from the cluster.
#[async_trait::async_trait]
pub trait ClusterStore: Send + Sync {
    /// List every ingress in every namespace, in listing order.
    async fn list_ingresses(&self) -> Result<Vec<Ingress>>;

    /// Fetch a `ConfigMap`. A missing object is `Ok(None)`, not an error.
    async fn get_configmap(&self, namespace: &str, name: &str) -> Result<Option<ConfigMap>>;

    /// Create a `ConfigMap` that does not exist yet.
    async fn create_configmap(&self, namespace: &str, configmap: &ConfigMap) -> Result<()>;

    /// Replace an existing `ConfigMap` with the given object.
    ///
    /// The write is unconditional: whatever is stored is overwritten, even if
    /// it changed since `configmap` was read.
    async fn replace_configmap(&self, namespace: &str, configmap: &ConfigMap) -> Result<()>;
}

/// [`ClusterStore`] backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    /// Wrap a Kubernetes client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Whether a kube error is an HTTP 404 from the API server.
#[must_use]
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == 404)
}

#[async_trait::async_trait]
impl ClusterStore for KubeStore {
    async fn list_ingresses(&self) -> Result<Vec<Ingress>> {
        let api: Api<Ingress> = Api::all(self.client.clone());
        list_all_paginated(&api, ListParams::default()).await
    }

    async fn get_configmap(&self, namespace: &str, name: &str) -> Result<Option<ConfigMap>> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(configmap) => Ok(Some(configmap)),
            Err(e) if is_not_found(&e) => {
                debug!(namespace = %namespace, name = %name, "ConfigMap not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_configmap(&self, namespace: &str, configmap: &ConfigMap) -> Result<()> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        api.create(&PostParams::default(), configmap).await?;
        Ok(())
    }

    async fn replace_configmap(&self, namespace: &str, configmap: &ConfigMap) -> Result<()> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let mut configmap = configmap.clone();
        configmap.metadata.resource_version = None;
        api.replace(&configmap.name_any(), &PostParams::default(), &configmap)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
