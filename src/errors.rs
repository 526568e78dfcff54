// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for a single reconciliation cycle.
//!
//! Each variant names the step of the cycle that failed. A failed cycle is
//! logged and counted, then the loop waits for the next tick.

use thiserror::Error;

/// Failure of one reconciliation cycle.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Listing ingresses across all namespaces failed
    #[error("failed to list ingresses: {source}")]
    ListIngresses {
        #[source]
        source: anyhow::Error,
    },

    /// Reading the CoreDNS custom `ConfigMap` failed (not found is not an error)
    #[error("failed to get ConfigMap {namespace}/{name}: {source}")]
    GetConfigMap {
        /// `ConfigMap` namespace
        namespace: String,
        /// `ConfigMap` name
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Creating or replacing the CoreDNS custom `ConfigMap` failed
    #[error("failed to write ConfigMap {namespace}/{name}: {source}")]
    WriteConfigMap {
        /// `ConfigMap` namespace
        namespace: String,
        /// `ConfigMap` name
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ReconcileError {
    /// Short label of the failing step, used in logs and metrics.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::ListIngresses { .. } => "list_ingresses",
            Self::GetConfigMap { .. } => "get_configmap",
            Self::WriteConfigMap { .. } => "write_configmap",
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
