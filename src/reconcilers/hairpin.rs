// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hairpin rewrite reconciler.
//!
//! One cycle lists every ingress, renders a `rewrite` line for each TLS
//! hostname and stores the block under the override key of the CoreDNS
//! custom `ConfigMap`. Other keys of the `ConfigMap` are never touched.
//!
//! A cycle stops at the first failing step. Nothing is retried inside a
//! cycle; the next tick is the retry.

use crate::config::ControllerConfig;
use crate::errors::ReconcileError;
use crate::extractor::{duplicate_hosts, extract_tls_hosts};
use crate::health::HealthState;
use crate::metrics;
use crate::rewrite::{apply_fragment, build_configmap, render_rewrite_fragment};
use crate::store::ClusterStore;
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// What a successful cycle did to the `ConfigMap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The `ConfigMap` did not exist and was created
    Created,
    /// The override key changed and the `ConfigMap` was replaced
    Updated,
    /// The override key already held the rendered block; nothing was written
    Unchanged,
}

/// Result of one successful cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// TLS hostnames found in this cycle, in listing order
    pub hostnames: Vec<String>,
    /// Rewrite block stored under the override key
    pub fragment: String,
    /// Action taken on the `ConfigMap`
    pub outcome: CycleOutcome,
}

/// Periodic reconciler keeping the rewrite block in sync with ingress TLS hosts.
pub struct Reconciler {
    store: Arc<dyn ClusterStore>,
    config: ControllerConfig,
    health: Arc<HealthState>,
}

impl Reconciler {
    /// Create a reconciler over `store`.
    #[must_use]
    pub fn new(
        store: Arc<dyn ClusterStore>,
        config: ControllerConfig,
        health: Arc<HealthState>,
    ) -> Self {
        Self {
            store,
            config,
            health,
        }
    }

    /// Run one reconciliation cycle.
    ///
    /// A missing `ConfigMap` is created holding only the override key.
    ///
    /// # Errors
    ///
    /// Returns the first failing step: listing ingresses, reading the
    /// `ConfigMap`, or writing it back.
    pub async fn reconcile_once(&self) -> Result<CycleReport, ReconcileError> {
        let namespace = self.config.configmap_namespace.as_str();
        let name = self.config.configmap_name.as_str();
        let key = self.config.override_key.as_str();

        let ingresses = self
            .store
            .list_ingresses()
            .await
            .map_err(|source| ReconcileError::ListIngresses { source })?;

        let hostnames = extract_tls_hosts(&ingresses);
        {
            let duplicates = duplicate_hosts(&hostnames);
            if !duplicates.is_empty() {
                debug!(duplicates = ?duplicates, "Hostnames declared by more than one TLS entry");
            }
        }

        let fragment = render_rewrite_fragment(&hostnames, &self.config.rewrite_target);
        debug!(
            ingresses = ingresses.len(),
            hostnames = hostnames.len(),
            fragment = %fragment,
            "Rendered rewrite block"
        );

        let existing = self
            .store
            .get_configmap(namespace, name)
            .await
            .map_err(|source| ReconcileError::GetConfigMap {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            })?;

        let write_error = |source: anyhow::Error| ReconcileError::WriteConfigMap {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source,
        };

        let outcome = if let Some(mut configmap) = existing {
            if apply_fragment(&mut configmap, key, &fragment) {
                self.store
                    .replace_configmap(namespace, &configmap)
                    .await
                    .map_err(write_error)?;
                metrics::record_configmap_write("update");
                info!("Updated {key} in ConfigMap {namespace}/{name}");
                CycleOutcome::Updated
            } else {
                debug!("ConfigMap {namespace}/{name} already up to date");
                CycleOutcome::Unchanged
            }
        } else {
            let configmap = build_configmap(namespace, name, key, &fragment);
            self.store
                .create_configmap(namespace, &configmap)
                .await
                .map_err(write_error)?;
            metrics::record_configmap_write("create");
            info!("Created ConfigMap {namespace}/{name}");
            CycleOutcome::Created
        };

        Ok(CycleReport {
            hostnames,
            fragment,
            outcome,
        })
    }

    /// Run one cycle and record its outcome in logs, metrics and health state.
    ///
    /// # Errors
    ///
    /// Same as [`Reconciler::reconcile_once`]; the error is already logged.
    pub async fn run_cycle(&self) -> Result<CycleReport, ReconcileError> {
        let start = Instant::now();
        let result = self.reconcile_once().await;
        let elapsed = start.elapsed();

        match &result {
            Ok(report) => {
                info!(
                    hostnames = report.hostnames.len(),
                    outcome = ?report.outcome,
                    elapsed = ?elapsed,
                    "Reconciliation cycle succeeded"
                );
                metrics::record_cycle_success(elapsed, report.hostnames.len());
                self.health.record_success(Utc::now(), report.hostnames.len());
            }
            Err(e) => {
                error!(
                    stage = e.stage(),
                    error = %e,
                    elapsed = ?elapsed,
                    "Reconciliation cycle failed, will retry on next tick"
                );
                metrics::record_cycle_error(elapsed, e.stage());
                self.health.record_failure(Utc::now(), &e.to_string());
            }
        }

        result
    }

    /// Reconcile on a fixed period until `shutdown` resolves.
    ///
    /// The first cycle runs immediately. Cycles never overlap; a cycle in
    /// flight when `shutdown` resolves is allowed to finish, then the loop
    /// returns without starting another one.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            namespace = %self.config.configmap_namespace,
            name = %self.config.configmap_name,
            key = %self.config.override_key,
            interval = ?self.config.interval,
            "Starting hairpin rewrite reconciler"
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    info!("Shutdown requested, stopping reconciler");
                    return;
                }
                _ = ticker.tick() => {
                    if self.run_cycle().await.is_err() {
                        let failures = self.health.snapshot().consecutive_failures;
                        if failures > 1 {
                            warn!(consecutive_failures = failures, "Reconciliation keeps failing");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "hairpin_tests.rs"]
mod hairpin_tests;
