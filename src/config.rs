// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Controller configuration.
//!
//! A [`ControllerConfig`] is built once at startup and handed to the
//! reconciler by reference. Nothing here is read from ambient globals after
//! construction.

use crate::constants::{
    COREDNS_CUSTOM_CONFIGMAP, COREDNS_NAMESPACE, DEFAULT_OVERRIDE_KEY, HAIRPIN_PROXY_TARGET,
    HEALTH_SERVER_PORT, OVERRIDE_KEY_SUFFIX, READINESS_STALE_PERIODS, RECONCILE_INTERVAL_SECS,
};
use anyhow::{bail, Context as _, Result};
use std::time::Duration;
use tracing::warn;

/// Settings for one running controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Name of the CoreDNS custom `ConfigMap`
    pub configmap_name: String,
    /// Namespace of the CoreDNS custom `ConfigMap`
    pub configmap_namespace: String,
    /// The single key this controller owns inside the `ConfigMap`
    pub override_key: String,
    /// Canonical name every hostname is rewritten to
    pub rewrite_target: String,
    /// Period between reconciliation cycles
    pub interval: Duration,
    /// Port of the health and metrics server
    pub health_port: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            configmap_name: COREDNS_CUSTOM_CONFIGMAP.to_string(),
            configmap_namespace: COREDNS_NAMESPACE.to_string(),
            override_key: DEFAULT_OVERRIDE_KEY.to_string(),
            rewrite_target: HAIRPIN_PROXY_TARGET.to_string(),
            interval: Duration::from_secs(RECONCILE_INTERVAL_SECS),
            health_port: HEALTH_SERVER_PORT,
        }
    }
}

impl ControllerConfig {
    /// Build the configuration from optional overrides.
    ///
    /// `override_key` and `health_port` are the raw values of the
    /// `HAIRPIN_OVERRIDE_KEY` and `HAIRPIN_HEALTH_PORT` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the port does not parse.
    pub fn from_overrides(override_key: Option<&str>, health_port: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(key) = override_key {
            let key = key.trim();
            if key.is_empty() {
                bail!("override key must not be empty");
            }
            if !key.ends_with(OVERRIDE_KEY_SUFFIX) {
                warn!(
                    key = %key,
                    "Override key does not end in {OVERRIDE_KEY_SUFFIX}; CoreDNS will not merge it into the default server block"
                );
            }
            config.override_key = key.to_string();
        }

        if let Some(port) = health_port {
            config.health_port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid health server port '{port}'"))?;
        }

        Ok(config)
    }

    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ControllerConfig::from_overrides`].
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(crate::constants::ENV_OVERRIDE_KEY).ok();
        let port = std::env::var(crate::constants::ENV_HEALTH_PORT).ok();
        Self::from_overrides(key.as_deref(), port.as_deref())
    }

    /// Age after which the last successful cycle no longer counts as ready.
    #[must_use]
    pub fn readiness_window(&self) -> Duration {
        self.interval * READINESS_STALE_PERIODS
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
