// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Outcome tracking for readiness.
//!
//! A cycle that fails is only logged, so without this state a controller that
//! never succeeds looks the same as a healthy one with no TLS ingresses.
//! [`HealthState`] remembers when the last cycle succeeded and backs the
//! `/readyz` probe.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;

/// Point-in-time view of the controller's health.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    /// When the last cycle completed successfully
    pub last_success: Option<DateTime<Utc>>,
    /// When the last cycle failed
    pub last_failure: Option<DateTime<Utc>>,
    /// Error message of the last failed cycle
    pub last_error: Option<String>,
    /// Failed cycles since the last success
    pub consecutive_failures: u64,
    /// Hostnames rewritten by the last successful cycle
    pub hostnames: usize,
}

/// Shared, thread-safe health record updated after every cycle.
#[derive(Debug)]
pub struct HealthState {
    snapshot: RwLock<HealthSnapshot>,
    stale_after: Duration,
}

impl HealthState {
    /// Create an empty record. Readiness expires `stale_after` past the last success.
    #[must_use]
    pub fn new(stale_after: Duration) -> Self {
        Self {
            snapshot: RwLock::new(HealthSnapshot::default()),
            stale_after,
        }
    }

    /// Record a successful cycle at `at`.
    pub fn record_success(&self, at: DateTime<Utc>, hostnames: usize) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        snapshot.last_success = Some(at);
        snapshot.consecutive_failures = 0;
        snapshot.hostnames = hostnames;
    }

    /// Record a failed cycle at `at`.
    pub fn record_failure(&self, at: DateTime<Utc>, error: &str) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        snapshot.last_failure = Some(at);
        snapshot.last_error = Some(error.to_string());
        snapshot.consecutive_failures += 1;
    }

    /// Copy of the current record.
    #[must_use]
    pub fn snapshot(&self) -> HealthSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Ready iff a cycle has succeeded within the staleness window ending at `now`.
    #[must_use]
    pub fn is_ready_at(&self, now: DateTime<Utc>) -> bool {
        let Some(last_success) = self.snapshot().last_success else {
            return false;
        };
        match (now - last_success).to_std() {
            Ok(age) => age <= self.stale_after,
            // Last success is in the future relative to `now` (clock skew)
            Err(_) => true,
        }
    }

    /// Ready iff a cycle has succeeded recently.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.is_ready_at(Utc::now())
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod health_tests;
