// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for the CoreDNS hairpin rewrite block.
//!
//! # Reconciliation Architecture
//!
//! The controller polls instead of watching:
//!
//! 1. **Tick** - A fixed 15 second timer starts a cycle
//! 2. **Discover** - List all ingresses and collect their TLS hostnames
//! 3. **Render** - Build one `rewrite name` directive per hostname
//! 4. **Converge** - Store the block under the override key of `kube-system/coredns-custom`
//!
//! # Example: Running a single cycle
//!
//! ```rust,no_run
//! use hairpin_dns::config::ControllerConfig;
//! use hairpin_dns::health::HealthState;
//! use hairpin_dns::reconcilers::Reconciler;
//! use hairpin_dns::store::KubeStore;
//! use std::sync::Arc;
//!
//! async fn once(client: kube::Client) -> anyhow::Result<()> {
//!     let config = ControllerConfig::default();
//!     let health = Arc::new(HealthState::new(config.readiness_window()));
//!     let reconciler = Reconciler::new(Arc::new(KubeStore::new(client)), config, health);
//!
//!     let report = reconciler.reconcile_once().await?;
//!     println!("{} hostnames rewritten", report.hostnames.len());
//!     Ok(())
//! }
//! ```

pub mod hairpin;
pub mod pagination;

pub use hairpin::{CycleOutcome, CycleReport, Reconciler};
