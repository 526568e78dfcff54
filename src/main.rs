// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use clap::Parser;
use hairpin_dns::{
    config::ControllerConfig,
    constants::{ENV_LOG_FORMAT, TOKIO_THREAD_NAME, TOKIO_WORKER_THREADS},
    health::HealthState,
    reconcilers::Reconciler,
    server,
    store::KubeStore,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Keep CoreDNS rewrites in sync with ingress TLS hostnames.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Path to a kubeconfig file. Defaults to $KUBECONFIG, ~/.kube/config, then in-cluster config.
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name(TOKIO_THREAD_NAME)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(args))
}

/// Initialize logging.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`text` or `json`).
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

/// Build a Kubernetes client from an explicit kubeconfig path, or infer one.
async fn build_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let Some(path) = kubeconfig else {
        debug!("No kubeconfig given, inferring client configuration");
        return Client::try_default()
            .await
            .context("failed to infer Kubernetes client configuration");
    };

    debug!(path = %path.display(), "Loading kubeconfig");
    let kubeconfig = Kubeconfig::read_from(path)
        .with_context(|| format!("failed to read kubeconfig {}", path.display()))?;
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .with_context(|| format!("invalid kubeconfig {}", path.display()))?;
    Client::try_from(config).context("failed to build Kubernetes client")
}

/// Process signals that stop the controller, registered before any work starts.
struct ShutdownSignals {
    #[cfg(unix)]
    sigint: tokio::signal::unix::Signal,
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
}

impl ShutdownSignals {
    /// Install the SIGINT and SIGTERM handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be installed.
    fn register() -> Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                sigint: signal(SignalKind::interrupt())
                    .context("failed to register SIGINT handler")?,
                sigterm: signal(SignalKind::terminate())
                    .context("failed to register SIGTERM handler")?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Wait for the first shutdown signal and return its name.
    async fn recv(self) -> &'static str {
        #[cfg(unix)]
        {
            let Self {
                mut sigint,
                mut sigterm,
            } = self;
            tokio::select! {
                _ = sigint.recv() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            }
        }
        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
            "SIGINT"
        }
    }
}

async fn async_main(args: Args) -> Result<()> {
    init_tracing();

    info!("Starting hairpin DNS controller");

    let signals = ShutdownSignals::register()?;

    let config = ControllerConfig::from_env()?;
    debug!(?config, "Loaded controller configuration");

    let client = build_client(args.kubeconfig.as_deref()).await?;
    debug!("Kubernetes client initialized successfully");

    let health = Arc::new(HealthState::new(config.readiness_window()));
    let listener = server::bind(config.health_port).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let wait_for = |mut rx: watch::Receiver<bool>| async move {
        let _ = rx.wait_for(|stop| *stop).await;
    };

    let server_task = tokio::spawn(server::serve(
        listener,
        health.clone(),
        wait_for(shutdown_rx.clone()),
    ));

    tokio::spawn(async move {
        let signal = signals.recv().await;
        info!("Got {signal} signal, shutting down");
        let _ = shutdown_tx.send(true);
    });

    let reconciler = Reconciler::new(Arc::new(KubeStore::new(client)), config, health);
    reconciler.run(wait_for(shutdown_rx)).await;

    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Health server failed: {e:#}"),
        Err(e) => error!("Health server task panicked: {e}"),
    }

    info!("Hairpin DNS controller stopped");
    Ok(())
}
