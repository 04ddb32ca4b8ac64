//! greenhouse-operator - Admission control for the platform resources.
//!
//! This is the main entry point that:
//! - Initializes structured logging
//! - Creates the Kubernetes client
//! - Starts the health server and the TLS webhook server

use std::path::Path;
use std::sync::Arc;

use kube::Client;
use tokio::signal;
use tracing::{error, info};

use greenhouse_operator::health::{HealthState, run_health_server};
use greenhouse_operator::store::KubeStore;
use greenhouse_operator::{WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, build_router, run_webhook_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("greenhouse_operator=info".parse()?)
                .add_directive("kube=info".parse()?),
        )
        .json()
        .init();

    info!("Starting greenhouse-operator");

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Shared health state; every replica serves webhooks, no leader election
    let health_state = Arc::new(HealthState::new());

    // Start health server immediately (probes should work before readiness)
    let health_handle = {
        let health_state = health_state.clone();
        tokio::spawn(async move {
            if let Err(e) = run_health_server(health_state).await {
                error!("Health server error: {}", e);
            }
        })
    };

    let cert_path =
        std::env::var("WEBHOOK_CERT_PATH").unwrap_or_else(|_| WEBHOOK_CERT_PATH.to_string());
    let key_path =
        std::env::var("WEBHOOK_KEY_PATH").unwrap_or_else(|_| WEBHOOK_KEY_PATH.to_string());
    if !Path::new(&cert_path).exists() || !Path::new(&key_path).exists() {
        error!(
            cert_path = %cert_path,
            key_path = %key_path,
            "Webhook TLS certificates not found"
        );
        return Err("webhook TLS certificates not found".into());
    }

    let store = Arc::new(KubeStore::new(client));
    let router = build_router(store, Some(health_state.clone()))?;

    health_state.set_ready(true).await;

    let webhook_handle = tokio::spawn(async move {
        if let Err(e) = run_webhook_server(router, &cert_path, &key_path).await {
            error!("Webhook server error: {}", e);
        }
    });

    // Wait for any task to complete (or fail), or shutdown signal
    tokio::select! {
        result = webhook_handle => {
            if let Err(e) = result {
                error!("Webhook server task panicked: {}", e);
            }
        }
        result = health_handle => {
            if let Err(e) = result {
                error!("Health server task panicked: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Received shutdown signal, initiating graceful shutdown...");
            health_state.set_ready(false).await;
        }
    }

    info!("Operator stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// Note: Signal handler setup failures are fatal - the operator cannot shut down
/// gracefully without them. Using expect() here is intentional.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
