//! Admission webhook server.
//!
//! Serves one HTTPS endpoint per admitted kind at `/admit-<kind>`.
//!
//! To enable webhooks:
//! 1. Deploy cert-manager for TLS certificates
//! 2. Create Validating/MutatingWebhookConfigurations pointing at the endpoints
//! 3. Mount the TLS certificate secret to the operator pod at /etc/webhook/certs/
//!
//! The webhook server starts automatically when certificates are present.

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{Json, Router, routing::post};
use kube::core::admission::AdmissionReview;
use thiserror::Error;
use tracing::{debug, info};

use crate::health::HealthState;
use crate::store::ObjectStore;
use crate::webhooks::dispatch::dispatch;
use crate::webhooks::handlers::{
    AdmissionHandler, ClusterHandler, OrganizationHandler, PluginDefinitionHandler, PluginHandler,
    SecretHandler, TeamHandler, TeamRoleBindingHandler, TeamRoleHandler,
};

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;

/// Errors raised while assembling the webhook router
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("handler for kind {0} registered twice")]
    DuplicateKind(&'static str),
}

/// Errors that can occur when running the webhook server
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),
    #[error("Webhook server error: {0}")]
    Server(String),
}

/// Collects admission handlers into an axum router.
///
/// Each registered handler owns one route. The store and the optional health
/// state are shared across all of them.
pub struct WebhookRouter {
    router: Router,
    kinds: BTreeSet<&'static str>,
    store: Arc<dyn ObjectStore>,
    health: Option<Arc<HealthState>>,
}

impl WebhookRouter {
    pub fn new(store: Arc<dyn ObjectStore>, health: Option<Arc<HealthState>>) -> Self {
        Self {
            router: Router::new(),
            kinds: BTreeSet::new(),
            store,
            health,
        }
    }

    /// Register a handler under `/admit-<kind>`.
    pub fn register<H: AdmissionHandler>(mut self, handler: H) -> Result<Self, RegistryError> {
        if !self.kinds.insert(H::KIND) {
            return Err(RegistryError::DuplicateKind(H::KIND));
        }
        let path = format!("/admit-{}", H::KIND.to_lowercase());
        debug!(kind = H::KIND, path = %path, "registering admission endpoint");

        let handler = Arc::new(handler);
        let store = Arc::clone(&self.store);
        let health = self.health.clone();
        let route = post(move |Json(review): Json<AdmissionReview<H::Object>>| {
            let handler = Arc::clone(&handler);
            let store = Arc::clone(&store);
            let health = health.clone();
            async move {
                let (status, review) = dispatch(handler.as_ref(), store.as_ref(), review).await;
                if let Some(health) = &health {
                    let allowed = review
                        .response
                        .as_ref()
                        .is_some_and(|response| response.allowed);
                    health.metrics.record_admission(H::KIND, allowed);
                }
                (status, Json(review))
            }
        });
        self.router = self.router.route(&path, route);
        Ok(self)
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Build the router admitting every platform kind with default handlers.
pub fn build_router(
    store: Arc<dyn ObjectStore>,
    health: Option<Arc<HealthState>>,
) -> Result<Router, RegistryError> {
    Ok(WebhookRouter::new(store, health)
        .register(PluginHandler::default())?
        .register(PluginDefinitionHandler)?
        .register(ClusterHandler)?
        .register(OrganizationHandler)?
        .register(SecretHandler)?
        .register(TeamHandler)?
        .register(TeamRoleHandler)?
        .register(TeamRoleBindingHandler)?
        .into_router())
}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0:9443 and serves the /admit-* endpoints.
/// TLS certificates are loaded from the paths specified.
pub async fn run_webhook_server(
    router: Router,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], WEBHOOK_PORT));
    info!(port = WEBHOOK_PORT, "Webhook server listening with TLS");

    axum_server::bind_rustls(addr, config)
        .serve(router.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    Ok(())
}
