//! greenhouse-operator library crate
//!
//! Exports the platform CRD definitions, the object store abstraction, and
//! the admission webhook stack.

pub mod crd;
pub mod health;
pub mod store;
pub mod webhooks;

pub use health::HealthState;
pub use store::{KubeStore, MemoryStore, ObjectStore, ReferenceKind, StoreError};
pub use webhooks::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, build_router,
    run_webhook_server,
};
