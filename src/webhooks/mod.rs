//! Admission webhooks for the platform resources.
//!
//! Every kind goes through the same pipeline: decode, default, validate
//! against the operation, respond. Handlers carry the per-kind rules;
//! dispatch and the server are generic over them.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod immutability;
pub mod options;
pub mod references;
mod server;

pub use dispatch::dispatch;
pub use error::{AdmissionError, AdmissionResult, FieldError, Warnings};
pub use handlers::AdmissionHandler;
pub use server::{
    RegistryError, WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookRouter,
    build_router, run_webhook_server,
};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
