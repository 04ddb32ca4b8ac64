// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Admission tests exercising the full dispatch pipeline.
//!
//! These tests feed AdmissionReview payloads through the dispatcher exactly
//! as the API server would, WITHOUT requiring a live Kubernetes cluster.
//! Referenced objects come from an in-memory store.
//!
//! ```bash
//! # Run all admission tests
//! cargo test --test admission
//!
//! # Run specific test
//! cargo test --test admission create_plugin_with_defaults
//! ```
//!
//! ## Test Categories
//!
//! - **Dispatch tests**: Operation routing, decoding failures, patches,
//!   warnings and the internal-error path
//! - **Per-kind tests**: End-to-end create/update decisions for Plugins,
//!   PluginDefinitions, Teams and TeamRoleBindings

mod fixtures;

mod dispatch_tests;
mod plugin_tests;
mod team_role_binding_tests;
mod team_tests;

pub use fixtures::*;
