//! Per-resource admission handler sets.
//!
//! Every resource kind supplies one [`AdmissionHandler`]: defaulting plus
//! create/update/delete validation. The dispatcher invokes default-then-
//! validate inside a single request/response cycle; handlers hold no state
//! across requests and must be safe for concurrent invocation.

mod cluster;
mod organization;
mod plugin;
mod plugin_definition;
mod secret;
mod team;
mod team_role;
mod team_role_binding;

pub use cluster::ClusterHandler;
pub use organization::OrganizationHandler;
pub use plugin::{PluginHandler, DEFAULT_CENTRAL_CLUSTER_PLUGINS};
pub use plugin_definition::PluginDefinitionHandler;
pub use secret::SecretHandler;
pub use team::TeamHandler;
pub use team_role::TeamRoleHandler;
pub use team_role_binding::TeamRoleBindingHandler;

use async_trait::async_trait;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult};

/// Handler set for one resource kind.
///
/// The default implementations make a kind admit everything: no defaulting,
/// no constraints. `validate_delete` exists for symmetry; no current kind
/// has a delete-time constraint.
#[async_trait]
pub trait AdmissionHandler: Send + Sync + 'static {
    /// Kind admitted by this handler; used for routing and error reporting.
    const KIND: &'static str;

    type Object: Resource<DynamicType = ()>
        + Clone
        + std::fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Mutate the candidate in place to fill in omitted values. Runs before
    /// validation on create and update; never rejects except on an
    /// unrecoverable lookup failure. Named apart from `Default::default` so
    /// handler construction stays unambiguous.
    async fn apply_defaults(
        &self,
        _store: &dyn ObjectStore,
        _obj: &mut Self::Object,
    ) -> Result<(), AdmissionError> {
        Ok(())
    }

    async fn validate_create(
        &self,
        _store: &dyn ObjectStore,
        _obj: &Self::Object,
    ) -> AdmissionResult {
        Ok(Vec::new())
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        _old: &Self::Object,
        _obj: &Self::Object,
    ) -> AdmissionResult {
        Ok(Vec::new())
    }

    async fn validate_delete(
        &self,
        _store: &dyn ObjectStore,
        _obj: &Self::Object,
    ) -> AdmissionResult {
        Ok(Vec::new())
    }
}
