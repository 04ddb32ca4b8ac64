//! TeamRole Custom Resource Definition.

use k8s_openapi::api::rbac::v1::PolicyRule;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// TeamRole declares a set of access-control rules that TeamRoleBindings
/// grant to a Team on one or more clusters.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "TeamRole",
    plural = "teamroles",
    namespaced,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoleSpec {
    /// Rules applied to the managed RBAC (Cluster)Role on target clusters.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}
