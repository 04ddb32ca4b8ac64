//! TeamRoleBinding Custom Resource Definition.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// TeamRoleBinding grants a TeamRole to a Team on a set of clusters.
///
/// The cluster scope is given either by an exact cluster name or by a label
/// selector over clusters, never both and never neither. The optional list
/// of target namespaces is immutable after creation.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "TeamRoleBinding",
    plural = "teamrolebindings",
    namespaced,
    printcolumn = r#"{"name":"TeamRole", "type":"string", "jsonPath":".spec.teamRoleRef"}"#,
    printcolumn = r#"{"name":"Team", "type":"string", "jsonPath":".spec.teamRef"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoleBindingSpec {
    /// Name of the TeamRole being granted.
    #[serde(default)]
    pub team_role_ref: String,

    /// Name of the Team the role is granted to.
    #[serde(default)]
    pub team_ref: String,

    /// Exact name of the target cluster. Mutually exclusive with
    /// clusterSelector.
    #[serde(default)]
    pub cluster_name: String,

    /// Label selector over target clusters. Mutually exclusive with
    /// clusterName.
    #[serde(default)]
    pub cluster_selector: LabelSelector,

    /// Namespaces the role applies to on the target clusters. Empty means
    /// cluster-wide. Treated as a set and immutable after creation.
    #[serde(default)]
    pub namespaces: Vec<String>,
}
