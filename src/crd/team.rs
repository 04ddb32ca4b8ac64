//! Team Custom Resource Definition.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Team is a custom resource representing a group of users.
///
/// Labels under the `greenhouse.sap/` prefix are restricted: they must either
/// be on the platform's allow-list of markers (e.g. `support-group`) or name
/// an existing PluginDefinition in the team's namespace.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "Team",
    plural = "teams",
    namespaced,
    printcolumn = r#"{"name":"IDP Group", "type":"string", "jsonPath":".spec.mappedIdPGroup"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TeamSpec {
    /// Description of the team.
    #[serde(default)]
    pub description: String,

    /// Identity provider group the team members belong to.
    #[serde(default)]
    pub mapped_id_p_group: String,
}
