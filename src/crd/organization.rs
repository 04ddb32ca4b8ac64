//! Organization Custom Resource Definition.
//!
//! An Organization is a tenant of the platform. It is cluster-scoped and
//! maps to a namespace holding the tenant's other resources.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Organization is a custom resource representing a tenant.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "Organization",
    plural = "organizations",
    printcolumn = r#"{"name":"DisplayName", "type":"string", "jsonPath":".spec.displayName"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSpec {
    /// Human-readable name shown in the UI. Defaulted from metadata.name
    /// when unset.
    #[serde(default)]
    pub display_name: String,

    /// Description of the organization.
    #[serde(default)]
    pub description: String,

    /// Identity provider group granted admin access to the organization.
    #[serde(default)]
    pub mapped_org_admin_id_p_group: String,
}
