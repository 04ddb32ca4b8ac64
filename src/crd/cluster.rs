//! Cluster Custom Resource Definition.
//!
//! A Cluster represents a managed Kubernetes cluster onboarded to the
//! platform. Plugins and TeamRoleBindings reference clusters by name.

use std::fmt;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cluster is a custom resource representing a managed Kubernetes cluster.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "Cluster",
    plural = "clusters",
    status = "ClusterStatus",
    namespaced,
    printcolumn = r#"{"name":"AccessMode", "type":"string", "jsonPath":".spec.accessMode"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// How the platform reaches the cluster's API server.
    /// Immutable after creation.
    pub access_mode: ClusterAccessMode,
}

/// Access mode for a managed cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClusterAccessMode {
    /// Direct access via a kubeconfig provided at onboarding.
    #[default]
    Direct,
    /// Access through the headscale-based VPN mesh.
    Headscale,
}

impl fmt::Display for ClusterAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterAccessMode::Direct => f.write_str("direct"),
            ClusterAccessMode::Headscale => f.write_str("headscale"),
        }
    }
}

/// Observed state of a Cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Kubernetes version reported by the cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
}
