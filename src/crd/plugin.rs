//! Plugin Custom Resource Definition.
//!
//! A Plugin instantiates a PluginDefinition for a target cluster and supplies
//! values for the options the definition declares. Values are either typed
//! literals or references to a key in a Secret (secret indirection).

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Plugin is a custom resource deploying a PluginDefinition to a cluster.
///
/// Example:
/// ```yaml
/// apiVersion: greenhouse.sap/v1alpha1
/// kind: Plugin
/// metadata:
///   name: web-1
/// spec:
///   pluginDefinition: web
///   clusterName: prod-eu-1
///   optionValues:
///     - name: replicas
///       value: 3
///     - name: apiToken
///       valueFrom:
///         secret:
///           name: web-secrets
///           key: token
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "Plugin",
    plural = "plugins",
    status = "PluginStatus",
    namespaced,
    printcolumn = r#"{"name":"Definition", "type":"string", "jsonPath":".spec.pluginDefinition"}"#,
    printcolumn = r#"{"name":"Cluster", "type":"string", "jsonPath":".spec.clusterName"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct PluginSpec {
    /// Name of the PluginDefinition this Plugin instantiates.
    pub plugin_definition: String,

    /// Human-readable name shown in the UI. Defaulted from metadata.name
    /// when unset.
    #[serde(default)]
    pub display_name: String,

    /// Name of the Cluster the plugin is deployed to. Empty means the plugin
    /// runs in the central cluster only; immutable after creation.
    #[serde(default)]
    pub cluster_name: String,

    /// Values for the options declared by the PluginDefinition.
    #[serde(default)]
    pub option_values: Vec<OptionValue>,
}

/// A value for a single option declared by the PluginDefinition.
/// Exactly one of `value` and `valueFrom` must be set.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    /// Name of the option this value is for.
    pub name: String,

    /// Literal value, matching the option's declared type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    /// Value supplied by reference to a Secret key. Mandatory for options of
    /// type secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFromSource>,
}

/// Indirect value source.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueFromSource {
    /// Secret holding the value.
    #[serde(default)]
    pub secret: SecretReference,
}

/// Reference to a key within a Secret in the Plugin's namespace.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    /// Name of the Secret.
    #[serde(default)]
    pub name: String,

    /// Key within the Secret.
    #[serde(default)]
    pub key: String,
}

/// Observed state of a Plugin, maintained by the deployment reconciler.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginStatus {
    /// Status of the Helm release backing this plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_release_status: Option<String>,

    /// Deployed version of the plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
