//! PluginDefinition Custom Resource Definition.
//!
//! A PluginDefinition declares a reusable deployable unit: a typed option
//! schema plus a deployment mechanism (Helm chart, frontend application or
//! both). Plugins instantiate a definition and are validated against its
//! option schema on admission.

use std::fmt;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// PluginDefinition is a custom resource declaring a deployable unit and the
/// configuration options its Plugins must provide.
///
/// Example:
/// ```yaml
/// apiVersion: greenhouse.sap/v1alpha1
/// kind: PluginDefinition
/// metadata:
///   name: web
/// spec:
///   description: Example web workload
///   helmChart:
///     name: web
///     repository: oci://registry.example.com/charts
///     version: 1.0.0
///   options:
///     - name: replicas
///       type: int
///       required: true
/// ```
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "greenhouse.sap",
    version = "v1alpha1",
    kind = "PluginDefinition",
    plural = "plugindefinitions",
    namespaced,
    printcolumn = r#"{"name":"Version", "type":"string", "jsonPath":".spec.version"}"#,
    printcolumn = r#"{"name":"Description", "type":"string", "jsonPath":".spec.description"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct PluginDefinitionSpec {
    /// Human-readable description of the plugin.
    #[serde(default)]
    pub description: String,

    /// Version of the plugin definition.
    #[serde(default)]
    pub version: String,

    /// Configuration options declared by this definition. Option names must
    /// be unique and defaults must match their declared type.
    #[serde(default)]
    pub options: Vec<PluginOption>,

    /// Helm chart deploying the plugin's backend.
    /// At least one of helmChart and uiApplication must be set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helm_chart: Option<HelmChartReference>,

    /// Frontend application exposed for the plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_application: Option<UiApplicationReference>,
}

/// A named, typed configuration slot declared by a PluginDefinition and
/// filled by a Plugin's optionValues.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginOption {
    /// Name of the option, unique within the definition.
    pub name: String,

    /// Description of the option shown to operators.
    #[serde(default)]
    pub description: String,

    /// Declared type of the option value.
    #[serde(rename = "type")]
    pub option_type: PluginOptionType,

    /// Whether every Plugin must provide a value for this option.
    #[serde(default)]
    pub required: bool,

    /// Default applied when a Plugin does not set the option.
    /// Must match the declared type; secret options may not carry a default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// Type of a PluginOption value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PluginOptionType {
    /// A plain string.
    String,
    /// A value supplied via secret indirection, never as a literal.
    Secret,
    /// A boolean.
    Bool,
    /// An integer.
    Int,
    /// A list of arbitrary values.
    List,
    /// A mapping of string keys to arbitrary values.
    Map,
}

impl fmt::Display for PluginOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PluginOptionType::String => "string",
            PluginOptionType::Secret => "secret",
            PluginOptionType::Bool => "bool",
            PluginOptionType::Int => "int",
            PluginOptionType::List => "list",
            PluginOptionType::Map => "map",
        };
        f.write_str(s)
    }
}

/// Reference to a Helm chart in a registry.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartReference {
    /// Name of the chart.
    pub name: String,

    /// Repository the chart is pulled from.
    pub repository: String,

    /// Chart version.
    pub version: String,
}

/// Reference to a frontend application served for the plugin.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiApplicationReference {
    /// Name of the frontend application.
    pub name: String,

    /// Version of the frontend application.
    pub version: String,

    /// URL the application assets are served from. Defaults to the
    /// platform-wide asset server when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
