//! Builders for AdmissionReview payloads and referenced objects.
//!
//! Reviews are assembled as raw JSON the way the API server sends them, then
//! deserialized into the typed review the endpoints accept. Keeping the wire
//! shape explicit here catches serde renames drifting from the wire format.

use greenhouse_operator::crd::{
    HelmChartReference, OptionValue, Plugin, PluginDefinition, PluginDefinitionSpec, PluginOption,
    PluginOptionType, PluginSpec,
};
use greenhouse_operator::webhooks::{AdmissionResponse, AdmissionReview};
use kube::api::ObjectMeta;
use kube::core::DynamicObject;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Build a typed AdmissionReview for the given operation.
///
/// `object` carries the candidate (CREATE/UPDATE) and `old_object` the stored
/// object (UPDATE/DELETE), serialized the way the API server embeds them.
pub fn build_review<T: kube::Resource + DeserializeOwned>(
    kind: &str,
    operation: &str,
    object: Option<Value>,
    old_object: Option<Value>,
) -> AdmissionReview<T> {
    let plural = format!("{}s", kind.to_lowercase());
    let value = json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {"group": "greenhouse.sap", "version": "v1alpha1", "kind": kind},
            "resource": {"group": "greenhouse.sap", "version": "v1alpha1", "resource": plural},
            "operation": operation,
            "name": "test",
            "namespace": "test-org",
            "userInfo": {},
            "object": object,
            "oldObject": old_object,
            "dryRun": false
        }
    });
    serde_json::from_value(value).expect("review deserializes")
}

/// Serialize an object into the review's embedded form.
pub fn to_object<T: Serialize>(obj: &T) -> Value {
    serde_json::to_value(obj).expect("object serializes")
}

/// Extract the response from a dispatched review.
pub fn verdict(review: &AdmissionReview<DynamicObject>) -> &AdmissionResponse {
    review.response.as_ref().expect("response populated")
}

/// A PluginDefinition with one required int option and an optional string
/// option carrying a default.
pub fn web_definition() -> PluginDefinition {
    PluginDefinition {
        metadata: ObjectMeta {
            name: Some("web".to_string()),
            namespace: Some("test-org".to_string()),
            ..Default::default()
        },
        spec: PluginDefinitionSpec {
            description: "Example web workload".to_string(),
            version: "1.0.0".to_string(),
            options: vec![
                PluginOption {
                    name: "replicas".to_string(),
                    description: String::new(),
                    option_type: PluginOptionType::Int,
                    required: true,
                    default: None,
                },
                PluginOption {
                    name: "logLevel".to_string(),
                    description: String::new(),
                    option_type: PluginOptionType::String,
                    required: false,
                    default: Some(json!("info")),
                },
            ],
            helm_chart: Some(HelmChartReference {
                name: "web".to_string(),
                repository: "oci://registry.example.com/charts".to_string(),
                version: "1.0.0".to_string(),
            }),
            ui_application: None,
        },
    }
}

/// A Plugin instantiating [`web_definition`] on a named cluster.
pub fn web_plugin() -> Plugin {
    Plugin {
        metadata: ObjectMeta {
            name: Some("web-1".to_string()),
            namespace: Some("test-org".to_string()),
            ..Default::default()
        },
        spec: PluginSpec {
            plugin_definition: "web".to_string(),
            display_name: String::new(),
            cluster_name: "prod-eu-1".to_string(),
            option_values: vec![OptionValue {
                name: "replicas".to_string(),
                value: Some(json!(3)),
                value_from: None,
            }],
        },
        status: None,
    }
}
