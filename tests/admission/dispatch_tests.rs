//! Dispatch pipeline tests: decoding, operation routing, patches, warnings
//! and failure handling.

use async_trait::async_trait;
use axum::http::StatusCode;
use greenhouse_operator::crd::{Cluster, Plugin};
use greenhouse_operator::store::{MemoryStore, ObjectStore, ReferenceKind};
use greenhouse_operator::webhooks::handlers::{AdmissionHandler, PluginHandler};
use greenhouse_operator::webhooks::{AdmissionResult, AdmissionReview, dispatch};
use serde_json::{Value, json};

use crate::fixtures::{build_review, to_object, verdict, web_definition, web_plugin};

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_plugin_definition("test-org", web_definition());
    store.insert(ReferenceKind::Cluster, "test-org", "prod-eu-1");
    store
}

#[tokio::test]
async fn review_without_request_is_a_bad_request() {
    let review: AdmissionReview<Plugin> = serde_json::from_value(json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": null,
        "response": null
    }))
    .unwrap();

    let (status, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!verdict(&review).allowed);
}

#[tokio::test]
async fn create_without_an_object_is_denied_as_malformed() {
    let review = build_review::<Plugin>("Plugin", "CREATE", None, None);

    let (status, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    assert_eq!(status, StatusCode::OK);
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 400);
    assert_eq!(response.result.reason, "BadRequest");
}

#[tokio::test]
async fn delete_validates_the_stored_object() {
    let review =
        build_review::<Plugin>("Plugin", "DELETE", None, Some(to_object(&web_plugin())));

    let (status, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    assert_eq!(status, StatusCode::OK);
    assert!(verdict(&review).allowed);
}

#[tokio::test]
async fn connect_is_always_allowed() {
    let review =
        build_review::<Plugin>("Plugin", "CONNECT", Some(to_object(&web_plugin())), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    assert!(verdict(&review).allowed);
}

#[tokio::test]
async fn defaulting_produces_a_patch() {
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&web_plugin())), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(response.allowed);

    let patch = response.patch.as_ref().expect("defaulting changed the object");
    let ops: Value = serde_json::from_slice(patch).unwrap();
    let rendered = ops.to_string();
    assert!(rendered.contains("/metadata/labels"), "{rendered}");
    assert!(rendered.contains("displayName"), "{rendered}");
}

#[tokio::test]
async fn no_patch_when_the_object_is_already_defaulted() {
    let mut plugin = web_plugin();
    // Same review twice: take the first patch, apply it, resubmit.
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);
    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let patch: json_patch::Patch =
        serde_json::from_slice(verdict(&review).patch.as_ref().unwrap()).unwrap();

    let mut value = serde_json::to_value(&plugin).unwrap();
    json_patch::patch(&mut value, &patch).unwrap();
    plugin = serde_json::from_value(value).unwrap();

    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);
    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(response.allowed);
    assert!(response.patch.is_none());
}

#[tokio::test]
async fn store_outage_surfaces_as_internal_error() {
    let mut store = store();
    store.fail_lookups();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&web_plugin())), None);

    let (status, review) = dispatch(&PluginHandler::default(), &store, review).await;
    assert_eq!(status, StatusCode::OK);
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 500);
    assert_eq!(response.result.reason, "InternalError");
}

/// Handler emitting a warning on every create; exercises the warning path
/// without a production handler that warns.
struct NoisyClusterHandler;

#[async_trait]
impl AdmissionHandler for NoisyClusterHandler {
    const KIND: &'static str = "Cluster";
    type Object = Cluster;

    async fn validate_create(&self, _store: &dyn ObjectStore, _obj: &Cluster) -> AdmissionResult {
        Ok(vec!["headscale access is in beta".to_string()])
    }
}

#[tokio::test]
async fn warnings_travel_back_on_allowed_requests() {
    let cluster = json!({
        "apiVersion": "greenhouse.sap/v1alpha1",
        "kind": "Cluster",
        "metadata": {"name": "prod-eu-1", "namespace": "test-org"},
        "spec": {"accessMode": "headscale"}
    });
    let review = build_review::<Cluster>("Cluster", "CREATE", Some(cluster), None);

    let (_, review) = dispatch(&NoisyClusterHandler, &MemoryStore::new(), review).await;
    let response = verdict(&review);
    assert!(response.allowed);
    assert_eq!(
        response.warnings,
        Some(vec!["headscale access is in beta".to_string()])
    );
}
