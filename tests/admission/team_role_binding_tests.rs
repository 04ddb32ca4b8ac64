//! End-to-end admission decisions for TeamRoleBindings.

use greenhouse_operator::crd::TeamRoleBinding;
use greenhouse_operator::store::{MemoryStore, ReferenceKind};
use greenhouse_operator::webhooks::dispatch;
use greenhouse_operator::webhooks::handlers::TeamRoleBindingHandler;
use serde_json::{Value, json};

use crate::fixtures::{build_review, verdict};

fn binding_object(cluster_name: &str, namespaces: Value) -> Value {
    json!({
        "apiVersion": "greenhouse.sap/v1alpha1",
        "kind": "TeamRoleBinding",
        "metadata": {"name": "observability-admin", "namespace": "test-org"},
        "spec": {
            "teamRoleRef": "cluster-admin",
            "teamRef": "observability",
            "clusterName": cluster_name,
            "namespaces": namespaces
        }
    })
}

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(ReferenceKind::TeamRole, "test-org", "cluster-admin");
    store.insert(ReferenceKind::Team, "test-org", "observability");
    store
}

#[tokio::test]
async fn create_with_existing_references_is_accepted() {
    let object = binding_object("prod-eu-1", json!(["monitoring"]));
    let review = build_review::<TeamRoleBinding>("TeamRoleBinding", "CREATE", Some(object), None);

    let (_, review) = dispatch(&TeamRoleBindingHandler, &store(), review).await;
    assert!(verdict(&review).allowed);
}

#[tokio::test]
async fn create_with_a_missing_team_role_is_invalid() {
    let mut object = binding_object("prod-eu-1", json!([]));
    object["spec"]["teamRoleRef"] = json!("ghost");
    let review = build_review::<TeamRoleBinding>("TeamRoleBinding", "CREATE", Some(object), None);

    let (_, review) = dispatch(&TeamRoleBindingHandler, &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert_eq!(causes[0].field, "spec.teamRoleRef");
    assert!(causes[0].message.contains("does not exist"));
}

#[tokio::test]
async fn create_without_any_cluster_scope_is_invalid() {
    let object = binding_object("", json!([]));
    let review = build_review::<TeamRoleBinding>("TeamRoleBinding", "CREATE", Some(object), None);

    let (_, review) = dispatch(&TeamRoleBindingHandler, &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    assert!(response
        .result
        .message
        .contains("must specify either spec.clusterName or spec.clusterSelector"));
}

#[tokio::test]
async fn update_cannot_change_namespace_membership() {
    let old = binding_object("prod-eu-1", json!(["monitoring", "logging"]));
    let new = binding_object("prod-eu-1", json!(["monitoring"]));
    let review =
        build_review::<TeamRoleBinding>("TeamRoleBinding", "UPDATE", Some(new), Some(old));

    let (_, review) = dispatch(&TeamRoleBindingHandler, &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 403);
    assert!(response.result.message.contains("spec.namespaces"));
}

#[tokio::test]
async fn update_tolerates_reordered_namespaces() {
    let old = binding_object("prod-eu-1", json!(["monitoring", "logging"]));
    let new = binding_object("prod-eu-1", json!(["logging", "monitoring"]));
    let review =
        build_review::<TeamRoleBinding>("TeamRoleBinding", "UPDATE", Some(new), Some(old));

    let (_, review) = dispatch(&TeamRoleBindingHandler, &store(), review).await;
    assert!(verdict(&review).allowed);
}
