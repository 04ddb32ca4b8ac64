//! End-to-end admission decisions for Teams.

use greenhouse_operator::crd::Team;
use greenhouse_operator::store::{MemoryStore, ReferenceKind};
use greenhouse_operator::webhooks::dispatch;
use greenhouse_operator::webhooks::handlers::TeamHandler;
use serde_json::{Value, json};

use crate::fixtures::{build_review, verdict};

fn team_object(labels: Value) -> Value {
    json!({
        "apiVersion": "greenhouse.sap/v1alpha1",
        "kind": "Team",
        "metadata": {
            "name": "observability",
            "namespace": "test-org",
            "labels": labels
        },
        "spec": {
            "description": "Observability team",
            "mappedIdPGroup": "idp:observability"
        }
    })
}

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(ReferenceKind::PluginDefinition, "test-org", "alerts");
    store
}

#[tokio::test]
async fn plain_labels_pass_through() {
    let object = team_object(json!({"env": "prod"}));
    let review = build_review::<Team>("Team", "CREATE", Some(object), None);

    let (_, review) = dispatch(&TeamHandler, &store(), review).await;
    assert!(verdict(&review).allowed);
}

#[tokio::test]
async fn greenhouse_labels_must_name_a_definition() {
    let object = team_object(json!({"greenhouse.sap/ghost": "true"}));
    let review = build_review::<Team>("Team", "CREATE", Some(object), None);

    let (_, review) = dispatch(&TeamHandler, &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 403);
    assert!(response
        .result
        .message
        .contains("Only pluginDefinition names as greenhouse labels allowed."));
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert_eq!(causes[0].field, "metadata.labels[greenhouse.sap/ghost]");
}

#[tokio::test]
async fn known_definition_labels_are_accepted_on_update() {
    let old = team_object(json!({}));
    let new = team_object(json!({
        "greenhouse.sap/alerts": "true",
        "greenhouse.sap/support-group": "true"
    }));
    let review = build_review::<Team>("Team", "UPDATE", Some(new), Some(old));

    let (_, review) = dispatch(&TeamHandler, &store(), review).await;
    assert!(verdict(&review).allowed);
}
