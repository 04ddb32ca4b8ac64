//! End-to-end admission decisions for Plugins.

use greenhouse_operator::crd::{OptionValue, Plugin, PluginOption, PluginOptionType};
use greenhouse_operator::store::{MemoryStore, ReferenceKind};
use greenhouse_operator::webhooks::dispatch;
use greenhouse_operator::webhooks::handlers::PluginHandler;
use serde_json::{Value, json};

use crate::fixtures::{build_review, to_object, verdict, web_definition, web_plugin};

fn store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_plugin_definition("test-org", web_definition());
    store.insert(ReferenceKind::Cluster, "test-org", "prod-eu-1");
    store
}

#[tokio::test]
async fn create_plugin_with_defaults() {
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&web_plugin())), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(response.allowed, "{:?}", response.result.message);

    let ops: Value = serde_json::from_slice(response.patch.as_ref().unwrap()).unwrap();
    let rendered = ops.to_string();
    // Ownership labels and the definition's logLevel default land via patch.
    assert!(rendered.contains("plugindefinition"), "{rendered}");
    assert!(rendered.contains("logLevel"), "{rendered}");
}

#[tokio::test]
async fn create_against_a_missing_definition_is_not_found() {
    let mut plugin = web_plugin();
    plugin.spec.plugin_definition = "ghost".to_string();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 404);
    assert_eq!(response.result.reason, "NotFound");
}

#[tokio::test]
async fn create_without_a_required_option_is_invalid() {
    let mut plugin = web_plugin();
    plugin.spec.option_values.clear();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert_eq!(causes.len(), 1);
    assert_eq!(causes[0].field, "spec.optionValues");
    assert!(causes[0].message.contains("'replicas' is required"));
}

#[tokio::test]
async fn secret_options_must_use_value_from() {
    let mut definition = web_definition();
    definition.spec.options.push(PluginOption {
        name: "apiToken".to_string(),
        description: String::new(),
        option_type: PluginOptionType::Secret,
        required: false,
        default: None,
    });
    let mut store = store();
    store.insert_plugin_definition("test-org", definition);

    let mut plugin = web_plugin();
    plugin.spec.option_values.push(OptionValue {
        name: "apiToken".to_string(),
        value: Some(json!("literal-token")),
        value_from: None,
    });
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store, review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert!(causes.iter().any(|c| c.field.ends_with(".value")
        && c.message.contains("must use valueFrom to reference a secret")));
}

#[tokio::test]
async fn option_values_must_match_their_declared_type() {
    let mut plugin = web_plugin();
    plugin.spec.option_values = vec![OptionValue {
        name: "replicas".to_string(),
        value: Some(json!("three")),
        value_from: None,
    }];
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
}

#[tokio::test]
async fn create_against_a_missing_cluster_is_invalid() {
    let mut plugin = web_plugin();
    plugin.spec.cluster_name = "ghost-cluster".to_string();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 422);
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert_eq!(causes[0].field, "spec.clusterName");
    assert!(causes[0].message.contains("\"ghost-cluster\" not found"));
}

#[tokio::test]
async fn cluster_name_is_immutable_on_update() {
    let old = web_plugin();
    let mut new = web_plugin();
    new.spec.cluster_name = "prod-us-1".to_string();
    let mut store = store();
    store.insert(ReferenceKind::Cluster, "test-org", "prod-us-1");

    let review = build_review::<Plugin>(
        "Plugin",
        "UPDATE",
        Some(to_object(&new)),
        Some(to_object(&old)),
    );

    let (_, review) = dispatch(&PluginHandler::default(), &store, review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    assert_eq!(response.result.code, 403);
    assert_eq!(response.result.reason, "Forbidden");
    assert!(response.result.message.contains("spec.clusterName"));
}

#[tokio::test]
async fn exempt_definitions_may_omit_the_cluster_name() {
    let mut definition = web_definition();
    definition.metadata.name = Some("alerts".to_string());
    let mut store = store();
    store.insert_plugin_definition("test-org", definition);

    let mut plugin = web_plugin();
    plugin.spec.plugin_definition = "alerts".to_string();
    plugin.spec.cluster_name = String::new();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store, review).await;
    let response = verdict(&review);
    assert!(response.allowed, "{:?}", response.result.message);
}

#[tokio::test]
async fn non_exempt_definitions_must_name_a_cluster() {
    let mut plugin = web_plugin();
    plugin.spec.cluster_name = String::new();
    let review = build_review::<Plugin>("Plugin", "CREATE", Some(to_object(&plugin)), None);

    let (_, review) = dispatch(&PluginHandler::default(), &store(), review).await;
    let response = verdict(&review);
    assert!(!response.allowed);
    let causes = response.result.details.as_ref().unwrap().causes.clone();
    assert_eq!(causes[0].field, "spec.clusterName");
    assert!(causes[0].message.contains("the clusterName must be set"));
}
