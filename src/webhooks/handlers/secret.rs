//! Admission handler for core Secrets carrying cluster kubeconfigs.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;

use crate::crd::SECRET_TYPE_KUBECONFIG;
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;

const KUBECONFIG_KEY: &str = "kubeconfig";

/// Handler set for Secrets. Only secrets of the kubeconfig type are
/// constrained; every other secret passes through untouched.
#[derive(Default)]
pub struct SecretHandler;

#[async_trait]
impl AdmissionHandler for SecretHandler {
    const KIND: &'static str = "Secret";
    type Object = Secret;

    async fn validate_create(&self, _store: &dyn ObjectStore, obj: &Secret) -> AdmissionResult {
        check_kubeconfig(obj)
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        _old: &Secret,
        obj: &Secret,
    ) -> AdmissionResult {
        check_kubeconfig(obj)
    }
}

fn check_kubeconfig(obj: &Secret) -> AdmissionResult {
    if obj.type_.as_deref() != Some(SECRET_TYPE_KUBECONFIG) {
        return Ok(Vec::new());
    }

    let has_data = obj
        .data
        .as_ref()
        .and_then(|data| data.get(KUBECONFIG_KEY))
        .is_some_and(|value| !value.0.is_empty());
    let has_string_data = obj
        .string_data
        .as_ref()
        .and_then(|data| data.get(KUBECONFIG_KEY))
        .is_some_and(|value| !value.is_empty());

    if has_data || has_string_data {
        Ok(Vec::new())
    } else {
        Err(AdmissionError::invalid(
            SecretHandler::KIND,
            obj.name_any(),
            vec![FieldError::required(
                format!("data.{KUBECONFIG_KEY}"),
                format!(
                    "secrets of type {SECRET_TYPE_KUBECONFIG} must contain a non-empty {KUBECONFIG_KEY} key"
                ),
            )],
        ))
    }
}
