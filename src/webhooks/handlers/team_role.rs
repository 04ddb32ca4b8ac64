//! Admission handler for TeamRoles.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::TeamRole;
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;

/// Handler set for the TeamRole resource.
#[derive(Default)]
pub struct TeamRoleHandler;

#[async_trait]
impl AdmissionHandler for TeamRoleHandler {
    const KIND: &'static str = "TeamRole";
    type Object = TeamRole;

    async fn validate_create(&self, _store: &dyn ObjectStore, obj: &TeamRole) -> AdmissionResult {
        check_rules(obj)
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        _old: &TeamRole,
        obj: &TeamRole,
    ) -> AdmissionResult {
        check_rules(obj)
    }
}

fn check_rules(obj: &TeamRole) -> AdmissionResult {
    if obj.spec.rules.is_empty() {
        return Err(AdmissionError::invalid(
            TeamRoleHandler::KIND,
            obj.name_any(),
            vec![FieldError::required(
                "spec.rules",
                "a TeamRole must define at least one rule",
            )],
        ));
    }
    Ok(Vec::new())
}
