//! Admission handler for Organizations.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::Organization;
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;

/// Handler set for the cluster-scoped Organization resource.
#[derive(Default)]
pub struct OrganizationHandler;

#[async_trait]
impl AdmissionHandler for OrganizationHandler {
    const KIND: &'static str = "Organization";
    type Object = Organization;

    /// Derives a human-readable display name from the object name when none
    /// is set: dashes become spaces and surrounding whitespace is trimmed.
    async fn apply_defaults(
        &self,
        _store: &dyn ObjectStore,
        obj: &mut Organization,
    ) -> Result<(), AdmissionError> {
        if obj.spec.display_name.is_empty() {
            obj.spec.display_name = obj.name_any().replace('-', " ").trim().to_string();
        }
        Ok(())
    }

    async fn validate_create(
        &self,
        _store: &dyn ObjectStore,
        obj: &Organization,
    ) -> AdmissionResult {
        check_admin_group(obj)
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        _old: &Organization,
        obj: &Organization,
    ) -> AdmissionResult {
        check_admin_group(obj)
    }
}

fn check_admin_group(obj: &Organization) -> AdmissionResult {
    if obj.spec.mapped_org_admin_id_p_group.is_empty() {
        return Err(AdmissionError::invalid(
            OrganizationHandler::KIND,
            obj.name_any(),
            vec![FieldError::required(
                "spec.mappedOrgAdminIdPGroup",
                "mapped organization admin identity provider group is empty",
            )],
        ));
    }
    Ok(Vec::new())
}
