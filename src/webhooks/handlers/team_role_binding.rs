//! Admission handler for TeamRoleBindings.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::TeamRoleBinding;
use crate::store::{ObjectStore, ReferenceKind};
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;
use crate::webhooks::immutability::check_immutable_set;
use crate::webhooks::references::{check_cluster_name_xor_selector, check_reference_exists};

/// Handler set for the TeamRoleBinding resource.
///
/// Create rejects structural invalidity (missing refs, bad cluster scope) as
/// Invalid; update rejects policy violations on an otherwise-valid object
/// (scope rule broken, namespaces changed) as Forbidden. The asymmetry is
/// intentional.
#[derive(Default)]
pub struct TeamRoleBindingHandler;

#[async_trait]
impl AdmissionHandler for TeamRoleBindingHandler {
    const KIND: &'static str = "TeamRoleBinding";
    type Object = TeamRoleBinding;

    async fn validate_create(
        &self,
        store: &dyn ObjectStore,
        obj: &TeamRoleBinding,
    ) -> AdmissionResult {
        let namespace = obj.namespace().unwrap_or_default();

        if let Some(err) = check_reference_exists(
            store,
            ReferenceKind::TeamRole,
            &namespace,
            &obj.spec.team_role_ref,
            "spec.teamRoleRef",
        )
        .await?
        {
            return Err(AdmissionError::invalid(Self::KIND, obj.name_any(), vec![err]));
        }

        if let Some(err) = check_reference_exists(
            store,
            ReferenceKind::Team,
            &namespace,
            &obj.spec.team_ref,
            "spec.teamRef",
        )
        .await?
        {
            return Err(AdmissionError::invalid(Self::KIND, obj.name_any(), vec![err]));
        }

        if let Err(err) = check_cluster_name_xor_selector(obj) {
            return Err(AdmissionError::invalid(Self::KIND, obj.name_any(), vec![err]));
        }
        Ok(Vec::new())
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        old: &TeamRoleBinding,
        obj: &TeamRoleBinding,
    ) -> AdmissionResult {
        if check_cluster_name_xor_selector(obj).is_err() {
            return Err(AdmissionError::forbidden(
                Self::KIND,
                obj.name_any(),
                FieldError::forbidden(
                    "spec",
                    "must contain either spec.clusterName or spec.clusterSelector",
                ),
            ));
        }
        if let Some(err) =
            check_immutable_set(&old.spec.namespaces, &obj.spec.namespaces, "spec.namespaces")
        {
            return Err(AdmissionError::forbidden(Self::KIND, obj.name_any(), err));
        }
        Ok(Vec::new())
    }
}
