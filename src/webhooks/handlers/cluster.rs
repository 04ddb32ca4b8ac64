//! Admission handler for Clusters.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::Cluster;
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult};
use crate::webhooks::handlers::AdmissionHandler;
use crate::webhooks::immutability::check_immutable;

/// Handler set for the Cluster resource.
#[derive(Default)]
pub struct ClusterHandler;

#[async_trait]
impl AdmissionHandler for ClusterHandler {
    const KIND: &'static str = "Cluster";
    type Object = Cluster;

    /// The access mode decides how the platform reaches the cluster and is
    /// fixed at registration time.
    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        old: &Cluster,
        obj: &Cluster,
    ) -> AdmissionResult {
        if let Some(err) =
            check_immutable(&old.spec.access_mode, &obj.spec.access_mode, "spec.accessMode")
        {
            return Err(AdmissionError::forbidden(Self::KIND, obj.name_any(), err));
        }
        Ok(Vec::new())
    }
}
