//! Admission handler for Teams.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::{Team, LABEL_PREFIX};
use crate::store::{ObjectStore, ReferenceKind};
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;

/// Greenhouse labels that are allowed without naming a PluginDefinition.
const NON_PLUGIN_LABELS: &[&str] = &["support-group"];

/// Handler set for the Team resource.
///
/// Labels under the `greenhouse.sap/` prefix are restricted: each must be an
/// allow-listed marker or name an existing PluginDefinition in the team's
/// namespace. Checked on both create and update.
#[derive(Default)]
pub struct TeamHandler;

impl TeamHandler {
    async fn validate_greenhouse_labels(
        &self,
        store: &dyn ObjectStore,
        obj: &Team,
    ) -> Result<(), AdmissionError> {
        let Some(labels) = &obj.metadata.labels else {
            return Ok(());
        };
        let namespace = obj.namespace().unwrap_or_default();
        for key in labels.keys() {
            let Some(suffix) = key.strip_prefix(LABEL_PREFIX) else {
                continue;
            };
            if NON_PLUGIN_LABELS.contains(&suffix) {
                continue;
            }
            match store
                .check_exists(ReferenceKind::PluginDefinition, &namespace, suffix)
                .await
            {
                Ok(()) => {}
                Err(err) if err.is_not_found() => {
                    return Err(AdmissionError::forbidden(
                        Self::KIND,
                        obj.name_any(),
                        FieldError::forbidden(
                            format!("metadata.labels[{key}]"),
                            "Only pluginDefinition names as greenhouse labels allowed.",
                        ),
                    ));
                }
                Err(err) => return Err(AdmissionError::internal(err)),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AdmissionHandler for TeamHandler {
    const KIND: &'static str = "Team";
    type Object = Team;

    async fn validate_create(&self, store: &dyn ObjectStore, obj: &Team) -> AdmissionResult {
        self.validate_greenhouse_labels(store, obj).await?;
        Ok(Vec::new())
    }

    async fn validate_update(
        &self,
        store: &dyn ObjectStore,
        _old: &Team,
        obj: &Team,
    ) -> AdmissionResult {
        self.validate_greenhouse_labels(store, obj).await?;
        Ok(Vec::new())
    }
}
