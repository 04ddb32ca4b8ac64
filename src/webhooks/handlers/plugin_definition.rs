//! Admission handler for PluginDefinitions.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::PluginDefinition;
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult, FieldError};
use crate::webhooks::handlers::AdmissionHandler;
use crate::webhooks::options::validate_definition_options;

/// Handler set for the PluginDefinition resource.
///
/// Reports the first violation found rather than aggregating. This matches
/// the behavior the platform has always had for definitions and differs
/// deliberately from the Plugin validator.
#[derive(Default)]
pub struct PluginDefinitionHandler;

impl PluginDefinitionHandler {
    fn validate(&self, obj: &PluginDefinition) -> Result<(), AdmissionError> {
        if obj.spec.helm_chart.is_none() && obj.spec.ui_application.is_none() {
            return Err(AdmissionError::invalid(
                Self::KIND,
                obj.name_any(),
                vec![FieldError::required(
                    "spec.helmChart",
                    "A PluginDefinition without both spec.helmChart and spec.uiApplication is invalid.",
                )],
            ));
        }
        validate_definition_options(&obj.spec.options)
            .map_err(|err| AdmissionError::invalid(Self::KIND, obj.name_any(), vec![err]))
    }
}

#[async_trait]
impl AdmissionHandler for PluginDefinitionHandler {
    const KIND: &'static str = "PluginDefinition";
    type Object = PluginDefinition;

    async fn validate_create(
        &self,
        _store: &dyn ObjectStore,
        obj: &PluginDefinition,
    ) -> AdmissionResult {
        self.validate(obj)?;
        Ok(Vec::new())
    }

    async fn validate_update(
        &self,
        _store: &dyn ObjectStore,
        _old: &PluginDefinition,
        obj: &PluginDefinition,
    ) -> AdmissionResult {
        self.validate(obj)?;
        Ok(Vec::new())
    }
}
