//! Admission handler for Plugins.

use async_trait::async_trait;
use kube::ResourceExt;

use crate::crd::{Plugin, PluginDefinition, LABEL_CLUSTER, LABEL_PLUGIN_DEFINITION};
use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, AdmissionResult};
use crate::webhooks::handlers::AdmissionHandler;
use crate::webhooks::immutability::check_immutable;
use crate::webhooks::options::merge_option_values;
use crate::webhooks::references::{check_cluster_scope_for_plugin, check_plugin_option_values};

/// PluginDefinitions allowed to run in the central cluster without a
/// spec.clusterName.
// TODO: make this configurable per PluginDefinition instead of a deploy-time list.
pub const DEFAULT_CENTRAL_CLUSTER_PLUGINS: &[&str] = &[
    "alerts",
    "doop",
    "service-proxy",
    "teams2slack",
    "kubeconfig-generator",
];

/// Handler set for the Plugin resource.
pub struct PluginHandler {
    /// Definition names exempt from the cluster-scoping requirement.
    /// Fixed at construction so the exemption list is testable and
    /// overridable per deployment.
    central_cluster_exemptions: Vec<String>,
}

impl PluginHandler {
    pub fn new(central_cluster_exemptions: Vec<String>) -> Self {
        Self {
            central_cluster_exemptions,
        }
    }

    async fn load_definition(
        &self,
        store: &dyn ObjectStore,
        plugin: &Plugin,
    ) -> Result<PluginDefinition, AdmissionError> {
        let namespace = plugin.namespace().unwrap_or_default();
        // A missing definition is surfaced as NotFound, untranslated.
        store
            .plugin_definition(&namespace, &plugin.spec.plugin_definition)
            .await
            .map_err(AdmissionError::from)
    }

    async fn validate(
        &self,
        store: &dyn ObjectStore,
        plugin: &Plugin,
    ) -> Result<(), AdmissionError> {
        let definition = self.load_definition(store, plugin).await?;

        let errs = check_plugin_option_values(plugin, &definition);
        if !errs.is_empty() {
            return Err(AdmissionError::invalid(
                Self::KIND,
                plugin.name_any(),
                errs,
            ));
        }

        check_cluster_scope_for_plugin(store, plugin, &definition, &self.central_cluster_exemptions)
            .await
    }
}

impl Default for PluginHandler {
    fn default() -> Self {
        Self::new(
            DEFAULT_CENTRAL_CLUSTER_PLUGINS
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

#[async_trait]
impl AdmissionHandler for PluginHandler {
    const KIND: &'static str = "Plugin";
    type Object = Plugin;

    async fn apply_defaults(
        &self,
        store: &dyn ObjectStore,
        obj: &mut Plugin,
    ) -> Result<(), AdmissionError> {
        // Labels identifying Plugins by definition and cluster, e.g. when a
        // PluginDefinition changes.
        let definition_name = obj.spec.plugin_definition.clone();
        let cluster_name = obj.spec.cluster_name.clone();
        let labels = obj.labels_mut();
        labels.insert(LABEL_PLUGIN_DEFINITION.to_string(), definition_name);
        labels.insert(LABEL_CLUSTER.to_string(), cluster_name);

        // Default the display name to a normalized version of metadata.name.
        if obj.spec.display_name.is_empty() {
            obj.spec.display_name = obj.name_any().replace('-', " ").trim().to_string();
        }

        // Resolve option values against the definition's defaults.
        let definition = self.load_definition(store, obj).await?;
        obj.spec.option_values =
            merge_option_values(&definition.spec.options, &obj.spec.option_values);
        Ok(())
    }

    async fn validate_create(&self, store: &dyn ObjectStore, obj: &Plugin) -> AdmissionResult {
        self.validate(store, obj).await?;
        Ok(Vec::new())
    }

    async fn validate_update(
        &self,
        store: &dyn ObjectStore,
        old: &Plugin,
        obj: &Plugin,
    ) -> AdmissionResult {
        self.validate(store, obj).await?;
        if let Some(err) =
            check_immutable(&old.spec.cluster_name, &obj.spec.cluster_name, "spec.clusterName")
        {
            return Err(AdmissionError::forbidden(Self::KIND, obj.name_any(), err));
        }
        Ok(Vec::new())
    }
}
