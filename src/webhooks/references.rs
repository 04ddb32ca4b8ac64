//! Referential validation across configuration objects.
//!
//! All checks are read-only point lookups against the [`ObjectStore`] at
//! decision time. Races between lookups are accepted: admission validates
//! against observed state, not state at eventual persistence time.

use crate::crd::{Plugin, PluginDefinition, PluginOptionType, TeamRoleBinding, CENTRAL_NAMESPACE};
use crate::store::{ObjectStore, ReferenceKind};
use crate::webhooks::error::{AdmissionError, FieldError};
use crate::webhooks::options;

use kube::ResourceExt;

/// Validate a plugin's option values against its definition's option schema.
///
/// For every declared option, every matching entry is checked independently
/// (no dedup, no last-wins). Errors accumulate; the caller wraps a non-empty
/// result in a single aggregate Invalid rejection so every violation is
/// visible in one response.
pub fn check_plugin_option_values(
    plugin: &Plugin,
    definition: &PluginDefinition,
) -> Vec<FieldError> {
    let mut errs = Vec::new();
    for option in &definition.spec.options {
        let mut is_set = false;
        for (idx, val) in plugin.spec.option_values.iter().enumerate() {
            if val.name != option.name {
                continue;
            }
            is_set = true;
            let path = format!("spec.optionValues[{idx}]");

            // Value and valueFrom are mutually exclusive, but one must be provided.
            if val.value.is_some() == val.value_from.is_some() {
                errs.push(FieldError::required(
                    &path,
                    format!("must provide either value or valueFrom for value {}", val.name),
                ));
                continue;
            }

            if option.option_type == PluginOptionType::Secret {
                if val.value.is_some() {
                    errs.push(FieldError::type_invalid(
                        format!("{path}.value"),
                        format!(
                            "optionValue {} of type secret must use valueFrom to reference a secret",
                            val.name
                        ),
                    ));
                    continue;
                }
                if let Some(value_from) = &val.value_from {
                    if value_from.secret.name.is_empty() {
                        errs.push(FieldError::required(
                            format!("{path}.valueFrom.name"),
                            format!(
                                "optionValue {} of type secret must reference a secret by name",
                                val.name
                            ),
                        ));
                        continue;
                    }
                    if value_from.secret.key.is_empty() {
                        errs.push(FieldError::required(
                            format!("{path}.valueFrom.key"),
                            format!(
                                "optionValue {} of type secret must reference a key in a secret",
                                val.name
                            ),
                        ));
                        continue;
                    }
                }
                continue;
            }

            if let Some(value) = &val.value {
                if let Err(msg) = options::validate_value(option, value) {
                    errs.push(FieldError::invalid(format!("{path}.value"), msg));
                }
            }
        }
        if option.required && !is_set {
            errs.push(FieldError::required(
                "spec.optionValues",
                format!(
                    "Option '{}' is required by PluginDefinition '{}'",
                    option.name, plugin.spec.plugin_definition
                ),
            ));
        }
    }
    errs
}

/// Validate that a plugin targeting a remote cluster names an existing one.
///
/// Plugins on the central-cluster exemption list, plugins whose definition
/// has no Helm chart (frontend-only) and plugins in the central namespace
/// are exempt. Everything else must set spec.clusterName and the named
/// Cluster must exist in the plugin's namespace. A missing cluster is a
/// field error; any other store failure is an internal error wrapping the
/// cause.
pub async fn check_cluster_scope_for_plugin(
    store: &dyn ObjectStore,
    plugin: &Plugin,
    definition: &PluginDefinition,
    central_cluster_exemptions: &[String],
) -> Result<(), AdmissionError> {
    let definition_name = &plugin.spec.plugin_definition;
    if central_cluster_exemptions.iter().any(|n| n == definition_name)
        || definition.spec.helm_chart.is_none()
        || plugin.namespace().as_deref() == Some(CENTRAL_NAMESPACE)
    {
        return Ok(());
    }

    let cluster_name = &plugin.spec.cluster_name;
    if cluster_name.is_empty() {
        return Err(AdmissionError::invalid(
            "Plugin",
            plugin.name_any(),
            vec![FieldError::required(
                "spec.clusterName",
                "the clusterName must be set",
            )],
        ));
    }

    let namespace = plugin.namespace().unwrap_or_default();
    match store
        .check_exists(ReferenceKind::Cluster, &namespace, cluster_name)
        .await
    {
        Ok(()) => Ok(()),
        Err(err) if err.is_not_found() => Err(AdmissionError::invalid(
            "Plugin",
            plugin.name_any(),
            vec![FieldError::not_found(
                "spec.clusterName",
                format!("cluster \"{cluster_name}\" not found"),
            )],
        )),
        Err(err) => Err(AdmissionError::internal(err)),
    }
}

/// Validate that exactly one of clusterName and clusterSelector is set.
///
/// Both-set and neither-set are distinct invalid states with distinct
/// messages.
pub fn check_cluster_name_xor_selector(binding: &TeamRoleBinding) -> Result<(), FieldError> {
    let has_name = !binding.spec.cluster_name.is_empty();
    let selector = &binding.spec.cluster_selector;
    let has_selector = selector
        .match_labels
        .as_ref()
        .is_some_and(|labels| !labels.is_empty())
        || selector
            .match_expressions
            .as_ref()
            .is_some_and(|exprs| !exprs.is_empty());
    match (has_name, has_selector) {
        (true, true) => Err(FieldError::invalid(
            "spec.clusterName",
            "cannot specify both spec.clusterName and spec.clusterSelector",
        )),
        (false, false) => Err(FieldError::invalid(
            "spec.clusterName",
            "must specify either spec.clusterName or spec.clusterSelector",
        )),
        _ => Ok(()),
    }
}

/// Generic existence check for a named cross-object reference.
///
/// A missing object maps to a field error on `path`; any other store failure
/// aborts with an internal error.
pub async fn check_reference_exists(
    store: &dyn ObjectStore,
    kind: ReferenceKind,
    namespace: &str,
    name: &str,
    path: &str,
) -> Result<Option<FieldError>, AdmissionError> {
    match store.check_exists(kind, namespace, name).await {
        Ok(()) => Ok(None),
        Err(err) if err.is_not_found() => Ok(Some(FieldError::invalid(
            path,
            format!("{} \"{}\" does not exist", kind, name),
        ))),
        Err(err) => Err(AdmissionError::internal(err)),
    }
}
