//! Option type system for PluginDefinitions.
//!
//! A PluginDefinition declares a typed configuration schema; every Plugin is
//! checked against it on admission. This module validates single literals
//! against their declared type, validates a definition's own option schema
//! (name uniqueness, defaults type-check) and merges a plugin's option
//! values with the definition's defaults during defaulting.

use serde_json::Value;

use crate::crd::{OptionValue, PluginOption, PluginOptionType};
use crate::webhooks::error::FieldError;

/// Check a literal against the option's declared type.
///
/// Secret options never accept a literal: the presence of a value is itself
/// the error, independent of its content.
pub fn validate_value(option: &PluginOption, value: &Value) -> Result<(), String> {
    let matches = match option.option_type {
        PluginOptionType::Secret => {
            return Err(format!(
                "optionValue {} of type secret must use valueFrom to reference a secret",
                option.name
            ));
        }
        PluginOptionType::String => value.is_string(),
        PluginOptionType::Bool => value.is_boolean(),
        PluginOptionType::Int => value.is_i64() || value.is_u64(),
        PluginOptionType::List => value.is_array(),
        PluginOptionType::Map => value.is_object(),
    };
    if matches {
        Ok(())
    } else {
        Err(format!(
            "optionValue {} must be of type {}",
            option.name, option.option_type
        ))
    }
}

/// Validate a definition's declared options: names must be unique and each
/// default, if present, must satisfy its own type.
///
/// Returns the first violation only. The PluginDefinition webhook has always
/// reported one error at a time, unlike the aggregating Plugin validator.
pub fn validate_definition_options(options: &[PluginOption]) -> Result<(), FieldError> {
    let mut seen = std::collections::HashSet::new();
    for (idx, option) in options.iter().enumerate() {
        if !seen.insert(option.name.as_str()) {
            return Err(FieldError::invalid(
                format!("spec.options[{idx}].name"),
                format!("option name '{}' is not unique", option.name),
            ));
        }
        if let Some(default) = &option.default {
            if validate_value(option, default).is_err() {
                return Err(FieldError::invalid(
                    format!("spec.options[{idx}].default"),
                    format!(
                        "default of option '{}' must match the declared type {}",
                        option.name, option.option_type
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Merge a plugin's option values with the definition's defaults.
///
/// Defaults fill options the plugin did not set; plugin-supplied entries win.
/// The result is sorted by option name so repeated defaulting is stable.
pub fn merge_option_values(options: &[PluginOption], values: &[OptionValue]) -> Vec<OptionValue> {
    let mut merged: Vec<OptionValue> = options
        .iter()
        .filter_map(|option| {
            option.default.as_ref().map(|default| OptionValue {
                name: option.name.clone(),
                value: Some(default.clone()),
                value_from: None,
            })
        })
        .collect();
    for value in values {
        match merged.iter_mut().find(|v| v.name == value.name) {
            Some(existing) => *existing = value.clone(),
            None => merged.push(value.clone()),
        }
    }
    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}
