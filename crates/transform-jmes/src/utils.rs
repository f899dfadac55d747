//! Helpers for flat maps of entry configs

use crate::mapping::{FieldMappingEntry, FieldMappingEntryString};
use crate::mapping_config::{FieldMappingEntryConfig, FieldMappingEntryStringConfig};
use crate::{Error, Result};
use std::collections::BTreeMap;
use transform_types::GetEnvFn;

/// Evaluate every entry config of an object
///
/// # Errors
///
/// Returns the first failing entry, wrapped with its key.
pub fn evaluate_object_field_mapping_entries(
    input: &BTreeMap<String, FieldMappingEntryConfig>,
    get_env: &GetEnvFn,
) -> Result<BTreeMap<String, FieldMappingEntry>> {
    input
        .iter()
        .map(|(key, config)| {
            config
                .evaluate_entry(get_env)
                .map(|entry| (key.clone(), entry))
                .map_err(|err| Error::property(key.as_str(), err))
        })
        .collect()
}

/// Evaluate every string entry config of an object
///
/// # Errors
///
/// Returns the first failing entry, wrapped with its key.
pub fn evaluate_object_field_mapping_entry_strings(
    input: &BTreeMap<String, FieldMappingEntryStringConfig>,
    get_env: &GetEnvFn,
) -> Result<BTreeMap<String, FieldMappingEntryString>> {
    input
        .iter()
        .map(|(key, config)| {
            config
                .evaluate_string(get_env)
                .map(|entry| (key.clone(), entry))
                .map_err(|err| Error::property(key.as_str(), err))
        })
        .collect()
}
