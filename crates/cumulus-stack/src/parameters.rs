//! Stack parameter loading.
//!
//! The parameter file is a flat YAML mapping of parameter name to string
//! value. It is parsed fresh on every read — never cached — so edits between
//! two lifecycle calls are always picked up.

use std::collections::BTreeMap;
use std::path::Path;

use aws_sdk_cloudformation::types::Parameter;
use serde_yaml::Value;

use crate::error::StackError;

/// Read and decode a parameter file into a flat string map.
///
/// Anything that is not a flat `string → string` mapping fails: YAML syntax
/// errors surface the parser diagnostic unmodified, and nested structures or
/// non-string scalars are rejected by name.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>, StackError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "failed to read parameter file");
        StackError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let doc: Value = serde_yaml::from_str(&raw).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "failed to decode parameter file");
        StackError::ParameterDecode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    flatten(doc).map_err(|detail| {
        tracing::error!(path = %path.display(), detail = %detail, "parameter file is not a flat string mapping");
        StackError::ParameterShape {
            path: path.to_path_buf(),
            detail,
        }
    })
}

/// YAML scalars are weakly typed and `1` would happily deserialize into a
/// `String`. Require every key and value to be an actual YAML string so a
/// wrong-typed parameter fails here instead of reaching the service.
fn flatten(doc: Value) -> Result<BTreeMap<String, String>, String> {
    let Value::Mapping(mapping) = doc else {
        return Err("top-level value is not a mapping".to_string());
    };

    let mut params = BTreeMap::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(key) => key,
            other => return Err(format!("key {other:?} is not a string")),
        };
        let value = match value {
            Value::String(value) => value,
            _ => return Err(format!("value for `{key}` is not a string")),
        };
        params.insert(key, value);
    }
    Ok(params)
}

/// Project a parameter map into the SDK's key/value pair shape.
///
/// Pair order follows map iteration order; CloudFormation treats parameter
/// order as irrelevant.
pub fn to_parameter_list(params: &BTreeMap<String, String>) -> Vec<Parameter> {
    params
        .iter()
        .map(|(key, value)| {
            Parameter::builder()
                .parameter_key(key)
                .parameter_value(value)
                .build()
        })
        .collect()
}
