// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Layered configuration merging.
//!
//! Layers are applied left to right with a shallow key overwrite: the last
//! layer defining a key wins. Missing layers, and layers that are not JSON
//! objects, contribute nothing.

use serde_json::Value;

use crate::config::{ConfigKey, ConfigMap, ConfigObject};

/// Merges configuration layers, the rightmost layer winning on overlap.
///
/// # Examples
///
/// ```
/// use dashboard_jobs::merge;
/// use serde_json::json;
///
/// let global = json!({ "a": 1, "b": 2 });
/// let local = json!({ "b": 3, "c": 4 });
/// let merged = merge([Some(&global,), None, Some(&local,),],);
/// assert_eq!(serde_json::Value::Object(merged,), json!({ "a": 1, "b": 3, "c": 4 }));
/// ```
pub fn merge<'a, I,>(layers: I,) -> ConfigObject
where
    I: IntoIterator<Item = Option<&'a Value,>,>,
{
    layers.into_iter().flatten().filter_map(Value::as_object,).fold(
        ConfigObject::new(),
        |mut merged, layer| {
            merged.extend(layer.iter().map(|(key, value,)| (key.clone(), value.clone(),),),);
            merged
        },
    )
}

/// Resolves the configuration a job receives for its widget's key(s).
///
/// For a single key the global object is overridden by the dashboard-local
/// one. For a key sequence every key is resolved that way on its own and the
/// results are layered in sequence order. Without a key the job gets an
/// empty configuration.
pub fn resolve_config(
    key: Option<&ConfigKey,>,
    global: &ConfigMap,
    local: &ConfigMap,
) -> ConfigObject
{
    let Some(key,) = key else {
        return ConfigObject::new();
    };

    key.keys().into_iter().fold(ConfigObject::new(), |mut resolved, name| {
        resolved.extend(merge([global.get(name,), local.get(name,),],),);
        resolved
    },)
}
