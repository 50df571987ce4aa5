//! Settings file loading.
//!
//! Deployments that override the calculation defaults ship a flat YAML
//! map; this module turns such a file into a [`StaticSettings`] provider.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineResult, PayrollError};

use super::StaticSettings;

/// Loads settings overrides from a flat YAML map file.
///
/// Scalar values of any YAML type are accepted and normalized to strings;
/// the typed fallback parsing in [`super::Settings::load`] handles the rest.
///
/// # Arguments
///
/// * `path` - Path to the YAML file (e.g. `./config/payroll.yaml`)
///
/// # Errors
///
/// Returns [`PayrollError::SettingsNotFound`] when the file is missing and
/// [`PayrollError::SettingsParseError`] when it is not a flat scalar map.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::settings::load_settings_file;
///
/// let provider = load_settings_file("./config/payroll.yaml")?;
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> EngineResult<StaticSettings> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| PayrollError::SettingsNotFound {
        path: path_str.clone(),
    })?;

    let raw: HashMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&content).map_err(|e| PayrollError::SettingsParseError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    let mut values = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let rendered = match value {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            other => {
                return Err(PayrollError::SettingsParseError {
                    path: path_str,
                    message: format!("key '{key}' holds a non-scalar value: {other:?}"),
                });
            }
        };
        values.insert(key, rendered);
    }

    Ok(StaticSettings::from_map(values))
}
