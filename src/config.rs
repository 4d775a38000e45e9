use crate::error::{Error, Result};
use crate::github::client::DEFAULT_API_URL;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Organization,
    Template,
    ApiUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Organization => "organization",
            ConfigKey::Template => "template",
            ConfigKey::ApiUrl => "api_url",
        }
    }

    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Organization, ConfigKey::Template, ConfigKey::ApiUrl]
    }
}

/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".issues2markdown";
/// Filename for the project-specific configuration within the config directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";

/// Settings after merging the configuration file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub organization: Option<String>,
    pub template: Option<PathBuf>,
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            organization: None,
            template: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Parses configuration file content into a map of configuration values.
///
/// - Empty or whitespace-only content yields an empty map.
/// - Unknown keys are skipped.
/// - Anything other than a JSON object is an error.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content)
        .map_err(|e| Error::configuration(format!("Failed to parse config JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(ConfigKey::all()
            .iter()
            .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
            .collect()),
        _ => Err(Error::configuration("Config must be a JSON object")),
    }
}

/// Merges `updates` into a copy of `base_config`; values in `updates` win.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// Reads `<dir>/.issues2markdown/config.json`; a missing file is an empty config.
pub fn load_project_config(dir: &Path) -> Result<HashMap<ConfigKey, Value>> {
    let path = dir.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
    match std::fs::read(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(Error::configuration(format!(
            "Failed to read {}: {e}",
            path.display()
        ))),
    }
}

/// Validates a configuration map into [`Settings`].
pub fn resolve_settings(config: &HashMap<ConfigKey, Value>) -> Result<Settings> {
    let string_value = |key: ConfigKey| -> Result<Option<String>> {
        match config.get(&key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(Error::configuration(format!(
                "`{}` must be a string, got {other}",
                key.as_str()
            ))),
        }
    };

    Ok(Settings {
        organization: string_value(ConfigKey::Organization)?,
        template: string_value(ConfigKey::Template)?.map(PathBuf::from),
        api_url: string_value(ConfigKey::ApiUrl)?
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    })
}
