//! Configuration management for the CLI
//!
//! Settings come from three places, highest precedence first:
//! - Environment variables (`JFROG_CLI_LOG_LEVEL`, `JFROG_CLI_PLUGINS_DIR`, `CI`)
//! - The settings file `cli-settings.yaml` in the CLI home directory
//! - Built-in defaults
//!
//! The home directory is `JFROG_CLI_HOME_DIR` when set, otherwise `~/.jfrog`.
//!
//! ## Environment Variable Expansion
//!
//! The settings file supports placeholders, expanded before parsing:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::{env, fs, path::PathBuf};

use crate::constants::{
    DEFAULT_HOME_DIR_NAME, ENV_CI, ENV_HOME_DIR, ENV_LOG_LEVEL, ENV_PLUGINS_DIR,
    PLUGINS_DIR_NAME, SETTINGS_FILE,
};

/// Contents of `cli-settings.yaml`
///
/// # Example
///
/// ```yaml
/// pluginsDir: ${HOME}/frog-plugins
/// logLevel: DEBUG
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliSettings {
    /// Directory holding installed plugins
    #[serde(default)]
    pub plugins_dir: Option<String>,
    /// One of ERROR, WARN, INFO, DEBUG
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CliSettings {
    /// Plugins directory: `JFROG_CLI_PLUGINS_DIR`, then the settings file, then `<home>/plugins`
    pub fn plugins_dir(&self, home: &Path) -> PathBuf {
        env::var(ENV_PLUGINS_DIR)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.plugins_dir.clone().filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(PLUGINS_DIR_NAME))
    }

    /// Log level: `JFROG_CLI_LOG_LEVEL`, then the settings file
    pub fn log_level(&self) -> Option<String> {
        env::var(ENV_LOG_LEVEL)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.log_level.clone())
    }
}

pub fn home_dir() -> PathBuf {
    env::var(ENV_HOME_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push(DEFAULT_HOME_DIR_NAME);
            p
        })
}

/// Load settings from the home directory; a missing file yields defaults
pub fn load_settings(home: &Path) -> anyhow::Result<CliSettings> {
    let path = home.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(CliSettings::default());
    }
    load_settings_from(&path)
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<CliSettings> {
    let data = preprocess_config(path)
        .with_context(|| format!("reading CLI settings {}", path.display()))?;
    if data.trim().is_empty() {
        return Ok(CliSettings::default());
    }
    let settings: CliSettings = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing CLI settings {}", path.display()))?;
    Ok(settings)
}

/// True when `CI` is set to a truthy value; disables interactive output
pub fn is_ci() -> bool {
    env::var(ENV_CI)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")
            .expect("placeholder pattern is valid")
    })
}

pub fn expand_env_placeholders(input: &str) -> String {
    placeholder_pattern()
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let op = caps.get(2).map_or("", |m| m.as_str());
            let val = caps.get(3).map_or("", |m| m.as_str());
            let var = env::var(var_name).ok();

            match (var.as_deref(), op) {
                (Some(v), "") => v.to_string(),                     // ${VAR}
                (Some(v), ":-") if !v.is_empty() => v.to_string(), // ${VAR:-default}
                (_, ":-") => val.to_string(),
                (Some(v), "-") => v.to_string(), // ${VAR-default}
                (None, "-") => val.to_string(),
                (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
                (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
                _ => String::new(),
            }
        })
        .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)?;
    Ok(expand_env_placeholders(&raw_data))
}
