// src/config/loader.rs
//! Layered configuration loader
//!
//! Defaults are overlaid by each configuration file in order, then by
//! `EMG_BURST_*` environment variables, and the merged result is validated.

use crate::config::{constants::paths, AnalysisConfig};
use crate::error::{EmgError, EmgResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader merging defaults, files and environment overrides
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    /// Missing files are an error instead of being skipped
    require_files: bool,
}

impl ConfigLoader {
    /// Loader over the default local configuration file, which may be absent
    pub fn new() -> Self {
        Self {
            config_paths: vec![PathBuf::from(paths::DEFAULT_CONFIG_FILE)],
            require_files: false,
        }
    }

    /// Loader over explicit files, every one of which must exist
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths, require_files: true }
    }

    /// Load, merge and validate the configuration
    pub fn load(&self) -> EmgResult<AnalysisConfig> {
        let mut merged = toml::Value::try_from(AnalysisConfig::default())
            .map_err(|e| EmgError::configuration(e.to_string()))?;

        for config_path in &self.config_paths {
            if !config_path.exists() && !self.require_files {
                debug!(path = %config_path.display(), "optional config file not present");
                continue;
            }
            let file_config = Self::load_config_file(config_path)?;
            Self::merge_toml_values(&mut merged, file_config);
            debug!(path = %config_path.display(), "merged config file");
        }

        Self::apply_environment_overrides(&mut merged, std::env::vars());

        let config: AnalysisConfig = merged
            .try_into()
            .map_err(|e: toml::de::Error| EmgError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn load_config_file(path: &Path) -> EmgResult<toml::Value> {
        let content = std::fs::read_to_string(path)?;
        let value: toml::Value = toml::from_str(&content)?;
        Ok(value)
    }

    fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
        match (base, overlay) {
            (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
                for (key, value) in overlay_table {
                    if let Some(base_value) = base_table.get_mut(&key) {
                        Self::merge_toml_values(base_value, value);
                    } else {
                        base_table.insert(key, value);
                    }
                }
            }
            (base_value, overlay_value) => {
                *base_value = overlay_value;
            }
        }
    }

    fn apply_environment_overrides(
        config: &mut toml::Value,
        vars: impl Iterator<Item = (String, String)>,
    ) {
        for (key, value) in vars {
            let Some(stripped) = key.strip_prefix(paths::ENV_PREFIX) else {
                continue;
            };
            let config_key: Vec<String> = stripped
                .to_lowercase()
                .split(paths::ENV_NESTING_SEPARATOR)
                .map(str::to_string)
                .collect();

            debug!(variable = %key, "applying environment override");
            Self::set_nested_value(config, &config_key, Self::parse_env_value(&value));
        }
    }

    fn parse_env_value(value: &str) -> toml::Value {
        if let Ok(int_val) = value.parse::<i64>() {
            toml::Value::Integer(int_val)
        } else if let Ok(float_val) = value.parse::<f64>() {
            toml::Value::Float(float_val)
        } else if let Ok(bool_val) = value.parse::<bool>() {
            toml::Value::Boolean(bool_val)
        } else {
            toml::Value::String(value.to_string())
        }
    }

    fn set_nested_value(config: &mut toml::Value, path: &[String], value: toml::Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };

        let mut current = config;
        for part in parents {
            let toml::Value::Table(table) = current else {
                return;
            };
            current = table
                .entry(part.clone())
                .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
        }

        if let toml::Value::Table(table) = current {
            // Integer overrides of float keys stay floats
            let value = match (table.get(last), value) {
                (Some(toml::Value::Float(_)), toml::Value::Integer(i)) => toml::Value::Float(i as f64),
                (_, value) => value,
            };
            table.insert(last.clone(), value);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a single configuration file over the defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> EmgResult<AnalysisConfig> {
    ConfigLoader::with_paths(vec![path.as_ref().to_path_buf()]).load()
}
