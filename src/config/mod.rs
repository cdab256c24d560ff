// src/config/mod.rs

//! Layered configuration for the dataset generator
//!
//! Layers are merged in priority order (lowest first):
//! - Built-in defaults
//! - Configuration files (YAML, JSON or TOML, chosen by extension)
//! - Environment variables (`DEALER__GENERATION__SEED=7`)
//! - In-memory overrides

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::data::{Currency, DatasetCounts, FactorySettings, Role};
use crate::error::{Error, ErrorKind, Result};
use crate::types::Timestamp;

/// Prefix of environment variables read by the default environment layer
pub const ENV_PREFIX: &str = "DEALER";

/// Separator between path segments in environment variable names
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigSource {
    File { path: PathBuf, format: ConfigFormat },
    Environment { prefix: String },
    Memory { data: Value },
}

#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub name: String,
    pub source: ConfigSource,
    pub priority: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub logging: LoggingConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub debug: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Dealer Oxide".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            debug: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// Daily-rolling log file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./logs"),
            file_prefix: "dealer_oxide.log".to_string(),
        }
    }
}

/// What to generate and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fixed seed; entropy when absent
    pub seed: Option<u64>,
    /// Instant date windows hang off, RFC 3339. Unset means the current
    /// second, re-read on every refresh. Reproducing a dataset takes both
    /// a seed and an anchor.
    pub anchor: Option<Timestamp>,
    pub currency: Currency,
    pub counts: DatasetCounts,
    pub history_days: i64,
    pub horizon_days: i64,
    pub tax_rate: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let settings = FactorySettings::default();
        Self {
            seed: None,
            anchor: None,
            currency: Currency::default(),
            counts: DatasetCounts::default(),
            history_days: settings.history_days,
            horizon_days: settings.horizon_days,
            tax_rate: settings.tax_rate,
        }
    }
}

impl GenerationConfig {
    pub fn factory_settings(&self) -> FactorySettings {
        FactorySettings {
            history_days: self.history_days,
            horizon_days: self.horizon_days,
            tax_rate: self.tax_rate,
        }
    }

    /// Parameter problems that would make dataset assembly fail
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let counts = &self.counts;

        if !(0.0..1.0).contains(&self.tax_rate) {
            errors.push(ValidationError::new(
                "generation.tax_rate",
                format!("{} is outside [0, 1)", self.tax_rate),
            ));
        }
        if self.history_days <= 0 {
            errors.push(ValidationError::new(
                "generation.history_days",
                "history window must be at least one day",
            ));
        }
        if self.horizon_days < 0 {
            errors.push(ValidationError::new(
                "generation.horizon_days",
                "horizon cannot be negative",
            ));
        }

        let staffed = Role::STAFFED.len();
        let needs_staff = [
            ("deals", counts.deals),
            ("appointments", counts.appointments),
            ("repair_orders", counts.repair_orders),
        ];
        for (name, count) in needs_staff {
            if count == 0 {
                continue;
            }
            if counts.employees < staffed {
                errors.push(ValidationError::new(
                    "generation.counts.employees",
                    format!(
                        "{} {} requested but {} employees cannot staff all {} roles",
                        count, name, counts.employees, staffed
                    ),
                ));
            }
            if counts.customers == 0 {
                errors.push(ValidationError::new(
                    "generation.counts.customers",
                    format!("{} {} requested without customers", count, name),
                ));
            }
            if counts.vehicles == 0 {
                errors.push(ValidationError::new(
                    "generation.counts.vehicles",
                    format!("{} {} requested without vehicles", count, name),
                ));
            }
        }
        if counts.deals > 0 && counts.stores == 0 {
            errors.push(ValidationError::new(
                "generation.counts.stores",
                "deals requested without stores",
            ));
        }
        if counts.orders > 0 && counts.customers == 0 {
            errors.push(ValidationError::new(
                "generation.counts.customers",
                "orders requested without customers",
            ));
        }

        errors
    }
}

fn config_error(key: &str, message: String) -> Error {
    Error::new(
        ErrorKind::Configuration {
            key: Some(key.to_string()),
            validation_errors: vec![message.clone()],
        },
        message,
    )
    .source("config")
}

/// Merges configuration layers into one JSON tree
#[derive(Debug)]
pub struct ConfigManager {
    layers: Vec<ConfigLayer>,
    merged_config: RwLock<Value>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            merged_config: RwLock::new(Value::Object(Map::new())),
        }
    }

    /// Defaults, an optional file, then `DEALER__*` environment overrides
    pub fn standard(config_path: Option<&Path>) -> Result<Self> {
        let mut manager = Self::new();
        let defaults = serde_json::to_value(AppConfig::default())?;
        manager.add_memory_layer("defaults", defaults, 0);
        if let Some(path) = config_path {
            manager.add_file_layer("file", path, 10)?;
        }
        manager.add_env_layer("environment", ENV_PREFIX, 100);
        manager.reload()?;
        Ok(manager)
    }

    pub fn add_file_layer<P: AsRef<Path>>(
        &mut self,
        name: impl Into<String>,
        path: P,
        priority: u32,
    ) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let format = ConfigFormat::from_extension(&path).ok_or_else(|| {
            Error::config(format!(
                "Unsupported configuration file format: {}",
                path.display()
            ))
        })?;

        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::File { path, format },
            priority,
        });
        Ok(())
    }

    pub fn add_env_layer(&mut self, name: impl Into<String>, prefix: impl Into<String>, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Environment {
                prefix: prefix.into(),
            },
            priority,
        });
    }

    pub fn add_memory_layer(&mut self, name: impl Into<String>, data: Value, priority: u32) {
        self.push_layer(ConfigLayer {
            name: name.into(),
            source: ConfigSource::Memory { data },
            priority,
        });
    }

    fn push_layer(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
        self.layers.sort_by_key(|l| l.priority);
    }

    /// Re-read every layer and rebuild the merged tree
    pub fn reload(&self) -> Result<()> {
        let mut merged = Value::Object(Map::new());
        for layer in &self.layers {
            let layer_config = self.load_layer_config(layer)?;
            merge_values(&mut merged, layer_config);
            tracing::debug!(layer = %layer.name, priority = layer.priority, "merged configuration layer");
        }
        *self.merged_config.write() = merged;
        Ok(())
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let config = self.merged_config.read();
        let value = get_nested_value(&config, key)
            .ok_or_else(|| config_error(key, format!("Configuration key '{}' not found", key)))?;

        serde_json::from_value(value.clone()).map_err(|e| {
            config_error(key, format!("Failed to deserialize config value: {}", e))
        })
    }

    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| config_error(key, format!("Failed to serialize config value: {}", e)))?;
        set_nested_value(&mut self.merged_config.write(), key, value);
        Ok(())
    }

    /// Typed view of the merged tree
    pub fn load(&self) -> Result<AppConfig> {
        let config = self.merged_config.read();
        serde_json::from_value(config.clone()).map_err(|e| {
            Error::config(format!("Failed to deserialize config: {}", e)).caused_by(&*config)
        })
    }

    /// Problems with the merged configuration; empty when it is usable
    pub fn validate(&self) -> Result<Vec<ValidationError>> {
        let config = self.load()?;
        let mut errors = config.generation.validate();
        if config.logging.level.trim().is_empty() {
            errors.push(ValidationError::new("logging.level", "level cannot be empty"));
        }
        Ok(errors)
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    fn load_layer_config(&self, layer: &ConfigLayer) -> Result<Value> {
        match &layer.source {
            ConfigSource::File { path, format } => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Failed to read config file {}: {}", path.display(), e))
                })?;

                match format {
                    ConfigFormat::Json => serde_json::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
                    ConfigFormat::Yaml => serde_yaml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
                    ConfigFormat::Toml => toml::from_str(&content)
                        .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
                }
            }
            ConfigSource::Environment { prefix } => Ok(env_config(prefix, std::env::vars())),
            ConfigSource::Memory { data } => Ok(data.clone()),
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Nested tree from `PREFIX__A__B=value` pairs
fn env_config(prefix: &str, vars: impl Iterator<Item = (String, String)>) -> Value {
    let mut env_config = Map::new();
    let marker = format!("{}{}", prefix, ENV_SEPARATOR);

    for (key, value) in vars {
        let Some(path) = key.strip_prefix(&marker) else {
            continue;
        };
        let path = path.to_lowercase();
        let nested_keys: Vec<&str> = path.split(ENV_SEPARATOR).filter(|k| !k.is_empty()).collect();
        set_nested_env_value(&mut env_config, &nested_keys, value);
    }

    Value::Object(env_config)
}

fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_values(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

fn get_nested_value<'a>(config: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(config, |current, k| current.get(k))
}

fn set_nested_value(config: &mut Value, key: &str, value: Value) {
    let keys: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = keys.split_last() else {
        return;
    };

    let mut current = config;
    for k in parents {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            return;
        };
        current = map
            .entry(k.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }
}

fn parse_env_value(value: String) -> Value {
    if let Ok(bool_val) = value.parse::<bool>() {
        Value::Bool(bool_val)
    } else if let Ok(int_val) = value.parse::<i64>() {
        Value::Number(Number::from(int_val))
    } else if let Some(number) = value.parse::<f64>().ok().and_then(Number::from_f64) {
        Value::Number(number)
    } else {
        Value::String(value)
    }
}

fn set_nested_env_value(config: &mut Map<String, Value>, keys: &[&str], value: String) {
    match keys {
        [] => {}
        [key] => {
            config.insert(key.to_string(), parse_env_value(value));
        }
        [first, rest @ ..] => {
            let entry = config
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested_map) = entry {
                set_nested_env_value(nested_map, rest, value);
            }
        }
    }
}
