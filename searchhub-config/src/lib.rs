//! Loader for `searchhub.yaml` with environment overlays.
//!
//! Precedence, lowest first: built-in defaults, YAML sources in the order they
//! were added, then `SEARCHHUB__`-prefixed environment variables
//! (`SEARCHHUB__VIEW__PAGE_SIZE=10` sets `view.page_size`). String values may
//! reference `${VAR}`; those are expanded after merging.
use config::{Config, ConfigError, Environment, File};
use searchhub_common::observability::LogFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchHubConfig {
    pub api: ApiConfig,
    pub view: ViewConfig,
    pub modal: ModalConfig,
    pub logging: LoggingConfig,
}

/// Where the backend REST API lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 15,
        }
    }
}

/// Mount point ids and paging for the result list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub container_id: String,
    pub empty_id: String,
    pub pagination_id: String,
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container_id: "resultsContainer".into(),
            empty_id: "resultsEmpty".into(),
            pagination_id: "resultsPagination".into(),
            page_size: 6,
        }
    }
}

/// Element ids of the content overlay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModalConfig {
    pub modal_id: String,
    pub title_id: String,
    pub meta_id: String,
    pub body_id: String,
    pub status_id: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            modal_id: "contentModal".into(),
            title_id: "contentModalTitle".into(),
            meta_id: "contentModalMeta".into(),
            body_id: "contentModalBody".into(),
            status_id: "contentModalStatus".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
    pub dir: Option<PathBuf>,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "info".into(),
            dir: None,
            stderr: false,
        }
    }
}

impl SearchHubConfig {
    /// Reject values the view cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::Message(
                "view.page_size must be greater than zero".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Message("api.base_url must not be empty".into()));
        }
        let ids = [
            ("view.container_id", &self.view.container_id),
            ("view.empty_id", &self.view.empty_id),
            ("view.pagination_id", &self.view.pagination_id),
            ("modal.modal_id", &self.modal.modal_id),
        ];
        if let Some((key, _)) = ids.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(ConfigError::Message(format!("{key} must not be empty")));
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => break,
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring (YAML + env overrides).
pub struct SearchHubConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: String,
}

impl Default for SearchHubConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchHubConfigLoader {
    /// Defaults plus `SEARCHHUB__` env overrides.
    ///
    /// ```
    /// use searchhub_config::SearchHubConfigLoader;
    ///
    /// let config = SearchHubConfigLoader::new()
    ///     .with_yaml_str("view:\n  page_size: 4")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.view.page_size, 4);
    /// assert_eq!(config.view.container_id, "resultsContainer");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "SEARCHHUB".into(),
        }
    }

    /// Use a different env prefix. Mostly for tests that must not collide.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so env-only deployments still load.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use searchhub_config::SearchHubConfigLoader;
    ///
    /// let cfg = SearchHubConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// api:
    ///   base_url: "https://search.example.com"
    /// modal:
    ///   modal_id: "viewer"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.api.base_url, "https://search.example.com");
    /// assert_eq!(cfg.modal.modal_id, "viewer");
    /// assert_eq!(cfg.modal.body_id, "contentModalBody");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders, then validate.
    pub fn load(self) -> Result<SearchHubConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: SearchHubConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}
