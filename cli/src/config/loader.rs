//! Simple CLI configuration loader for finda
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./finda.json or ./.finda/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/finda/config.json or ~/.config/finda/config.json
//! 4. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use finda_core::config::{
    ModelParams, ResolvedLlmConfig, SearchConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_VIRTUAL_ROOT,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// API key (can be "env:VAR_NAME" for environment variable)
    pub api_key: String,
    /// Base URL for the LLM provider (optional)
    pub base_url: Option<String>,
    /// Model name (optional)
    pub model: Option<String>,
    /// Resource service endpoint (optional)
    pub endpoint: Option<String>,
    /// Real documents root, tilde-expanded (optional)
    pub documents_root: Option<String>,
    /// Virtual-root marker (optional)
    pub virtual_root: Option<String>,
    /// Resource service timeout in seconds (optional)
    pub timeout_seconds: Option<u64>,
    /// Model parameters (optional)
    #[serde(default)]
    pub params: ModelParams,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: ResolvedLlmConfig,
    pub search: SearchConfig,
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    api_key_override: Option<String>,
    base_url_override: Option<String>,
    model_override: Option<String>,
    endpoint_override: Option<String>,
    docs_root_override: Option<String>,
    virtual_root_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            api_key_override: None,
            base_url_override: None,
            model_override: None,
            endpoint_override: None,
            docs_root_override: None,
            virtual_root_override: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set API key override
    pub fn with_api_key_override(mut self, api_key: String) -> Self {
        self.api_key_override = Some(api_key);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set model override
    pub fn with_model_override(mut self, model: String) -> Self {
        self.model_override = Some(model);
        self
    }

    /// Set resource service endpoint override
    pub fn with_endpoint_override(mut self, endpoint: String) -> Self {
        self.endpoint_override = Some(endpoint);
        self
    }

    /// Set documents root override
    pub fn with_docs_root_override(mut self, docs_root: String) -> Self {
        self.docs_root_override = Some(docs_root);
        self
    }

    /// Set virtual root override
    pub fn with_virtual_root_override(mut self, virtual_root: String) -> Self {
        self.virtual_root_override = Some(virtual_root);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<AppConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(api_key) = &self.api_key_override {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(model) = &self.model_override {
            config.model = Some(model.clone());
        }
        if let Some(endpoint) = &self.endpoint_override {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(docs_root) = &self.docs_root_override {
            config.documents_root = Some(docs_root.clone());
        }
        if let Some(virtual_root) = &self.virtual_root_override {
            config.virtual_root = Some(virtual_root.clone());
        }

        // Step 3: Resolve to final application config
        self.resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // 3. Environment variables only
        self.try_load_env_only()
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<RawConfig>> {
        let cwd = std::env::current_dir()?;

        // Try ./finda.json first
        let finda_json = cwd.join("finda.json");
        if finda_json.exists() {
            return Ok(Some(self.load_file(&finda_json).await?));
        }

        // Try ./.finda/config.json
        let finda_dir_config = cwd.join(".finda").join("config.json");
        if finda_dir_config.exists() {
            return Ok(Some(self.load_file(&finda_dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<RawConfig>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("finda").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Try loading from environment variables only
    fn try_load_env_only(&self) -> Result<RawConfig> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            anyhow!(
                "No configuration found. Please create a finda.json file or set OPENAI_API_KEY"
            )
        })?;

        let model = std::env::var("FINDA_MODEL")
            .or_else(|_| std::env::var("OPENAI_MODEL"))
            .ok();
        let base_url = std::env::var("FINDA_BASE_URL").ok();
        let endpoint = std::env::var("FINDA_ENDPOINT")
            .or_else(|_| std::env::var("MCP_SERVER_URL"))
            .ok();
        let documents_root = std::env::var("DOCUMENTS_PATH").ok();
        let virtual_root = std::env::var("FINDA_VIRTUAL_ROOT").ok();

        Ok(RawConfig {
            api_key,
            base_url,
            model,
            endpoint,
            documents_root,
            virtual_root,
            timeout_seconds: None,
            params: ModelParams::default(),
            headers: HashMap::new(),
        })
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg_config))
        } else {
            dirs::home_dir().map(|home| home.join(".config"))
        }
    }

    /// Resolve raw config to the final application config
    fn resolve_config(&self, config: RawConfig) -> Result<AppConfig> {
        // Resolve API key (handle env: prefix)
        let api_key = if let Some(var_name) = config.api_key.strip_prefix("env:") {
            std::env::var(var_name)
                .with_context(|| format!("Environment variable not found: {}", var_name))?
        } else {
            config.api_key
        };

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let model = config.model.unwrap_or_else(|| "gpt-4o".to_string());

        let llm = ResolvedLlmConfig::new(base_url, api_key, model)
            .with_params(config.params)
            .with_headers(config.headers);

        llm.validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        let documents_root = match config.documents_root {
            Some(raw) => PathBuf::from(shellexpand::tilde(&raw).into_owned()),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Documents"),
        };

        let search = SearchConfig {
            endpoint: config.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            virtual_root: config
                .virtual_root
                .unwrap_or_else(|| DEFAULT_VIRTUAL_ROOT.to_string()),
            documents_root,
            timeout_seconds: config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };

        search
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(AppConfig { llm, search })
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn loads_full_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        let content = r#"{
            "api_key": "file-key",
            "model": "gpt-4o-mini",
            "endpoint": "http://localhost:5001/",
            "documents_root": "/srv/docs",
            "virtual_root": "/archive",
            "timeout_seconds": 5
        }"#;
        tokio::fs::write(&path, content).await.unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert_eq!(config.llm.api_key, "file-key");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.search.endpoint, "http://localhost:5001/");
        assert_eq!(config.search.virtual_root, "/archive");
        assert_eq!(config.search.documents_root, PathBuf::from("/srv/docs"));
        assert_eq!(config.search.timeout_seconds, 5);
    }

    #[tokio::test]
    async fn applies_defaults_for_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        tokio::fs::write(&path, r#"{"api_key": "k"}"#).await.unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();

        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.virtual_root, DEFAULT_VIRTUAL_ROOT);
    }

    #[tokio::test]
    async fn flag_overrides_beat_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        let content = r#"{"api_key": "file-key", "model": "gpt-4o"}"#;
        tokio::fs::write(&path, content).await.unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .with_api_key_override("flag-key".to_string())
            .with_endpoint_override("http://10.0.0.1:5001/".to_string())
            .load()
            .await
            .unwrap();

        assert_eq!(config.llm.api_key, "flag-key");
        assert_eq!(config.search.endpoint, "http://10.0.0.1:5001/");
    }

    #[tokio::test]
    async fn resolves_env_indirection_for_api_key() {
        std::env::set_var("FINDA_TEST_KEY", "key-from-env");

        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        tokio::fs::write(&path, r#"{"api_key": "env:FINDA_TEST_KEY"}"#)
            .await
            .unwrap();

        let config = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await
            .unwrap();
        assert_eq!(config.llm.api_key, "key-from-env");
    }

    #[tokio::test]
    async fn env_indirection_to_missing_variable_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        tokio::fs::write(&path, r#"{"api_key": "env:FINDA_TEST_KEY_UNSET"}"#)
            .await
            .unwrap();

        let result = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await;
        assert!(result.is_err());
    }

    // Discovery order moves the process cwd and XDG_CONFIG_HOME, so all
    // precedence assertions live in this one test.
    #[tokio::test]
    async fn discovery_prefers_cwd_finda_json_then_dotdir_then_xdg() {
        let cwd = tempdir().unwrap();
        let xdg = tempdir().unwrap();

        tokio::fs::create_dir_all(xdg.path().join("finda"))
            .await
            .unwrap();
        tokio::fs::write(
            xdg.path().join("finda").join("config.json"),
            r#"{"api_key": "xdg-key"}"#,
        )
        .await
        .unwrap();

        tokio::fs::create_dir_all(cwd.path().join(".finda"))
            .await
            .unwrap();
        tokio::fs::write(
            cwd.path().join(".finda").join("config.json"),
            r#"{"api_key": "dotdir-key"}"#,
        )
        .await
        .unwrap();
        tokio::fs::write(cwd.path().join("finda.json"), r#"{"api_key": "cwd-key"}"#)
            .await
            .unwrap();

        std::env::set_var("XDG_CONFIG_HOME", xdg.path());
        std::env::set_current_dir(cwd.path()).unwrap();

        let config = CliConfigLoader::new().load().await.unwrap();
        assert_eq!(config.llm.api_key, "cwd-key");

        tokio::fs::remove_file(cwd.path().join("finda.json"))
            .await
            .unwrap();
        let config = CliConfigLoader::new().load().await.unwrap();
        assert_eq!(config.llm.api_key, "dotdir-key");

        tokio::fs::remove_dir_all(cwd.path().join(".finda"))
            .await
            .unwrap();
        let config = CliConfigLoader::new().load().await.unwrap();
        assert_eq!(config.llm.api_key, "xdg-key");
    }

    #[tokio::test]
    async fn rejects_empty_api_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        tokio::fs::write(&path, r#"{"api_key": ""}"#).await.unwrap();

        let result = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_invalid_endpoint() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finda.json");
        let content = r#"{"api_key": "k", "endpoint": "not-a-url"}"#;
        tokio::fs::write(&path, content).await.unwrap();

        let result = CliConfigLoader::new()
            .with_config_override(path)
            .load()
            .await;
        assert!(result.is_err());
    }
}
