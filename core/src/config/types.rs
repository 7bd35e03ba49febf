//! Minimal configuration types for finda core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in the CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default resource service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/";

/// Default virtual-root marker used in canonical paths
pub const DEFAULT_VIRTUAL_ROOT: &str = "/data";

/// Default request timeout for the resource service, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Model parameters for LLM requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// Base URL for the OpenAI-compatible API
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model name/identifier
    pub model: String,
    /// Model parameters
    #[serde(default)]
    pub params: ModelParams,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            params: ModelParams::default(),
            headers: HashMap::new(),
        }
    }

    /// Set model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Add multiple headers
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        if self.model.is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if let Some(temp) = self.params.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        if let Some(top_p) = self.params.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err("Top-p must be between 0.0 and 1.0".to_string());
            }
        }

        Ok(())
    }
}

/// Resolved search configuration: where the file index lives and how
/// canonical paths map onto the real filesystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Resource service endpoint (JSON-RPC over HTTP POST)
    pub endpoint: String,
    /// Virtual-root marker used in all canonical paths
    pub virtual_root: String,
    /// Real documents root that the virtual root maps onto
    pub documents_root: PathBuf,
    /// Request timeout for resource service calls, in seconds
    pub timeout_seconds: u64,
}

impl SearchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("Endpoint must start with http:// or https://".to_string());
        }

        if self.virtual_root.is_empty() || !self.virtual_root.starts_with('/') {
            return Err("Virtual root must be a non-empty absolute prefix".to_string());
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            virtual_root: DEFAULT_VIRTUAL_ROOT.to_string(),
            documents_root: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Documents"),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
