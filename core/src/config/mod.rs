//! Minimal configuration module for finda core
//!
//! Only exports pure data types. All discovery and loading logic is in the
//! CLI layer.

pub mod types;

pub use types::{
    ModelParams, ResolvedLlmConfig, SearchConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_VIRTUAL_ROOT,
};
