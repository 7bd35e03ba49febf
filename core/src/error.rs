//! Error types and handling for finda core

use thiserror::Error;

/// Result type alias for finda operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for finda core
#[derive(Error, Debug)]
pub enum Error {
    /// Resource service errors
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Orchestrator errors
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    /// Session / selection errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Resource service errors
///
/// Transport and protocol failures are recovered to an empty listing inside
/// the client and never surface as errors; only calling an unsupported
/// method crosses the client boundary.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },
}

/// Orchestrator errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Maximum steps exceeded: {max_steps}")]
    MaxStepsExceeded { max_steps: usize },

    #[error("Unknown tool requested by model: {name}")]
    UnknownTool { name: String },
}

/// Session and selection errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Path does not start with the virtual root: {path}")]
    InvalidPath { path: String },

    #[error("Failed to open file: {message}")]
    OpenFailure { message: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
