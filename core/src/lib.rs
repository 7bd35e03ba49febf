//! # finda Core
//!
//! Core library for finda - an interactive file search assistant.
//!
//! This library provides the session/result/selection engine: the JSON-RPC
//! resource client that queries a remote file index, the interpreter that
//! normalizes orchestration output into ordered path lists, the resolver
//! that maps virtual paths onto the real documents tree, and the selection
//! state machine that drives one interactive session.

// Core modules
pub mod agent;
pub mod config;
pub mod error;
pub mod interpret;
pub mod llm;
pub mod paths;
pub mod resource;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use error::{Error, Result};
pub use interpret::ResultInterpreter;
pub use paths::PathResolver;
pub use resource::{ResourceClient, ResourceRef};
pub use session::{Session, SelectionController, SelectionState, TurnOutcome};

/// Current version of the finda-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
