//! Natural-language orchestration over the file index

pub mod instructions;
pub mod orchestrator;

pub use orchestrator::Orchestrator;
