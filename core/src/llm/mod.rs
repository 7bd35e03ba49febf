//! LLM client abstraction and the OpenAI-compatible provider

pub mod client;
pub mod openai;

pub use client::{
    FunctionCall, FunctionDefinition, LlmClient, LlmMessage, LlmResponse, MessageRole,
    ToolDefinition, ToolInvocation, Usage,
};
pub use openai::OpenAiCompatClient;
