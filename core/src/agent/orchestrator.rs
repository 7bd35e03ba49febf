//! Orchestrator: the LLM tool-call loop behind every search query

use super::instructions::ORCHESTRATOR_INSTRUCTIONS;
use crate::error::{AgentError, Result};
use crate::llm::{
    FunctionDefinition, LlmClient, LlmMessage, ToolDefinition, ToolInvocation,
};
use crate::resource::ResourceClient;
use crate::session::QueryRunner;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Name of the single tool the orchestrator exposes to the model
pub const SEARCH_FILES_TOOL: &str = "search_files";

/// Default cap on LLM round-trips per query
pub const DEFAULT_MAX_STEPS: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    pattern: String,
}

/// Turns one natural-language query into result text by driving the model
/// through the `search_files` tool
pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    resources: Arc<ResourceClient>,
    max_steps: usize,
}

impl Orchestrator {
    /// Create an orchestrator over the given LLM and resource clients
    pub fn new(llm: Arc<dyn LlmClient>, resources: Arc<ResourceClient>) -> Self {
        Self {
            llm,
            resources,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Override the round-trip cap
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    fn tool_definitions() -> Vec<ToolDefinition> {
        vec![ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: SEARCH_FILES_TOOL.to_string(),
                description: "Search the file index for files whose name contains the pattern"
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "pattern": {
                            "type": "string",
                            "description": "Keyword to search file names for"
                        }
                    },
                    "required": ["pattern"]
                }),
            },
        }]
    }

    async fn execute_tool_call(&self, call: &ToolInvocation) -> Result<String> {
        if call.function.name != SEARCH_FILES_TOOL {
            return Err(AgentError::UnknownTool {
                name: call.function.name.clone(),
            }
            .into());
        }

        let args: SearchArgs = serde_json::from_str(&call.function.arguments)?;
        debug!("searching file index for pattern {:?}", args.pattern);

        let matches = self.resources.search_files(&args.pattern).await?;
        Ok(serde_json::to_string(&matches)?)
    }

    async fn run_to_completion(&self, query: &str) -> Result<String> {
        let mut messages = vec![
            LlmMessage::system(ORCHESTRATOR_INSTRUCTIONS),
            LlmMessage::user(query),
        ];

        for _ in 0..self.max_steps {
            let response = self
                .llm
                .chat(messages.clone(), Some(Self::tool_definitions()))
                .await?;

            let message = response.message;
            if message.tool_calls().is_empty() {
                return Ok(message.content.unwrap_or_default());
            }

            let calls = message.tool_calls().to_vec();
            messages.push(message);
            for call in &calls {
                let result = match self.execute_tool_call(call).await {
                    Ok(result) => result,
                    // Hand tool failures back to the model instead of
                    // aborting the turn; it can rephrase or apologize.
                    Err(e) => format!("tool error: {}", e),
                };
                messages.push(LlmMessage::tool(call.id.clone(), result));
            }
        }

        Err(AgentError::MaxStepsExceeded {
            max_steps: self.max_steps,
        }
        .into())
    }
}

#[async_trait]
impl QueryRunner for Orchestrator {
    async fn run(&self, query: &str) -> Result<String> {
        self.run_to_completion(query).await
    }
}
