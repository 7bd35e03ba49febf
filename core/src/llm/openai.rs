//! OpenAI-compatible chat-completions client

use crate::config::ResolvedLlmConfig;
use crate::error::{LlmError, Result};
use crate::llm::{LlmClient, LlmMessage, LlmResponse, ToolDefinition, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Client for any OpenAI-compatible chat-completions endpoint
pub struct OpenAiCompatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    params: crate::config::ModelParams,
    headers: HashMap<String, String>,
}

impl OpenAiCompatClient {
    /// Create a new client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key configured".to_string(),
            }
            .into());
        }

        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            params: config.params.clone(),
            headers: config.headers.clone(),
        })
    }

    fn build_request(
        &self,
        messages: Vec<LlmMessage>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            tools,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
        }
    }

    fn convert_response(&self, mut response: ChatCompletionResponse) -> Result<LlmResponse> {
        if response.choices.is_empty() {
            return Err(LlmError::InvalidRequest {
                message: "Response contained no choices".to_string(),
            }
            .into());
        }

        let choice = response.choices.remove(0);
        Ok(LlmResponse {
            message: choice.message,
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    async fn chat(
        &self,
        messages: Vec<LlmMessage>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<LlmResponse> {
        let request = self.build_request(messages, tools);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json");

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        let response = builder.json(&request).send().await.map_err(|e| {
            LlmError::Network {
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status,
                message: error_text,
            }
            .into());
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| LlmError::Network {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.convert_response(completion)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: LlmMessage,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    fn client() -> OpenAiCompatClient {
        let config =
            ResolvedLlmConfig::new("https://api.openai.com/v1/", "test-key", "gpt-4o");
        OpenAiCompatClient::new(&config).unwrap()
    }

    #[test]
    fn rejects_empty_api_key() {
        let config = ResolvedLlmConfig::new("https://api.openai.com/v1", "", "gpt-4o");
        assert!(OpenAiCompatClient::new(&config).is_err());
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        assert_eq!(client().base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn parses_text_response() {
        let raw = r#"{
            "model": "gpt-4o",
            "choices": [{
                "message": {"role": "assistant", "content": "No files found"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let response = client().convert_response(completion).unwrap();

        assert_eq!(response.message.role, MessageRole::Assistant);
        assert_eq!(response.message.content.as_deref(), Some("No files found"));
        assert!(response.message.tool_calls().is_empty());
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn parses_tool_call_response() {
        let raw = r#"{
            "model": "gpt-4o",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "search_files", "arguments": "{\"pattern\":\"report\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": null
        }"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let response = client().convert_response(completion).unwrap();

        let calls = response.message.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "search_files");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let raw = r#"{"model": "gpt-4o", "choices": [], "usage": null}"#;
        let completion: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(client().convert_response(completion).is_err());
    }
}
