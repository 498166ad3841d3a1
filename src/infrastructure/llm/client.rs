//! # LLM Client
//!
//! Minimal client for OpenAI-compatible chat-completions APIs (OpenAI, Groq,
//! XAI and other drop-in endpoints). Configured from the `agent` section of
//! the application config.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::config::AgentConfig;
use crate::domain::traits::LlmProvider;

/// HTTP client reused across requests
fn http_client() -> &'static Client {
    use std::sync::OnceLock;
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client")
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

pub struct LlmClient {
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Option<u64>,
}

impl LlmClient {
    /// Build a client from the agent config. Fails when no API key is
    /// reachable, in which case the host should run without the agent skill.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let api_key = if let Some(key) = &config.api_key {
            key.clone()
        } else if let Some(env_var) = &config.api_key_env {
            std::env::var(env_var)
                .map_err(|_| anyhow!("API key env var {} not set", env_var))?
        } else {
            return Err(anyhow!(
                "No API key configured - set agent.api_key or agent.api_key_env"
            ));
        };

        Ok(Self {
            api_key,
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: config.model.clone(),
            timeout: config.timeout,
        })
    }

    async fn chat(&self, prompt: &str) -> Result<String, String> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let mut builder = http_client()
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(timeout_secs) = self.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(timeout_secs));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            // Surface the API's own error message when present.
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
                if let Some(message) = error_json
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                {
                    return Err(message.to_string());
                }
            }

            return Err(format!("HTTP {status}: {error_text}"));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| "No choices in response".to_string())
    }
}

#[async_trait]
impl LlmProvider for LlmClient {
    async fn completion(&self, prompt: &str) -> Result<String, String> {
        self.chat(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_an_error() {
        let config = AgentConfig {
            api_key: None,
            api_key_env: None,
            ..AgentConfig::default()
        };
        assert!(LlmClient::from_config(&config).is_err());
    }

    #[test]
    fn test_inline_api_key_and_default_endpoint() {
        let config = AgentConfig {
            api_key: Some("sk-test".to_string()),
            ..AgentConfig::default()
        };
        let client = LlmClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint, "https://api.openai.com/v1");
        assert_eq!(client.model, "gpt-4o-mini");
    }
}
