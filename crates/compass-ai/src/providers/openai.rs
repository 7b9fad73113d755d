use crate::analyzer::PositioningAnalyzer;
use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

/// OpenAI chat-completions provider.
#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
        max_tokens: Option<usize>,
        temperature: Option<f32>,
    ) -> Result<Self> {
        let timeout = timeout_secs.unwrap_or(120);
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| "gpt-4".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client,
            max_tokens,
            temperature,
        })
    }

    async fn call_api(&self, prompt: &str) -> Result<String> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: crate::prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling completion API"
        );

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await
            .context("Failed to send request to completion API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "Completion API request failed"
            );
            anyhow::bail!("Completion API error {}: {}", status, body);
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .context("Failed to parse completion API response")?;

        tracing::debug!(
            usage = ?chat_resp.usage,
            "Completion API response received"
        );

        chat_resp
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("Empty response from completion API"))
    }
}

#[async_trait]
impl PositioningAnalyzer for OpenAiProvider {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn analyze(&self, competitor_name: &str) -> Result<String> {
        tracing::info!(competitor = %competitor_name, "Analyzing market positioning");

        let prompt = crate::prompt::build_positioning_prompt(competitor_name);
        let content = self.call_api(&prompt).await?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_gpt4_against_openai() {
        let provider =
            OpenAiProvider::new("sk-test".to_string(), None, None, None, None, None)
                .expect("provider should build");
        assert_eq!(provider.provider(), "openai");
        assert_eq!(provider.model_name(), "gpt-4");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn honors_model_and_base_url_overrides() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            Some("gpt-4o-mini".to_string()),
            Some("https://proxy.internal/v1".to_string()),
            Some(10),
            Some(256),
            Some(0.3),
        )
        .expect("provider should build");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
        assert_eq!(provider.base_url, "https://proxy.internal/v1");
    }
}
