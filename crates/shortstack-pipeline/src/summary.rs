//! Groq chat-completions client for transcript summarization.
//!
//! Produces a short script for the most engaging ~30-second span of a
//! transcript. The result is display-only: nothing downstream of the video
//! pipeline consumes it (see DESIGN.md).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_MODEL: &str = "llama3-8b-8192";

/// Groq API client (OpenAI-compatible chat completions).
pub struct SummaryClient {
    api_key: String,
    client: Client,
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
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl SummaryClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Extract a short script from a transcript.
    ///
    /// Returns the completion text trimmed of surrounding whitespace.
    pub async fn generate_short_script(&self, transcript: &str) -> PipelineResult<String> {
        let prompt = build_prompt(transcript);
        debug!("Requesting short script from Groq model {}", GROQ_MODEL);

        let request = ChatRequest {
            model: GROQ_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::summary(format!("Groq request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::summary(format!(
                "Groq API returned {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::summary(format!("Failed to parse Groq response: {}", e)))?;

        extract_content(chat)
    }
}

fn build_prompt(transcript: &str) -> String {
    format!(
        "Extract the most interesting 30-second part from this transcript for a YouTube Short:\n\
         {transcript}\n\
         Respond ONLY with the short script text.\n"
    )
}

fn extract_content(chat: ChatResponse) -> PipelineResult<String> {
    chat.choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .ok_or_else(|| PipelineError::summary("No choices in Groq response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_transcript() {
        let prompt = build_prompt("hello world");
        assert!(prompt.contains("hello world"));
        assert!(prompt.contains("30-second"));
    }

    #[test]
    fn test_extract_content_trims_whitespace() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{ "choices": [ { "message": { "content": "  a punchy script \n" } } ] }"#,
        )
        .unwrap();
        assert_eq!(extract_content(chat).unwrap(), "a punchy script");
    }

    #[test]
    fn test_extract_content_no_choices() {
        let chat: ChatResponse = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
        assert!(extract_content(chat).is_err());
    }
}
