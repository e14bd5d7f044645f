/// OpenAI-compatible API client for speaker announcements.
///
/// One prompt in, one block of text out. No streaming, no tool calls.
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Configuration for the LLM endpoint.
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Pull the announcement text out of a completion response.
fn extract_text(response: ChatCompletionResponse) -> Result<String, String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or("No choices in LLM response")?;

    let text = choice.message.content.unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err("LLM returned an empty announcement".to_string());
    }
    Ok(text.to_string())
}

/// Send one HTTP request to the LLM.
async fn send_chat_request(client: &Client, config: &LlmConfig, prompt: &str) -> Result<String, String> {
    let request = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage {
            role: "user",
            content: prompt.to_string(),
        }],
        temperature: config.temperature,
        max_tokens: 1000,
    };

    let url = format!("{}/v1/chat/completions", config.endpoint.trim_end_matches('/'));

    let mut req_builder = client.post(&url).json(&request);
    if let Some(ref key) = config.api_key {
        req_builder = req_builder.bearer_auth(key);
    }

    let resp = req_builder.send().await.map_err(|e| format!("HTTP request failed: {e}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        return Err(format!("LLM API returned {status}: {snippet}"));
    }

    let data: ChatCompletionResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse LLM response JSON: {e}"))?;

    extract_text(data)
}

/// Generate an announcement, retrying on failure.
///
/// Retries up to `max_retries` times with a 1-second delay between attempts.
pub async fn generate_announcement(
    client: &Client,
    config: &LlmConfig,
    prompt: &str,
    max_retries: usize,
) -> Result<String, String> {
    let mut last_err = String::new();
    for attempt in 0..=max_retries {
        match send_chat_request(client, config, prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                last_err = e;
                if attempt < max_retries {
                    tracing::warn!(attempt = attempt + 1, max_retries, error = %last_err, "announcement request failed, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }

    Err(last_err)
}
