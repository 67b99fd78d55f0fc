//! GeminiChatGateway - Direct REST API implementation for Gemini.
//!
//! Each call sends the system instruction, the replayed history and the new
//! user input to `generateContent` and waits for the complete reply. Nothing
//! is kept between calls.

use std::time::Duration;

use docent_core::gateway::{
    ChatGateway, ChatGatewayFactory, ChatRequest, GenerationConfig, SafetySetting,
    default_safety_settings,
};
use docent_core::session::{ConversationMessage, MessageRole};
use docent_core::{DocentError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiChatGateway {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiChatGateway {
    /// Creates a new gateway with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }

    /// Points the gateway at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }

    fn build_request(&self, request: ChatRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request.history.iter().map(Content::from).collect();
        contents.push(Content {
            role: Some(USER_ROLE.to_string()),
            parts: vec![Part {
                text: request.user_input,
            }],
        });

        let system_instruction = Some(Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction,
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: self.generation_config.clone(),
            safety_settings: self.safety_settings.clone(),
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                DocentError::remote(
                    None,
                    format!("Gemini API request failed: {}", err.without_url()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            DocentError::remote(
                None,
                format!("Failed to parse Gemini response: {}", err.without_url()),
            )
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait::async_trait]
impl ChatGateway for GeminiChatGateway {
    async fn generate(&self, request: ChatRequest) -> Result<String> {
        tracing::debug!(
            "[GeminiChatGateway] generateContent model={} history={} instruction_chars={}",
            self.model,
            request.history.len(),
            request.system_instruction.chars().count()
        );

        let body = self.build_request(request);
        let result = self.send_request(&body).await;

        match &result {
            Ok(text) => tracing::debug!(
                "[GeminiChatGateway] Reply received ({} chars)",
                text.chars().count()
            ),
            Err(e) => tracing::warn!("[GeminiChatGateway] Call failed: {}", e),
        }
        result
    }
}

/// Builds one [`GeminiChatGateway`] per turn, sharing a single HTTP client.
#[derive(Clone)]
pub struct GeminiGatewayFactory {
    client: Client,
    model: String,
    base_url: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiGatewayFactory {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }

    /// Bounds every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocentError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ChatGatewayFactory for GeminiGatewayFactory {
    fn connect(&self, api_key: &str) -> Result<Box<dyn ChatGateway>> {
        let gateway = GeminiChatGateway::new(api_key, self.model.clone())
            .with_client(self.client.clone())
            .with_base_url(self.base_url.clone())
            .with_generation_config(self.generation_config.clone())
            .with_safety_settings(self.safety_settings.clone());
        Ok(Box::new(gateway))
    }
}

const USER_ROLE: &str = "user";
const MODEL_ROLE: &str = "model";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl From<&ConversationMessage> for Content {
    fn from(message: &ConversationMessage) -> Self {
        let role = match message.role {
            MessageRole::User => USER_ROLE,
            MessageRole::Assistant => MODEL_ROLE,
        };
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: message.content.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(DocentError::remote(
            None,
            format!("Gemini API blocked the prompt: {reason}"),
        ));
    }

    let Some(candidate) = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
    else {
        return Err(DocentError::remote(None, "Gemini API returned no candidates"));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let message = match candidate.finish_reason {
            Some(reason) => format!("Gemini API returned no text (finish reason: {reason})"),
            None => "Gemini API returned no text in the response candidates".to_string(),
        };
        return Err(DocentError::remote(None, message));
    }

    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> DocentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    DocentError::remote(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn request_json(history: Vec<ConversationMessage>) -> Value {
        let gateway = GeminiChatGateway::new("test-key", "gemini-2.0-flash");
        let body = gateway.build_request(ChatRequest {
            system_instruction: "Answer from the reference text.".to_string(),
            history,
            user_input: "색온도 범위는?".to_string(),
        });
        serde_json::to_value(&body).unwrap()
    }

    #[test]
    fn test_request_replays_history_with_gemini_roles() {
        let value = request_json(vec![
            ConversationMessage::user("안녕하세요"),
            ConversationMessage::assistant("무엇을 도와드릴까요?"),
        ]);

        let contents = value["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "안녕하세요");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "색온도 범위는?");
    }

    #[test]
    fn test_request_carries_instruction_and_settings() {
        let value = request_json(vec![]);

        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "Answer from the reference text."
        );
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["generationConfig"]["topK"], 32);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(value["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            value["safetySettings"][3],
            json!({
                "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                "threshold": "BLOCK_MEDIUM_AND_ABOVE"
            })
        );
    }

    fn parse(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_concatenates_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "3000K" }, { "text": "~6500K" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_text_response(response).unwrap(), "3000K~6500K");
    }

    #[test]
    fn test_extract_reports_blocked_prompt() {
        let response = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        let err = extract_text_response(response).unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_reports_safety_finish_without_text() {
        let response = parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
        let err = extract_text_response(response).unwrap_err();
        assert!(err.to_string().contains("finish reason: SAFETY"));
    }

    #[test]
    fn test_extract_reports_missing_candidates() {
        let err = extract_text_response(parse(json!({}))).unwrap_err();
        assert!(err.is_remote());
    }

    #[test]
    fn test_map_http_error_uses_google_envelope() {
        let body = json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })
        .to_string();

        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(
            err,
            DocentError::remote(Some(429), "RESOURCE_EXHAUSTED: Quota exceeded")
        );
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err, DocentError::remote(Some(502), "upstream down"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_remote_error() {
        let factory = GeminiGatewayFactory::new("gemini-2.0-flash")
            .with_base_url("http://127.0.0.1:9/v1beta/models");
        let gateway = factory.connect("test-key").unwrap();

        let err = gateway
            .generate(ChatRequest {
                system_instruction: "x".into(),
                history: vec![],
                user_input: "y".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_remote());
        assert!(!err.to_string().contains("test-key"));
    }
}
