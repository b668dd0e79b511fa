//! Model Provider Abstraction
//!
//! A small interface over hosted generative-model APIs. The default backend is
//! Google's Gemini `generateContent` endpoint; an OpenAI-compatible
//! chat-completions backend is available for other hosts and local servers.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub mod profile;

pub use profile::{ProviderConfig, ProviderType};

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Resolved provider, credentials included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelProvider {
    Gemini {
        model: String,
        api_key: String,
        base_url: Option<String>, // Default: GEMINI_DEFAULT_BASE_URL
    },
    OpenAI {
        model: String,
        api_key: String,
        base_url: Option<String>, // For compatible hosts and local servers
    },
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Completion options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: Option<f32>, // Provider default when unset
    pub max_tokens: Option<u32>,
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Generate a completion from a list of messages
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

// Transport-level failures (no HTTP status available)
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        map_status_error(status, &error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status_error(status: StatusCode, body: &str) -> ApiError {
    match status.as_u16() {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", body)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", body)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", body)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

async fn error_for_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    map_status_error(status, &error_text)
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_provider_http_client(request_timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

// Gemini generateContent request/response structures
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = build_provider_http_client(request_timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| GEMINI_DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for msg in messages {
            match msg.role {
                MessageRole::System => system_parts.push(GeminiPart { text: msg.content }),
                MessageRole::User => contents.push(GeminiContent {
                    role: Some("user"),
                    parts: vec![GeminiPart { text: msg.content }],
                }),
                MessageRole::Assistant => contents.push(GeminiContent {
                    role: Some("model"),
                    parts: vec![GeminiPart { text: msg.content }],
                }),
            }
        }

        let generation_config = if options.temperature.is_some() || options.max_tokens.is_some() {
            Some(GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            })
        } else {
            None
        };

        let request = GenerateContentRequest {
            contents,
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(GeminiContent {
                    role: None,
                    parts: system_parts,
                })
            },
            generation_config,
        };

        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "Sending generateContent request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let candidate = match completion.candidates.first() {
            Some(candidate) => candidate,
            None => {
                let reason = completion
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "unspecified".to_string());
                return Err(ApiError::ProviderError(format!(
                    "No candidates in response (block reason: {})",
                    reason
                )));
            }
        };

        // A candidate may be split across several parts; the text is their concatenation.
        let content: String = candidate
            .content
            .as_ref()
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();

        let usage = completion.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: completion.model_version.unwrap_or_else(|| self.model.clone()),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
            finish_reason: candidate.finish_reason.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// OpenAI-compatible API request/response structures
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn role_to_string(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

/// OpenAI-compatible provider client
pub struct OpenAIClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = build_provider_http_client(request_timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl ModelProviderClient for OpenAIClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let openai_messages: Vec<OpenAIMessage> = messages
            .into_iter()
            .map(|msg| OpenAIMessage {
                role: role_to_string(msg.role).to_string(),
                content: Some(msg.content),
            })
            .collect();

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: openai_messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "Sending chat completion request");
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            return Err(error_for_response(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .first()
            .ok_or_else(|| ApiError::ProviderError("No choices in response".to_string()))?;

        let usage = completion.usage.unwrap_or(Usage {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
        });

        Ok(CompletionResponse {
            content: choice.message.content.clone().unwrap_or_default(),
            model: completion.model,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
            finish_reason: choice.finish_reason.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Builds clients from resolved provider definitions
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        provider: &ModelProvider,
        request_timeout: Duration,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        match provider {
            ModelProvider::Gemini {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(GeminiClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                request_timeout,
            )?)),
            ModelProvider::OpenAI {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(OpenAIClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                request_timeout,
            )?)),
        }
    }

    /// Resolve the API key from the environment and build the configured client.
    pub fn from_config(config: &ProviderConfig) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        let api_key = config.resolve_api_key()?;
        let provider = config.to_model_provider(api_key);
        Self::create_client(&provider, Duration::from_secs(config.timeout_secs))
    }
}
