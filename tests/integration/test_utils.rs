//! Shared test utilities for integration tests
//!
//! Scripted providers, a no-wait sleeper, input fixtures, and a one-shot HTTP
//! server that answers a single request with a canned response.

use async_trait::async_trait;
use casegen::error::ApiError;
use casegen::generation::Sleeper;
use casegen::prompt::InputPaths;
use casegen::provider::{
    ChatMessage, CompletionOptions, CompletionResponse, ModelProviderClient, TokenUsage,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Replays a fixed script of completions; `None` entries fail the call.
/// Prompts received are recorded for inspection.
#[derive(Clone)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<Option<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Option<&str>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                script.into_iter().map(|s| s.map(String::from)).collect(),
            )),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let prompt = messages
            .into_iter()
            .map(|m| m.content)
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        match self.script.lock().unwrap().pop_front().flatten() {
            Some(content) => Ok(CompletionResponse {
                content,
                model: "scripted-model".to_string(),
                usage: TokenUsage::default(),
                finish_reason: Some("STOP".to_string()),
            }),
            None => Err(ApiError::ProviderRateLimit("scripted failure".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Records requested waits and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// Write a prompt template and a specification into `dir`.
pub fn write_inputs(dir: &Path, template: &str, spec: &str) -> InputPaths {
    let prompt_file = dir.join("prompt_template.txt");
    let spec_file = dir.join("spec.txt");
    std::fs::write(&prompt_file, template).unwrap();
    std::fs::write(&spec_file, spec).unwrap();
    InputPaths {
        prompt_file,
        spec_file,
    }
}

/// A JSON array with `count` complete test cases.
pub fn complete_cases_json(count: usize) -> String {
    let cases: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": format!("TC-{:03}", i),
                "title": format!("Case {}", i),
                "description": "Generated scenario",
                "priority": "High",
                "type": "Functional",
                "preconditions": "None",
                "steps": ["Open the page", "Do the thing"],
                "expected_result": "It works"
            })
        })
        .collect();
    serde_json::Value::Array(cases).to_string()
}

/// Gemini `generateContent` response body whose single candidate carries `text`.
pub fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 34,
            "totalTokenCount": 46
        },
        "modelVersion": "gemini-1.5-flash-002"
    })
    .to_string()
}

/// One-shot HTTP server bound to an ephemeral local port.
pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl CannedServer {
    /// Serve exactly one request, answering with `status` and `body`.
    pub async fn start(status: u16, reason: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    /// The raw request the server received (headers and body).
    pub async fn received(self) -> String {
        self.handle.await.unwrap()
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}
