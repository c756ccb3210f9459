//! # Ollama Text Generation Client
//!
//! File: cli/src/assistant/ollama.rs
//!
//! Non-streaming client for a local Ollama server's `/api/generate` endpoint.
//!
use crate::assistant::TextGenerator;
use crate::core::config::AssistantConfig;
use crate::core::error::AssistantError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize, Debug)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hotelbot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };
        debug!(model = %self.model, url = %self.generate_url(), "Sending generate request");

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::testing::unreachable_endpoint;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// True once the headers and `Content-Length` bytes of body have arrived.
    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + length
    }

    /// Answers a single HTTP request with `status_line` and a JSON `body`.
    /// Returns the endpoint and a receiver for the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let reply = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        });

        (endpoint, rx)
    }

    fn client_for(endpoint: &str) -> OllamaClient {
        OllamaClient::new(&AssistantConfig {
            endpoint: endpoint.to_string(),
            model: "llama3".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_response_field() {
        let (endpoint, request) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"model":"llama3","response":"Lovely! And your dates?","done":true}"#,
        )
        .await;
        let reply = client_for(&endpoint).generate("Rephrase this").await.unwrap();
        assert_eq!(reply, "Lovely! And your dates?");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /api/generate HTTP/1.1"));
        assert!(request.contains(r#""prompt":"Rephrase this""#));
        assert!(request.contains(r#""stream":false"#));
    }

    #[tokio::test]
    async fn test_generate_maps_error_status() {
        let (endpoint, _request) =
            serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error":"model not loaded"}"#).await;
        let err = client_for(&endpoint).generate("Hi").await.unwrap_err();
        match err {
            AssistantError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("model not loaded"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_body_without_response() {
        let (endpoint, _request) = serve_once("HTTP/1.1 200 OK", r#"{"done":true}"#).await;
        let err = client_for(&endpoint).generate("Hi").await.unwrap_err();
        assert!(matches!(err, AssistantError::Http { .. }));
    }

    #[tokio::test]
    async fn test_generate_reports_connection_failure() {
        let endpoint = unreachable_endpoint().await;
        let err = client_for(&endpoint).generate("Hi").await.unwrap_err();
        assert!(matches!(err, AssistantError::Http { .. }));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "llama3",
            prompt: "Hi",
            stream: false,
            options: GenerateOptions { temperature: 0.5 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3",
                "prompt": "Hi",
                "stream": false,
                "options": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn test_response_parsing_ignores_extra_fields() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"model":"llama3","response":"3. How many guests?","done":true}"#,
        )
        .unwrap();
        assert_eq!(parsed.response, "3. How many guests?");
    }

    #[test]
    fn test_client_uses_config() {
        let config = AssistantConfig {
            endpoint: "http://localhost:11434/".into(),
            model: "mistral".into(),
            ..Default::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        assert_eq!(client.generate_url(), "http://localhost:11434/api/generate");
        assert_eq!(client.model_name(), "mistral");
    }
}
