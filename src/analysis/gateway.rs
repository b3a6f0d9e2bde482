//! Transport gateway: one bounded remote call per analysis. Every failure
//! path, timeout included, degrades to the local fallback generator instead
//! of surfacing an error.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::fallback;
use super::types::AnalysisRequest;

/// Gateway configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base address of the remote analysis service
    pub base_url: String,
    /// Timeout for text analysis requests
    pub text_timeout_secs: u64,
    /// Timeout for document analysis requests
    pub file_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            text_timeout_secs: 5,
            file_timeout_secs: 10,
        }
    }
}

impl GatewayConfig {
    /// Read the endpoint from BACKEND_URL, keeping the default when unset
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("BACKEND_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// Client for the remote sentiment service
pub struct RemoteClient {
    config: GatewayConfig,
}

impl RemoteClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    /// Run one analysis, degrading to the fallback generator on any failure.
    ///
    /// The caller always receives a result-shaped object; no retry is
    /// attempted, keeping worst-case latency to one timeout interval.
    pub fn analyze(&self, request: &AnalysisRequest) -> Value {
        match self.call_remote(request) {
            Ok(body) => {
                log::info!("received analysis from backend");
                body
            }
            Err(e) => {
                log::warn!("backend unavailable ({:#}), using demo mode", e);
                fallback::generate(request)
            }
        }
    }

    fn call_remote(&self, request: &AnalysisRequest) -> Result<Value> {
        match request {
            AnalysisRequest::Text { text } => self.predict_text(text),
            AnalysisRequest::Document { bytes, file_name } => self.predict_file(bytes, file_name),
        }
    }

    fn predict_text(&self, text: &str) -> Result<Value> {
        let url = format!("{}/api/sentiment/predict-text", self.config.base_url);
        let body = serde_json::to_string(&serde_json::json!({ "text": text }))
            .context("failed to serialize request")?;

        log::debug!("sending text analysis request to {}", url);

        let response = ureq::post(&url)
            .set("Content-Type", "application/json")
            .timeout(Duration::from_secs(self.config.text_timeout_secs))
            .send_string(&body)
            .context("failed to call analysis backend")?;

        parse_body(response)
    }

    fn predict_file(&self, bytes: &[u8], file_name: &str) -> Result<Value> {
        let url = format!("{}/api/sentiment/predict-file", self.config.base_url);
        let boundary = format!("----versemood-{}", Uuid::new_v4().simple());
        let body = build_multipart(&boundary, "file", file_name, "application/pdf", bytes);

        log::debug!("sending file analysis request to {}", url);

        let response = ureq::post(&url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", boundary),
            )
            .timeout(Duration::from_secs(self.config.file_timeout_secs))
            .send_bytes(&body)
            .context("failed to call analysis backend")?;

        parse_body(response)
    }
}

fn parse_body(response: ureq::Response) -> Result<Value> {
    let text = response
        .into_string()
        .context("failed to read backend response")?;
    serde_json::from_str(&text).context("failed to parse backend response")
}

/// ureq has no multipart support; one file part is simple enough to build
fn build_multipart(
    boundary: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.text_timeout_secs, 5);
        assert_eq!(config.file_timeout_secs, 10);
    }

    #[test]
    fn test_multipart_body_layout() {
        let body = build_multipart("----b", "file", "psalms.pdf", "application/pdf", b"%PDF");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("------b\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"psalms.pdf\""));
        assert!(text.contains("Content-Type: application/pdf\r\n\r\n%PDF"));
        assert!(text.ends_with("\r\n------b--\r\n"));
    }

    #[test]
    fn test_unreachable_backend_falls_back() {
        // Discard port; the connection is refused immediately
        let client = RemoteClient::new(GatewayConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GatewayConfig::default()
        });
        let request = AnalysisRequest::Text {
            text: "He restores my soul.".to_string(),
        };
        let raw = client.analyze(&request);
        assert_eq!(raw["demo_mode"], serde_json::json!(true));
        assert_eq!(raw["input_text"], serde_json::json!("He restores my soul."));
    }
}
