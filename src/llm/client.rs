use crate::error::{FinancialDocumentError, Result};
use crate::llm::config::GatewayConfig;
use crate::llm::types::*;
use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Blocking HTTP client for a local Ollama instance. One attempt per call,
/// bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                FinancialDocumentError::InvalidConfig(format!("HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        debug!(
            "POST {} (model {}, prompt {} chars)",
            url,
            model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let (status, response) = Self::check_status(response)?;
        let parsed: GenerateResponse = self.read_json(status, response)?;

        Ok(parsed.response)
    }

    /// Names of the models available on the server.
    pub fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let (status, response) = Self::check_status(response)?;
        let parsed: TagsResponse = self.read_json(status, response)?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    pub fn is_model_available(&self, model: &str) -> Result<bool> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| m.starts_with(model)))
    }

    fn check_status(response: Response) -> Result<(u16, Response)> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!("Inference service returned status {}", status);
            return Err(FinancialDocumentError::Upstream {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                },
            });
        }
        Ok((status.as_u16(), response))
    }

    /// Reading the body is still transport; only a body that arrives but
    /// cannot be decoded is an upstream error.
    fn read_json<T: DeserializeOwned>(&self, status: u16, response: Response) -> Result<T> {
        let body = response.text().map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| FinancialDocumentError::Upstream {
            status,
            message: format!("unreadable response body: {}", e),
        })
    }

    /// Connection failures and timeouts both mean the service is unavailable.
    fn transport_error(&self, e: reqwest::Error) -> FinancialDocumentError {
        let reason = if e.is_timeout() {
            format!("no response within {}s", self.timeout_secs)
        } else if e.is_connect() {
            format!("could not connect: {}", e)
        } else if e.is_builder() {
            return FinancialDocumentError::InvalidConfig(format!(
                "invalid endpoint '{}': {}",
                self.base_url, e
            ));
        } else {
            e.to_string()
        };

        warn!("Inference service unavailable at {}: {}", self.base_url, reason);
        FinancialDocumentError::ServiceUnavailable {
            endpoint: self.base_url.clone(),
            reason,
        }
    }
}
