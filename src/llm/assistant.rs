use crate::error::Result;
#[cfg(feature = "ollama")]
use crate::llm::{client::OllamaClient, config::GatewayConfig, prompts::build_prompt};

/// Answers a free-text question from a document's text.
///
/// Implementations hold no state between calls.
pub trait QaGateway {
    fn ask(&self, question: &str, context: &str) -> Result<String>;
}

/// Question answering backed by a local Ollama model.
#[cfg(feature = "ollama")]
#[derive(Debug, Clone)]
pub struct DocumentAssistant {
    client: OllamaClient,
    config: GatewayConfig,
}

#[cfg(feature = "ollama")]
impl DocumentAssistant {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = OllamaClient::new(&config)?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn client(&self) -> &OllamaClient {
        &self.client
    }
}

#[cfg(feature = "ollama")]
impl QaGateway for DocumentAssistant {
    /// Ask a question about the document text.
    ///
    /// # Arguments
    /// * `question` - The user's question, embedded verbatim
    /// * `context` - Document text, truncated to the configured budget
    fn ask(&self, question: &str, context: &str) -> Result<String> {
        let prompt = build_prompt(question, context, self.config.max_context_chars);
        self.client.generate(&self.config.model, &prompt)
    }
}
