use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::provider::{NarrativeProvider, NarrativeRequest};
use super::NarrativeServiceError;
use crate::config::NarrativeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

/// Narrative text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Narrative {
    pub fn is_fallback(&self) -> bool {
        self.source == NarrativeSource::Fallback
    }
}

pub fn fallback_message(contact_email: &str) -> String {
    format!(
        "AI analysis temporarily unavailable. Please contact {contact_email} for your \
         personalized assessment."
    )
}

/// Wraps a [`NarrativeProvider`] so callers always get text back.
///
/// Every failure, including an elapsed deadline, is logged and replaced by the
/// fixed fallback message naming the business contact address.
#[derive(Clone)]
pub struct NarrativeService {
    provider: Arc<dyn NarrativeProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    contact_email: String,
}

impl NarrativeService {
    pub fn new(
        provider: Arc<dyn NarrativeProvider>,
        config: &NarrativeConfig,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            contact_email: contact_email.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fallback_text(&self) -> String {
        fallback_message(&self.contact_email)
    }

    pub async fn narrate(&self, prompt: String) -> Narrative {
        let request = NarrativeRequest {
            model: self.model.clone(),
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        match self.generate(&request).await {
            Ok(text) => {
                info!(model = %request.model, chars = text.len(), "narrative generated");
                Narrative {
                    text,
                    source: NarrativeSource::Generated,
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "narrative unavailable; returning fallback");
                Narrative {
                    text: self.fallback_text(),
                    source: NarrativeSource::Fallback,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        tokio::time::timeout(self.timeout, self.provider.generate(request))
            .await
            .map_err(|_| NarrativeServiceError::Timeout(self.timeout))?
    }
}

impl std::fmt::Debug for NarrativeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeService")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("contact_email", &self.contact_email)
            .finish_non_exhaustive()
    }
}
