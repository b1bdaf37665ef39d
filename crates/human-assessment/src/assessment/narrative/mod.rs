//! Narrative report generation behind an external text-generation service.

mod prompt;
mod provider;
mod service;

pub use prompt::build_prompt;
pub use provider::{
    provider_from_config, NarrativeProvider, NarrativeRequest, OpenAiCompatibleProvider,
    UnconfiguredProvider,
};
pub use service::{fallback_message, Narrative, NarrativeService, NarrativeSource};

use std::time::Duration;

/// Failure talking to the text-generation service. Always absorbed into a fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrativeServiceError {
    #[error("narrative service timed out after {0:?}")]
    Timeout(Duration),
    #[error("narrative service unreachable: {0}")]
    Transport(String),
    #[error("narrative service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("narrative service response malformed: {0}")]
    MalformedResponse(String),
    #[error("narrative service returned no text")]
    EmptyResponse,
    #[error("narrative service is not configured (NARRATIVE_API_KEY unset)")]
    Unconfigured,
}
