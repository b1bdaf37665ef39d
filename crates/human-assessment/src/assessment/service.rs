use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::answers::{AnswerSet, ParticipantProfile};
use super::flow::{StepSubmission, SurveySession};
use super::narrative::{
    build_prompt, provider_from_config, NarrativeProvider, NarrativeService, NarrativeSource,
};
use super::scoring::{CategoryScore, ScoreBreakdown, ScoreCard, ScoringEngine, ScoringError};
use crate::config::{AppConfig, BusinessProfile};

/// Scoring engine, narrative service and business profile composed for callers.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    engine: ScoringEngine,
    narrator: NarrativeService,
    business: BusinessProfile,
}

impl AssessmentService {
    pub fn new(narrator: NarrativeService, business: BusinessProfile) -> Self {
        Self {
            engine: ScoringEngine::new(),
            narrator,
            business,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let provider = provider_from_config(&config.narrative);
        Self::with_provider(provider, config)
    }

    pub fn with_provider(provider: Arc<dyn NarrativeProvider>, config: &AppConfig) -> Self {
        let narrator = NarrativeService::new(
            provider,
            &config.narrative,
            config.business.contact_email.as_str(),
        );
        Self::new(narrator, config.business.clone())
    }

    pub fn business(&self) -> &BusinessProfile {
        &self.business
    }

    pub fn narrator(&self) -> &NarrativeService {
        &self.narrator
    }

    pub fn score(&self, answers: &AnswerSet) -> Result<ScoreCard, ScoringError> {
        self.engine.evaluate(answers)
    }

    /// Scores the answers and attaches a narrative.
    ///
    /// Scoring failures abort the report. Narrative failures never do: the
    /// report then carries the fallback text and the failure reason in `errors`.
    pub async fn report(
        &self,
        profile: &ParticipantProfile,
        answers: &AnswerSet,
    ) -> Result<AssessmentReport, ScoringError> {
        let card = self.engine.evaluate(answers)?;
        let prompt = build_prompt(profile, &card.scores, answers, &self.business.brand_message);
        let narrative = self.narrator.narrate(prompt).await;

        info!(
            participant = %profile.full_name(),
            overall = card.scores.overall,
            narrative_source = ?narrative.source,
            "assessment report assembled"
        );

        Ok(AssessmentReport {
            participant: profile.clone(),
            scores: card.scores,
            breakdown: card.breakdown,
            narrative: narrative.text,
            narrative_source: narrative.source,
            errors: narrative.error.into_iter().collect(),
            call_to_action: CallToAction::from(&self.business),
            generated_at: Utc::now(),
        })
    }
}

/// Results page payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub participant: ParticipantProfile,
    pub scores: CategoryScore,
    pub breakdown: ScoreBreakdown,
    pub narrative: String,
    pub narrative_source: NarrativeSource,
    #[serde(default)]
    pub errors: Vec<String>,
    pub call_to_action: CallToAction,
    pub generated_at: DateTime<Utc>,
}

/// Strategy-session booking details shown beneath the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub business_name: String,
    pub coach_name: String,
    pub contact_email: String,
    pub phone: String,
    pub website: String,
    pub calendar_link: String,
    pub service_price: String,
}

impl From<&BusinessProfile> for CallToAction {
    fn from(business: &BusinessProfile) -> Self {
        Self {
            business_name: business.business_name.clone(),
            coach_name: business.coach_name.clone(),
            contact_email: business.contact_email.clone(),
            phone: business.phone.clone(),
            website: business.website.clone(),
            calendar_link: business.calendar_link.clone(),
            service_price: business.service_price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub profile: ParticipantProfile,
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub session: SurveySession,
    pub submission: StepSubmission,
}
