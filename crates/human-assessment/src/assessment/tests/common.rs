use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::answers::{AnswerRecord, AnswerSet, ParticipantProfile};
use crate::assessment::narrative::{
    NarrativeProvider, NarrativeRequest, NarrativeService, NarrativeServiceError,
};
use crate::assessment::service::AssessmentService;
use crate::config::{BusinessProfile, NarrativeConfig};

pub(super) const CONTACT_EMAIL: &str = "coach@upgrade.example";

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn biological() -> AnswerRecord {
    AnswerRecord::new()
        .with("sleep_hours", 8)
        .with("sleep_quality", "Good")
        .with("wake_refreshed", "Often")
        .with("energy_morning", 10)
        .with("energy_afternoon", 10)
        .with("energy_evening", 10)
        .with("energy_crashes", "Never")
        .with("stress_level", 3)
        .with("stress_management", "Good")
        .with("recovery_time", "Quickly")
        .with("nutrition_quality", "Good")
        .with("hydration", "8-10 glasses")
        .with("exercise_frequency", "3-4 times")
}

pub(super) fn mental() -> AnswerRecord {
    AnswerRecord::new()
        .with("focus_duration", "1-2 hours")
        .with("mental_clarity", 8)
        .with("decision_making", "Good")
        .with("memory_performance", "Fair")
        .with("emotional_awareness", 7)
        .with("emotional_regulation", "Good")
        .with("social_skills", 8)
        .with("empathy_level", 9)
        .with("growth_mindset", "Significantly")
        .with("self_confidence", 7)
        .with("resilience", "Excellent")
        .with("limiting_beliefs", ["I don't have enough time"])
}

pub(super) fn financial() -> AnswerRecord {
    AnswerRecord::new()
        .with("income_range", "$100K-$150K")
        .with("savings_rate", "20%+")
        .with("debt_situation", "Minimal debt")
        .with("emergency_fund", "3-6 months")
        .with("investment_experience", "Intermediate")
        .with("investment_portfolio", ["Stocks/ETFs", "Retirement accounts (401k, IRA)"])
        .with("financial_goals", ["Generate passive income"])
        .with("money_stress", 4)
        .with("money_confidence", 6)
        .with("wealth_beliefs", ["None of these resonate with me"])
        .with("business_status", "Side hustle")
        .with("business_revenue", "$1K-$5K")
        .with("entrepreneurial_interest", 8)
}

pub(super) fn answers() -> AnswerSet {
    AnswerSet {
        biological: biological(),
        mental: mental(),
        financial: financial(),
    }
}

pub(super) fn profile() -> ParticipantProfile {
    ParticipantProfile {
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        email: "dana@example.org".to_string(),
        phone: String::new(),
        age_range: "36-45".to_string(),
        occupation: "Product manager".to_string(),
        primary_goal: "Achieve balance across all areas".to_string(),
        custom_goal: None,
    }
}

pub(super) fn business() -> BusinessProfile {
    BusinessProfile {
        coach_name: "Avery".to_string(),
        contact_email: CONTACT_EMAIL.to_string(),
        calendar_link: "https://calendar.upgrade.example/strategy".to_string(),
        service_price: "$2,497".to_string(),
        ..BusinessProfile::default()
    }
}

pub(super) fn narrative_config() -> NarrativeConfig {
    NarrativeConfig {
        model: "test-model".to_string(),
        max_tokens: 256,
        temperature: 0.2,
        timeout: Duration::from_secs(5),
        ..NarrativeConfig::default()
    }
}

pub(super) fn narrator(provider: Arc<dyn NarrativeProvider>) -> NarrativeService {
    NarrativeService::new(provider, &narrative_config(), CONTACT_EMAIL)
}

pub(super) fn service_with(provider: Arc<dyn NarrativeProvider>) -> AssessmentService {
    AssessmentService::new(narrator(provider), business())
}

/// Returns a canned reply and remembers every request.
#[derive(Default)]
pub(super) struct ScriptedProvider {
    reply: String,
    requests: Mutex<Vec<NarrativeRequest>>,
}

impl ScriptedProvider {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<NarrativeRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl NarrativeProvider for ScriptedProvider {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Fails every call with the configured error and counts the attempts.
pub(super) struct FailingProvider {
    error: NarrativeServiceError,
    calls: AtomicUsize,
}

impl FailingProvider {
    pub(super) fn new(error: NarrativeServiceError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrativeProvider for FailingProvider {
    async fn generate(&self, _request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Sleeps past any reasonable deadline before answering.
pub(super) struct StalledProvider;

#[async_trait]
impl NarrativeProvider for StalledProvider {
    async fn generate(&self, _request: &NarrativeRequest) -> Result<String, NarrativeServiceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
