use human_assessment::assessment::{AnswerRecord, ParticipantProfile, StepSubmission};
use human_assessment::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn sample_profile() -> ParticipantProfile {
    ParticipantProfile {
        first_name: "Jordan".to_string(),
        last_name: "Blake".to_string(),
        email: "jordan.blake@example.com".to_string(),
        phone: String::new(),
        age_range: "36-45".to_string(),
        occupation: "Operations lead".to_string(),
        primary_goal: "Build a high-performance lifestyle".to_string(),
        custom_goal: None,
    }
}

/// Answers a busy professional might give, one submission per survey step.
pub(crate) fn sample_submissions() -> Vec<StepSubmission> {
    let biological = AnswerRecord::new()
        .with("sleep_hours", 6)
        .with("sleep_quality", "Fair")
        .with("wake_refreshed", "Rarely")
        .with("energy_morning", 7)
        .with("energy_afternoon", 4)
        .with("energy_evening", 5)
        .with("energy_crashes", "Daily")
        .with("stress_level", 7)
        .with("stress_management", "Fair")
        .with("recovery_time", "Slowly")
        .with("nutrition_quality", "Good")
        .with("hydration", "6-8 glasses")
        .with("exercise_frequency", "1-2 times");

    let mental = AnswerRecord::new()
        .with("focus_duration", "30-60 minutes")
        .with("mental_clarity", 6)
        .with("decision_making", "Good")
        .with("memory_performance", "Fair")
        .with("emotional_awareness", 7)
        .with("emotional_regulation", "Fair")
        .with("social_skills", 8)
        .with("empathy_level", 8)
        .with("growth_mindset", "Significantly")
        .with("self_confidence", 6)
        .with("resilience", "Good")
        .with("limiting_beliefs", ["I don't have enough time"]);

    let financial = AnswerRecord::new()
        .with("income_range", "$75K-$100K")
        .with("savings_rate", "10-15%")
        .with("debt_situation", "Moderate debt")
        .with("emergency_fund", "1-3 months")
        .with("investment_experience", "Novice")
        .with("investment_portfolio", ["Retirement accounts (401k, IRA)"])
        .with("financial_goals", ["Pay off debt", "Generate passive income"])
        .with("money_stress", 6)
        .with("money_confidence", 5)
        .with("wealth_beliefs", ["Wealth requires sacrifice"])
        .with("business_status", "Side hustle")
        .with("business_revenue", "Under $1K")
        .with("entrepreneurial_interest", 8);

    vec![
        StepSubmission::Begin,
        StepSubmission::BasicInfo(sample_profile()),
        StepSubmission::Biological(biological),
        StepSubmission::Mental(mental),
        StepSubmission::Financial(financial),
    ]
}
