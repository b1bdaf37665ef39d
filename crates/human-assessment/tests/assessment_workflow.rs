//! End-to-end scenarios for the assessment: the survey flow collects answers,
//! the service scores them and attaches a narrative, all through public APIs.

mod common {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use human_assessment::assessment::{
        AnswerRecord, AssessmentService, NarrativeProvider, NarrativeRequest,
        NarrativeServiceError, NarrativeService, ParticipantProfile,
    };
    use human_assessment::config::{BusinessProfile, NarrativeConfig};

    pub(super) const CONTACT_EMAIL: &str = "results@dangerous.example";

    pub(super) fn profile() -> ParticipantProfile {
        ParticipantProfile {
            first_name: "Morgan".to_string(),
            last_name: "Lee".to_string(),
            email: "morgan@example.net".to_string(),
            phone: "555-0100".to_string(),
            age_range: "26-35".to_string(),
            occupation: "Electrician".to_string(),
            primary_goal: "Build a high-performance lifestyle".to_string(),
            custom_goal: None,
        }
    }

    pub(super) fn biological() -> AnswerRecord {
        AnswerRecord::new()
            .with("sleep_hours", 6)
            .with("sleep_quality", "Fair")
            .with("wake_refreshed", "Sometimes")
            .with("energy_morning", 6)
            .with("energy_afternoon", 4)
            .with("energy_evening", 5)
            .with("energy_crashes", "Daily")
            .with("stress_level", 7)
            .with("stress_management", "Poor")
            .with("recovery_time", "Average")
            .with("nutrition_quality", "Fair")
            .with("hydration", "4-6 glasses")
            .with("exercise_frequency", "1-2 times")
    }

    pub(super) fn mental() -> AnswerRecord {
        AnswerRecord::new()
            .with("focus_duration", "30-60 minutes")
            .with("mental_clarity", 6)
            .with("decision_making", "Fair")
            .with("memory_performance", "Good")
            .with("emotional_awareness", 6)
            .with("emotional_regulation", "Fair")
            .with("social_skills", 7)
            .with("empathy_level", 8)
            .with("growth_mindset", "Completely")
            .with("self_confidence", 6)
            .with("resilience", "Good")
            .with("limiting_beliefs", ["I don't have enough time", "Success requires sacrifice"])
    }

    pub(super) fn financial() -> AnswerRecord {
        AnswerRecord::new()
            .with("income_range", "$50K-$75K")
            .with("savings_rate", "5-10%")
            .with("debt_situation", "Moderate debt")
            .with("emergency_fund", "1-3 months")
            .with("investment_experience", "Novice")
            .with("investment_portfolio", ["Savings accounts"])
            .with("financial_goals", ["Build emergency fund", "Pay off debt"])
            .with("money_stress", 7)
            .with("money_confidence", 5)
            .with("wealth_beliefs", ["I'm not good with money"])
            .with("business_status", "Employee only")
            .with("entrepreneurial_interest", 6)
    }

    pub(super) struct DownProvider;

    #[async_trait]
    impl NarrativeProvider for DownProvider {
        async fn generate(
            &self,
            _request: &NarrativeRequest,
        ) -> Result<String, NarrativeServiceError> {
            Err(NarrativeServiceError::Transport("dns error".to_string()))
        }
    }

    pub(super) fn service(provider: Arc<dyn NarrativeProvider>) -> AssessmentService {
        let config = NarrativeConfig {
            timeout: Duration::from_secs(2),
            ..NarrativeConfig::default()
        };
        let business = BusinessProfile {
            contact_email: CONTACT_EMAIL.to_string(),
            ..BusinessProfile::default()
        };
        AssessmentService::new(NarrativeService::new(provider, &config, CONTACT_EMAIL), business)
    }
}

use std::sync::Arc;

use common::*;
use human_assessment::assessment::{
    NarrativeSource, ScoringEngine, StepSubmission, SurveySession, SurveyStep,
};

fn completed_session() -> SurveySession {
    let mut session = SurveySession::new();
    for submission in [
        StepSubmission::Begin,
        StepSubmission::BasicInfo(profile()),
        StepSubmission::Biological(biological()),
        StepSubmission::Mental(mental()),
        StepSubmission::Financial(financial()),
    ] {
        session = session.advance(submission).expect("step accepted");
    }
    session
}

#[test]
fn survey_collects_a_scorable_answer_set() {
    let session = completed_session();
    assert_eq!(session.step(), SurveyStep::Results);

    let (_, answers) = session.completed().expect("results available");
    let scores = ScoringEngine::new().score(&answers).expect("answers score");

    // sleep 41.67, energy 37.5, stress 35, nutrition 33.33
    assert!((scores.biological - 36.791_666_666_666_67).abs() < 1e-9);
    // cognitive 58.75, emotional 60, mindset 78.33
    assert!((scores.mental - 66.041_666_666_666_67).abs() < 1e-9);
    // wealth 35, stability 45, investment 40, money_mindset 40
    assert!((scores.financial - 39.75).abs() < 1e-9);
    for value in [scores.biological, scores.mental, scores.financial, scores.overall] {
        assert!((0.0..=100.0).contains(&value));
    }
}

#[tokio::test]
async fn report_falls_back_when_narrative_service_is_down() {
    let (participant, answers) = completed_session()
        .completed()
        .expect("results available");
    let service = service(Arc::new(DownProvider));

    let report = service
        .report(&participant, &answers)
        .await
        .expect("scores computed");

    assert_eq!(report.narrative_source, NarrativeSource::Fallback);
    assert_eq!(
        report.narrative,
        format!(
            "AI analysis temporarily unavailable. Please contact {CONTACT_EMAIL} for your \
             personalized assessment."
        )
    );
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.participant.full_name(), "Morgan Lee");
    assert_eq!(report.scores, service.score(&answers).expect("scores").scores);
}
