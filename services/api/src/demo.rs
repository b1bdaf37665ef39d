use crate::infra::{load_json, sample_submissions};
use clap::Args;
use human_assessment::assessment::narrative::UnconfiguredProvider;
use human_assessment::assessment::{
    AnswerSet, AssessmentReport, AssessmentRequest, AssessmentService, ScoreCard, ScoringEngine,
    SurveySession,
};
use human_assessment::config::AppConfig;
use human_assessment::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the biological, mental and financial answer records
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the score card as JSON instead of a summary table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON file holding `profile` and `answers`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the narrative service timeout in seconds
    #[arg(long)]
    pub(crate) timeout_secs: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the narrative service and show the fallback text
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let answers: AnswerSet = load_json(&args.answers)?;
    let card = ScoringEngine::new().evaluate(&answers)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        render_score_card(&card);
    }
    Ok(())
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(secs) = args.timeout_secs {
        config.narrative.timeout = Duration::from_secs(secs);
    }

    let request: AssessmentRequest = load_json(&args.input)?;
    let service = AssessmentService::from_config(&config);
    let report = service.report(&request.profile, &request.answers).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = if args.offline {
        AssessmentService::with_provider(Arc::new(UnconfiguredProvider), &config)
    } else {
        AssessmentService::from_config(&config)
    };

    println!("{} demo", service.business().business_name);

    let mut session = SurveySession::new();
    for submission in sample_submissions() {
        let step = submission.step();
        session = session.advance(submission)?;
        println!("  completed {:<12} -> {}", step.label(), session.step());
    }

    let (profile, answers) = session.completed()?;
    let report = service.report(&profile, &answers).await?;
    render_report(&report);

    Ok(())
}

fn render_score_card(card: &ScoreCard) {
    let scores = &card.scores;
    let biological = &card.breakdown.biological;
    let mental = &card.breakdown.mental;
    let financial = &card.breakdown.financial;

    println!("Biological Optimization  {:>6.1}", scores.biological);
    println!(
        "  sleep {:>6.1}  energy {:>6.1}  stress {:>6.1}  nutrition {:>6.1}",
        biological.sleep, biological.energy, biological.stress, biological.nutrition
    );
    println!("Mental Architecture      {:>6.1}", scores.mental);
    println!(
        "  cognitive {:>6.1}  emotional {:>6.1}  mindset {:>6.1}",
        mental.cognitive, mental.emotional, mental.mindset
    );
    println!("Financial Intelligence   {:>6.1}", scores.financial);
    println!(
        "  wealth {:>6.1}  stability {:>6.1}  investment {:>6.1}  money mindset {:>6.1}",
        financial.wealth, financial.stability, financial.investment, financial.money_mindset
    );
    println!("Overall Human 2.0 Score  {:>6.1}", scores.overall);
}

fn render_report(report: &AssessmentReport) {
    println!(
        "\nResults for {} ({})",
        report.participant.full_name(),
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    render_score_card(&ScoreCard {
        scores: report.scores,
        breakdown: report.breakdown,
    });

    println!("\nNarrative ({:?})", report.narrative_source);
    println!("{}", report.narrative);
    for error in &report.errors {
        println!("  note: {error}");
    }

    let cta = &report.call_to_action;
    println!(
        "\nBook a complimentary strategy session with {} (normally {})",
        cta.coach_name, cta.service_price
    );
    for (label, value) in [
        ("calendar", &cta.calendar_link),
        ("email", &cta.contact_email),
        ("phone", &cta.phone),
        ("website", &cta.website),
    ] {
        if !value.is_empty() {
            println!("  {label:<9} {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use human_assessment::assessment::{NarrativeService, NarrativeSource};
    use human_assessment::config::{BusinessProfile, NarrativeConfig};

    #[tokio::test]
    async fn offline_demo_report_uses_fallback() {
        let business = BusinessProfile::default();
        let narrator = NarrativeService::new(
            Arc::new(UnconfiguredProvider),
            &NarrativeConfig::default(),
            business.contact_email.as_str(),
        );
        let service = AssessmentService::new(narrator, business);

        let session = sample_submissions()
            .into_iter()
            .try_fold(SurveySession::new(), |session, submission| {
                session.advance(submission)
            })
            .expect("sample answers are valid");
        let (profile, answers) = session.completed().expect("results available");

        let report = service.report(&profile, &answers).await.expect("report builds");

        assert_eq!(report.narrative_source, NarrativeSource::Fallback);
        assert!(report.narrative.contains("hello@example.com"));
        assert_eq!(report.call_to_action.contact_email, "hello@example.com");
        assert_eq!(report.call_to_action.service_price, "$497");
        assert!((0.0..=100.0).contains(&report.scores.overall));
    }
}
