use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::answers::{AnswerKind, AnswerRecord, AnswerSet, AnswerValue};
use super::questionnaire::{check_range, RATING_RANGE, SLEEP_HOURS_RANGE};
use super::tables::{
    LookupTable, DEBT_SITUATION, EMERGENCY_FUND, ENERGY_CRASHES, EXERCISE_FREQUENCY,
    FOCUS_DURATION, FREQUENCY, GROWTH_MINDSET, HYDRATION, INCOME_RANGE, INVESTMENT_EXPERIENCE,
    QUALITY, RECOVERY_TIME, SAVINGS_RATE, WAKE_REFRESHED_DEFAULT,
};

pub const BIOLOGICAL_WEIGHT: f64 = 0.33;
pub const MENTAL_WEIGHT: f64 = 0.33;
pub const FINANCIAL_WEIGHT: f64 = 0.34;

/// Final per-category scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub biological: f64,
    pub mental: f64,
    pub financial: f64,
    pub overall: f64,
}

impl CategoryScore {
    fn from_categories(biological: f64, mental: f64, financial: f64) -> Self {
        let overall = clamp_score(
            biological * BIOLOGICAL_WEIGHT + mental * MENTAL_WEIGHT + financial * FINANCIAL_WEIGHT,
        );
        Self {
            biological,
            mental,
            financial,
            overall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiologicalBreakdown {
    pub sleep: f64,
    pub energy: f64,
    pub stress: f64,
    pub nutrition: f64,
}

impl BiologicalBreakdown {
    pub fn total(&self) -> f64 {
        clamp_score(
            self.sleep * 0.25 + self.energy * 0.25 + self.stress * 0.20 + self.nutrition * 0.30,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MentalBreakdown {
    pub cognitive: f64,
    pub emotional: f64,
    pub mindset: f64,
}

impl MentalBreakdown {
    pub fn total(&self) -> f64 {
        clamp_score(self.cognitive * 0.30 + self.emotional * 0.35 + self.mindset * 0.35)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialBreakdown {
    pub wealth: f64,
    pub stability: f64,
    pub investment: f64,
    pub money_mindset: f64,
}

impl FinancialBreakdown {
    pub fn total(&self) -> f64 {
        clamp_score(
            self.wealth * 0.30
                + self.stability * 0.25
                + self.investment * 0.20
                + self.money_mindset * 0.25,
        )
    }
}

/// Intermediate sub-scores behind each category total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub biological: BiologicalBreakdown,
    pub mental: MentalBreakdown,
    pub financial: FinancialBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub scores: CategoryScore,
    pub breakdown: ScoreBreakdown,
}

/// Stateless evaluator turning a completed answer set into category scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, answers: &AnswerSet) -> Result<CategoryScore, ScoringError> {
        self.evaluate(answers).map(|card| card.scores)
    }

    pub fn evaluate(&self, answers: &AnswerSet) -> Result<ScoreCard, ScoringError> {
        let breakdown = ScoreBreakdown {
            biological: biological(&answers.biological)?,
            mental: mental(&answers.mental)?,
            financial: financial(&answers.financial)?,
        };

        let scores = CategoryScore::from_categories(
            breakdown.biological.total(),
            breakdown.mental.total(),
            breakdown.financial.total(),
        );

        debug!(
            biological = scores.biological,
            mental = scores.mental,
            financial = scores.financial,
            overall = scores.overall,
            "assessment scored"
        );

        Ok(ScoreCard { scores, breakdown })
    }
}

fn biological(record: &AnswerRecord) -> Result<BiologicalBreakdown, ScoringError> {
    let sleep_hours = f64::from(slider_in(record, "sleep_hours", SLEEP_HOURS_RANGE)?);
    let sleep = mean(&[
        (sleep_hours - 4.0) / 8.0 * 100.0,
        lookup(record, "sleep_quality", &QUALITY)?,
        wake_refreshed(record)?,
    ]);

    let energy = mean(&[
        mean(&[
            slider(record, "energy_morning")?,
            slider(record, "energy_afternoon")?,
            slider(record, "energy_evening")?,
        ]) * 10.0,
        lookup(record, "energy_crashes", &ENERGY_CRASHES)?,
    ]);

    let stress = mean(&[
        (10.0 - slider(record, "stress_level")?) * 10.0,
        lookup(record, "stress_management", &QUALITY)?,
        lookup(record, "recovery_time", &RECOVERY_TIME)?,
    ]);

    let nutrition = mean(&[
        lookup(record, "nutrition_quality", &QUALITY)?,
        lookup(record, "hydration", &HYDRATION)?,
        lookup(record, "exercise_frequency", &EXERCISE_FREQUENCY)?,
    ]);

    Ok(BiologicalBreakdown {
        sleep,
        energy,
        stress,
        nutrition,
    })
}

fn mental(record: &AnswerRecord) -> Result<MentalBreakdown, ScoringError> {
    let cognitive = mean(&[
        lookup(record, "focus_duration", &FOCUS_DURATION)?,
        slider(record, "mental_clarity")? * 10.0,
        lookup(record, "decision_making", &QUALITY)?,
        lookup(record, "memory_performance", &QUALITY)?,
    ]);

    let emotional = mean(&[
        mean(&[
            slider(record, "emotional_awareness")?,
            slider(record, "social_skills")?,
            slider(record, "empathy_level")?,
        ]) * 10.0,
        lookup(record, "emotional_regulation", &QUALITY)?,
    ]);

    let mindset = mean(&[
        lookup(record, "growth_mindset", &GROWTH_MINDSET)?,
        slider(record, "self_confidence")? * 10.0,
        lookup(record, "resilience", &QUALITY)?,
    ]);

    Ok(MentalBreakdown {
        cognitive,
        emotional,
        mindset,
    })
}

fn financial(record: &AnswerRecord) -> Result<FinancialBreakdown, ScoringError> {
    let wealth = mean(&[
        lookup(record, "income_range", &INCOME_RANGE)?,
        lookup(record, "savings_rate", &SAVINGS_RATE)?,
    ]);

    let stability = mean(&[
        lookup(record, "debt_situation", &DEBT_SITUATION)?,
        lookup(record, "emergency_fund", &EMERGENCY_FUND)?,
    ]);

    let investment = lookup(record, "investment_experience", &INVESTMENT_EXPERIENCE)?;

    let money_mindset = mean(&[
        (10.0 - slider(record, "money_stress")?) * 10.0,
        slider(record, "money_confidence")? * 10.0,
    ]);

    Ok(FinancialBreakdown {
        wealth,
        stability,
        investment,
        money_mindset,
    })
}

fn slider(record: &AnswerRecord, field: &str) -> Result<f64, ScoringError> {
    slider_in(record, field, RATING_RANGE).map(f64::from)
}

fn slider_in(record: &AnswerRecord, field: &str, range: (i32, i32)) -> Result<i32, ScoringError> {
    check_range(field, record.scale(field)?, range)
}

fn lookup(record: &AnswerRecord, field: &str, table: &LookupTable) -> Result<f64, ScoringError> {
    table.score(field, record.choice(field)?)
}

// Unlike every other categorical answer, an unknown wake-refreshed label
// scores a neutral 50 instead of failing.
fn wake_refreshed(record: &AnswerRecord) -> Result<f64, ScoringError> {
    let label = record.choice("wake_refreshed")?;
    Ok(FREQUENCY.get(label).unwrap_or_else(|| {
        warn!(
            field = "wake_refreshed",
            value = label,
            default = WAKE_REFRESHED_DEFAULT,
            "unrecognised answer scored with the neutral default"
        );
        WAKE_REFRESHED_DEFAULT
    }))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Answer set defects that abort scoring; no partial score is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("missing answer for required field '{field}'")]
    MissingField { field: String },
    #[error("'{value}' is not a valid option for '{field}'")]
    InvalidCategoryValue { field: String, value: String },
    #[error("{value} is outside the {min}-{max} range for '{field}'")]
    ValueOutOfRange {
        field: String,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("'{field}' expects a {expected} answer, got a {found} answer")]
    UnexpectedAnswerKind {
        field: String,
        expected: AnswerKind,
        found: AnswerKind,
    },
}

impl ScoringError {
    pub(crate) fn unexpected_kind(field: &str, expected: AnswerKind, found: &AnswerValue) -> Self {
        Self::UnexpectedAnswerKind {
            field: field.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ScoringError::MissingField { field }
            | ScoringError::InvalidCategoryValue { field, .. }
            | ScoringError::ValueOutOfRange { field, .. }
            | ScoringError::UnexpectedAnswerKind { field, .. } => field,
        }
    }
}
