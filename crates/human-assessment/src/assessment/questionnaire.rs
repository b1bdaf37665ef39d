use serde::Serialize;
use tracing::debug;

use super::answers::{AnswerKind, AnswerRecord, AnswerValue, Section};
use super::scoring::ScoringError;
use super::tables::{
    LookupTable, DEBT_SITUATION, EMERGENCY_FUND, ENERGY_CRASHES, EXERCISE_FREQUENCY,
    FOCUS_DURATION, FREQUENCY, GROWTH_MINDSET, HYDRATION, INCOME_RANGE, INVESTMENT_EXPERIENCE,
    QUALITY, RECOVERY_TIME, SAVINGS_RATE,
};

/// Inclusive bounds for the sleep-hours slider.
pub const SLEEP_HOURS_RANGE: (i32, i32) = (4, 12);
/// Inclusive bounds for every 1-10 self-rating slider.
pub const RATING_RANGE: (i32, i32) = (1, 10);

pub const AGE_RANGES: &[&str] = &["18-25", "26-35", "36-45", "46-55", "56-65", "65+"];

pub const PRIMARY_GOALS: &[&str] = &[
    "Increase energy and physical performance",
    "Enhance mental clarity and focus",
    "Accelerate wealth building and financial success",
    "Achieve balance across all areas",
    "Build a high-performance lifestyle",
    "Other",
];

const LIMITING_BELIEFS: &[&str] = &[
    "I'm not smart enough",
    "I don't deserve success",
    "I'm too old/young to change",
    "I don't have enough time",
    "I'm not good with technology",
    "Success requires sacrifice",
    "I'm not a 'numbers person'",
    "Other people are more talented",
    "None of these apply to me",
];

const INVESTMENT_PORTFOLIO: &[&str] = &[
    "Savings accounts",
    "Stocks/ETFs",
    "Bonds",
    "Real estate",
    "Cryptocurrency",
    "Business investments",
    "Retirement accounts (401k, IRA)",
    "None",
];

const FINANCIAL_GOALS: &[&str] = &[
    "Build emergency fund",
    "Pay off debt",
    "Save for major purchase",
    "Retirement planning",
    "Generate passive income",
    "Start/grow a business",
    "Achieve financial independence",
    "Build generational wealth",
];

const WEALTH_BELIEFS: &[&str] = &[
    "Money is the root of all evil",
    "Rich people are greedy",
    "I don't deserve to be wealthy",
    "Money doesn't buy happiness",
    "There's not enough money to go around",
    "I'm not good with money",
    "Money comes and goes",
    "Wealth requires sacrifice",
    "None of these resonate with me",
];

pub const EMPLOYEE_ONLY: &str = "Employee only";
pub const NOT_APPLICABLE: &str = "N/A";

const BUSINESS_STATUS: &[&str] = &[
    EMPLOYEE_ONLY,
    "Side hustle",
    "Part-time business",
    "Full-time entrepreneur",
    "Multiple businesses",
];

const BUSINESS_REVENUE: &[&str] = &[
    "Under $1K",
    "$1K-$5K",
    "$5K-$10K",
    "$10K-$25K",
    "$25K-$50K",
    "$50K+",
];

/// How a question is answered and what domain its answer is drawn from.
#[derive(Debug, Clone, Copy)]
pub enum QuestionKind {
    Scale {
        range: (i32, i32),
        default: i32,
    },
    /// Single choice scored through a lookup table; the table is the option list.
    Rated {
        table: &'static LookupTable,
        default: Option<&'static str>,
    },
    Choice {
        options: &'static [&'static str],
    },
    MultiChoice {
        options: &'static [&'static str],
    },
}

impl QuestionKind {
    pub fn answer_kind(&self) -> AnswerKind {
        match self {
            QuestionKind::Scale { .. } => AnswerKind::Scale,
            QuestionKind::Rated { .. } | QuestionKind::Choice { .. } => AnswerKind::Choice,
            QuestionKind::MultiChoice { .. } => AnswerKind::Selections,
        }
    }

    pub fn options(&self) -> Vec<&'static str> {
        match self {
            QuestionKind::Scale { .. } => Vec::new(),
            QuestionKind::Rated { table, .. } => table.labels().collect(),
            QuestionKind::Choice { options } | QuestionKind::MultiChoice { options } => {
                options.to_vec()
            }
        }
    }

    fn allows(&self, label: &str) -> bool {
        match self {
            QuestionKind::Scale { .. } => false,
            QuestionKind::Rated { table, .. } => table.contains(label),
            QuestionKind::Choice { options } | QuestionKind::MultiChoice { options } => {
                options.iter().any(|option| *option == label)
            }
        }
    }
}

/// Whether an answer must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    /// Skipped (and answered with `placeholder`) when `field` holds `skip_when`.
    Conditional {
        field: &'static str,
        skip_when: &'static str,
        placeholder: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub requirement: Requirement,
}

const fn scale(id: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Scale {
            range: RATING_RANGE,
            default: 5,
        },
        requirement: Requirement::Required,
    }
}

const fn rated(
    id: &'static str,
    prompt: &'static str,
    table: &'static LookupTable,
    default: Option<&'static str>,
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::Rated { table, default },
        requirement: Requirement::Required,
    }
}

const fn multi(
    id: &'static str,
    prompt: &'static str,
    options: &'static [&'static str],
) -> Question {
    Question {
        id,
        prompt,
        kind: QuestionKind::MultiChoice { options },
        requirement: Requirement::Required,
    }
}

static BIOLOGICAL: [Question; 13] = [
    Question {
        id: "sleep_hours",
        prompt: "Average hours of sleep per night",
        kind: QuestionKind::Scale {
            range: SLEEP_HOURS_RANGE,
            default: 7,
        },
        requirement: Requirement::Required,
    },
    rated(
        "sleep_quality",
        "How would you rate your sleep quality?",
        &QUALITY,
        Some("Fair"),
    ),
    rated(
        "wake_refreshed",
        "How often do you wake up feeling refreshed?",
        &FREQUENCY,
        Some("Sometimes"),
    ),
    scale("energy_morning", "Morning energy level (1-10)"),
    scale("energy_afternoon", "Afternoon energy level (1-10)"),
    scale("energy_evening", "Evening energy level (1-10)"),
    rated(
        "energy_crashes",
        "How often do you experience energy crashes?",
        &ENERGY_CRASHES,
        None,
    ),
    scale("stress_level", "Current stress level (1-10)"),
    rated(
        "stress_management",
        "How well do you manage stress?",
        &QUALITY,
        Some("Fair"),
    ),
    rated(
        "recovery_time",
        "How quickly do you recover from physical/mental exertion?",
        &RECOVERY_TIME,
        None,
    ),
    rated(
        "nutrition_quality",
        "How would you rate your nutrition quality?",
        &QUALITY,
        Some("Fair"),
    ),
    rated("hydration", "Daily water intake", &HYDRATION, None),
    rated(
        "exercise_frequency",
        "Exercise frequency per week",
        &EXERCISE_FREQUENCY,
        None,
    ),
];

static MENTAL: [Question; 12] = [
    rated(
        "focus_duration",
        "How long can you maintain deep focus?",
        &FOCUS_DURATION,
        None,
    ),
    scale("mental_clarity", "Mental clarity throughout the day (1-10)"),
    rated(
        "decision_making",
        "How confident are you in your decision-making?",
        &QUALITY,
        Some("Fair"),
    ),
    rated(
        "memory_performance",
        "How would you rate your memory performance?",
        &QUALITY,
        Some("Fair"),
    ),
    scale("emotional_awareness", "Emotional self-awareness (1-10)"),
    rated(
        "emotional_regulation",
        "How well do you regulate your emotions?",
        &QUALITY,
        Some("Fair"),
    ),
    scale("social_skills", "Social and interpersonal skills (1-10)"),
    scale("empathy_level", "Empathy and understanding of others (1-10)"),
    rated(
        "growth_mindset",
        "How much do you believe you can improve and grow?",
        &GROWTH_MINDSET,
        Some("Moderately"),
    ),
    scale("self_confidence", "Overall self-confidence (1-10)"),
    rated(
        "resilience",
        "How well do you bounce back from setbacks?",
        &QUALITY,
        Some("Fair"),
    ),
    multi(
        "limiting_beliefs",
        "Which limiting beliefs do you struggle with? (Select all that apply)",
        LIMITING_BELIEFS,
    ),
];

static FINANCIAL: [Question; 13] = [
    rated("income_range", "Annual income range", &INCOME_RANGE, None),
    rated(
        "savings_rate",
        "What percentage of income do you save/invest?",
        &SAVINGS_RATE,
        None,
    ),
    rated(
        "debt_situation",
        "Current debt situation",
        &DEBT_SITUATION,
        None,
    ),
    rated(
        "emergency_fund",
        "Emergency fund coverage",
        &EMERGENCY_FUND,
        None,
    ),
    rated(
        "investment_experience",
        "Investment experience level",
        &INVESTMENT_EXPERIENCE,
        Some("Novice"),
    ),
    multi(
        "investment_portfolio",
        "Current investment types (select all that apply)",
        INVESTMENT_PORTFOLIO,
    ),
    multi(
        "financial_goals",
        "Primary financial goals (select all that apply)",
        FINANCIAL_GOALS,
    ),
    scale("money_stress", "How much stress does money cause you? (1-10)"),
    scale(
        "money_confidence",
        "Confidence in financial decision-making (1-10)",
    ),
    multi(
        "wealth_beliefs",
        "Which beliefs about money resonate with you? (select all that apply)",
        WEALTH_BELIEFS,
    ),
    Question {
        id: "business_status",
        prompt: "Current business status",
        kind: QuestionKind::Choice {
            options: BUSINESS_STATUS,
        },
        requirement: Requirement::Required,
    },
    Question {
        id: "business_revenue",
        prompt: "Monthly business revenue",
        kind: QuestionKind::Choice {
            options: BUSINESS_REVENUE,
        },
        requirement: Requirement::Conditional {
            field: "business_status",
            skip_when: EMPLOYEE_ONLY,
            placeholder: NOT_APPLICABLE,
        },
    },
    scale(
        "entrepreneurial_interest",
        "Interest in entrepreneurship (1-10)",
    ),
];

pub fn questions(section: Section) -> &'static [Question] {
    match section {
        Section::Biological => &BIOLOGICAL,
        Section::Mental => &MENTAL,
        Section::Financial => &FINANCIAL,
    }
}

/// Locates a question by id across every section.
pub fn find(field: &str) -> Option<(Section, &'static Question)> {
    Section::ALL.into_iter().find_map(|section| {
        questions(section)
            .iter()
            .find(|question| question.id == field)
            .map(|question| (section, question))
    })
}

/// Checks presence, shape and domain of every answer the section requires.
pub fn validate_section(section: Section, record: &AnswerRecord) -> Result<(), ScoringError> {
    for question in questions(section) {
        if let Requirement::Conditional {
            field,
            skip_when,
            placeholder,
        } = question.requirement
        {
            if record.choice(field)? == skip_when {
                match record.get(question.id) {
                    None => continue,
                    Some(AnswerValue::Choice(value)) if value == placeholder => continue,
                    Some(_) => {}
                }
            }
        }

        validate_answer(question, record.value(question.id)?)?;
    }

    for (field, _) in record.iter() {
        match find(field) {
            Some((owner, _)) if owner == section => {}
            Some((owner, _)) => debug!(
                section = ?section,
                owner = ?owner,
                field,
                "ignoring answer filed under another section"
            ),
            None => debug!(section = ?section, field, "ignoring unrecognised answer"),
        }
    }

    Ok(())
}

fn validate_answer(question: &Question, value: &AnswerValue) -> Result<(), ScoringError> {
    let field = question.id;
    match (&question.kind, value) {
        (QuestionKind::Scale { range, .. }, AnswerValue::Scale(answer)) => {
            check_range(field, *answer, *range).map(|_| ())
        }
        (QuestionKind::Rated { .. } | QuestionKind::Choice { .. }, AnswerValue::Choice(label)) => {
            if question.kind.allows(label) {
                Ok(())
            } else {
                Err(ScoringError::InvalidCategoryValue {
                    field: field.to_string(),
                    value: label.clone(),
                })
            }
        }
        (QuestionKind::MultiChoice { .. }, AnswerValue::Selections(labels)) => {
            match labels.iter().find(|label| !question.kind.allows(label)) {
                Some(label) => Err(ScoringError::InvalidCategoryValue {
                    field: field.to_string(),
                    value: label.clone(),
                }),
                None => Ok(()),
            }
        }
        (kind, other) => Err(ScoringError::unexpected_kind(
            field,
            kind.answer_kind(),
            other,
        )),
    }
}

pub(crate) fn check_range(
    field: &str,
    value: i32,
    (min, max): (i32, i32),
) -> Result<i32, ScoringError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ScoringError::ValueOutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Serializable description of one question for form renderers.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: AnswerKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(i32, i32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<AnswerValue>,
    pub required: bool,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let options = question.kind.options();
        let (range, default) = match question.kind {
            QuestionKind::Scale { range, default } => {
                (Some(range), Some(AnswerValue::Scale(default)))
            }
            QuestionKind::Rated { default, .. } => (
                None,
                default
                    .or_else(|| options.first().copied())
                    .map(AnswerValue::from),
            ),
            QuestionKind::Choice { .. } => (None, options.first().copied().map(AnswerValue::from)),
            QuestionKind::MultiChoice { .. } => (None, Some(AnswerValue::Selections(Vec::new()))),
        };

        Self {
            id: question.id,
            prompt: question.prompt,
            kind: question.kind.answer_kind(),
            options,
            range,
            default,
            required: question.requirement == Requirement::Required,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub title: &'static str,
    pub questions: Vec<QuestionView>,
}

/// Whole questionnaire, including the basic-information option lists.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub age_ranges: &'static [&'static str],
    pub primary_goals: &'static [&'static str],
    pub sections: Vec<SectionView>,
}

pub fn catalog() -> CatalogView {
    CatalogView {
        age_ranges: AGE_RANGES,
        primary_goals: PRIMARY_GOALS,
        sections: Section::ALL
            .into_iter()
            .map(|section| SectionView {
                section,
                title: section.label(),
                questions: questions(section).iter().map(QuestionView::from).collect(),
            })
            .collect(),
    }
}
