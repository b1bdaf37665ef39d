//! Fixed label-to-score tables for every categorical question.
//!
//! The label order of each table is the order the options are presented in,
//! so the questionnaire catalog renders its option lists straight from here.

use super::scoring::ScoringError;

/// Immutable mapping from a categorical answer label to its 0-100 contribution.
#[derive(Debug, PartialEq, Eq)]
pub struct LookupTable {
    name: &'static str,
    entries: &'static [(&'static str, u8)],
}

impl LookupTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, u8)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, score)| f64::from(*score))
    }

    /// Strict lookup: labels outside the table are rejected.
    pub fn score(&self, field: &str, label: &str) -> Result<f64, ScoringError> {
        self.get(label)
            .ok_or_else(|| ScoringError::InvalidCategoryValue {
                field: field.to_string(),
                value: label.to_string(),
            })
    }
}

pub static QUALITY: LookupTable = LookupTable::new(
    "quality",
    &[
        ("Very Poor", 0),
        ("Poor", 25),
        ("Fair", 50),
        ("Good", 75),
        ("Excellent", 100),
    ],
);

pub static FREQUENCY: LookupTable = LookupTable::new(
    "frequency",
    &[
        ("Never", 0),
        ("Rarely", 25),
        ("Sometimes", 50),
        ("Often", 75),
        ("Always", 100),
    ],
);

/// Score applied to a wake-refreshed answer that is not in [`FREQUENCY`].
pub const WAKE_REFRESHED_DEFAULT: f64 = 50.0;

pub static ENERGY_CRASHES: LookupTable = LookupTable::new(
    "energy_crashes",
    &[
        ("Multiple times daily", 0),
        ("Daily", 25),
        ("Few times per week", 50),
        ("Rarely", 75),
        ("Never", 100),
    ],
);

pub static RECOVERY_TIME: LookupTable = LookupTable::new(
    "recovery_time",
    &[
        ("Very slowly", 0),
        ("Slowly", 25),
        ("Average", 50),
        ("Quickly", 75),
        ("Very quickly", 100),
    ],
);

pub static HYDRATION: LookupTable = LookupTable::new(
    "hydration",
    &[
        ("Less than 4 glasses", 0),
        ("4-6 glasses", 25),
        ("6-8 glasses", 75),
        ("8-10 glasses", 100),
        ("More than 10 glasses", 90),
    ],
);

pub static EXERCISE_FREQUENCY: LookupTable = LookupTable::new(
    "exercise_frequency",
    &[
        ("Never", 0),
        ("1-2 times", 25),
        ("3-4 times", 50),
        ("5-6 times", 75),
        ("Daily", 100),
    ],
);

pub static FOCUS_DURATION: LookupTable = LookupTable::new(
    "focus_duration",
    &[
        ("Less than 15 minutes", 0),
        ("15-30 minutes", 25),
        ("30-60 minutes", 50),
        ("1-2 hours", 75),
        ("More than 2 hours", 100),
    ],
);

pub static GROWTH_MINDSET: LookupTable = LookupTable::new(
    "growth_mindset",
    &[
        ("Very Little", 0),
        ("Somewhat", 25),
        ("Moderately", 50),
        ("Significantly", 75),
        ("Completely", 100),
    ],
);

pub static INCOME_RANGE: LookupTable = LookupTable::new(
    "income_range",
    &[
        ("Under $25K", 10),
        ("$25K-$50K", 25),
        ("$50K-$75K", 40),
        ("$75K-$100K", 60),
        ("$100K-$150K", 75),
        ("$150K-$250K", 90),
        ("$250K+", 100),
    ],
);

pub static SAVINGS_RATE: LookupTable = LookupTable::new(
    "savings_rate",
    &[
        ("0-5%", 10),
        ("5-10%", 30),
        ("10-15%", 50),
        ("15-20%", 75),
        ("20%+", 100),
    ],
);

pub static DEBT_SITUATION: LookupTable = LookupTable::new(
    "debt_situation",
    &[
        ("Debt-free", 100),
        ("Minimal debt", 75),
        ("Moderate debt", 50),
        ("High debt", 25),
        ("Overwhelming debt", 0),
    ],
);

pub static EMERGENCY_FUND: LookupTable = LookupTable::new(
    "emergency_fund",
    &[
        ("No emergency fund", 0),
        ("Less than 1 month", 20),
        ("1-3 months", 40),
        ("3-6 months", 80),
        ("6+ months", 100),
    ],
);

pub static INVESTMENT_EXPERIENCE: LookupTable = LookupTable::new(
    "investment_experience",
    &[
        ("Beginner", 20),
        ("Novice", 40),
        ("Intermediate", 60),
        ("Advanced", 80),
        ("Expert", 100),
    ],
);

pub static ALL_TABLES: [&LookupTable; 13] = [
    &QUALITY,
    &FREQUENCY,
    &ENERGY_CRASHES,
    &RECOVERY_TIME,
    &HYDRATION,
    &EXERCISE_FREQUENCY,
    &FOCUS_DURATION,
    &GROWTH_MINDSET,
    &INCOME_RANGE,
    &SAVINGS_RATE,
    &DEBT_SITUATION,
    &EMERGENCY_FUND,
    &INVESTMENT_EXPERIENCE,
];
