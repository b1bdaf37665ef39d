use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::scoring::ScoringError;

/// The three scored sections of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Biological,
    Mental,
    Financial,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Biological, Section::Mental, Section::Financial];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Biological => "Biological Optimization",
            Section::Mental => "Mental Architecture",
            Section::Financial => "Financial Intelligence",
        }
    }
}

/// A single answer as submitted by the form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scale(i32),
    Choice(String),
    Selections(Vec<String>),
}

impl AnswerValue {
    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerValue::Scale(_) => AnswerKind::Scale,
            AnswerValue::Choice(_) => AnswerKind::Choice,
            AnswerValue::Selections(_) => AnswerKind::Selections,
        }
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Scale(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Choice(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Choice(value)
    }
}

impl<const N: usize> From<[&str; N]> for AnswerValue {
    fn from(values: [&str; N]) -> Self {
        AnswerValue::Selections(values.iter().map(|value| value.to_string()).collect())
    }
}

/// Shape of an answer, used in validation errors and the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Scale,
    Choice,
    Selections,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnswerKind::Scale => "numeric scale",
            AnswerKind::Choice => "single choice",
            AnswerKind::Selections => "multiple choice",
        };
        f.write_str(label)
    }
}

/// Flat mapping from question identifier to answer for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(BTreeMap<String, AnswerValue>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<AnswerValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<AnswerValue>) -> Option<AnswerValue> {
        self.0.insert(field.to_string(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn value(&self, field: &str) -> Result<&AnswerValue, ScoringError> {
        self.get(field).ok_or_else(|| ScoringError::MissingField {
            field: field.to_string(),
        })
    }

    pub fn scale(&self, field: &str) -> Result<i32, ScoringError> {
        match self.value(field)? {
            AnswerValue::Scale(value) => Ok(*value),
            other => Err(ScoringError::unexpected_kind(field, AnswerKind::Scale, other)),
        }
    }

    pub fn choice(&self, field: &str) -> Result<&str, ScoringError> {
        match self.value(field)? {
            AnswerValue::Choice(value) => Ok(value.as_str()),
            other => Err(ScoringError::unexpected_kind(field, AnswerKind::Choice, other)),
        }
    }

    pub fn selections(&self, field: &str) -> Result<&[String], ScoringError> {
        match self.value(field)? {
            AnswerValue::Selections(values) => Ok(values.as_slice()),
            other => Err(ScoringError::unexpected_kind(
                field,
                AnswerKind::Selections,
                other,
            )),
        }
    }
}

/// Complete set of scored responses for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub biological: AnswerRecord,
    pub mental: AnswerRecord,
    pub financial: AnswerRecord,
}

impl AnswerSet {
    pub fn section(&self, section: Section) -> &AnswerRecord {
        match section {
            Section::Biological => &self.biological,
            Section::Mental => &self.mental,
            Section::Financial => &self.financial,
        }
    }
}

/// Basic information collected before the scored sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub age_range: String,
    #[serde(default)]
    pub occupation: String,
    pub primary_goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_goal: Option<String>,
}

impl ParticipantProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// The stated goal, preferring the free-text goal when "Other" was picked.
    pub fn goal(&self) -> &str {
        match self.custom_goal.as_deref().map(str::trim) {
            Some(custom) if self.primary_goal == "Other" && !custom.is_empty() => custom,
            _ => &self.primary_goal,
        }
    }
}
