//! Forward-only survey state machine.
//!
//! A [`SurveySession`] is a plain value: callers hold it between screens and
//! hand it back with the next [`StepSubmission`]. Each transition validates the
//! submitted step before moving on, and a rejected submission leaves the
//! session untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::{AnswerRecord, AnswerSet, ParticipantProfile, Section};
use super::questionnaire::{validate_section, AGE_RANGES, PRIMARY_GOALS};
use super::scoring::ScoringError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStep {
    #[default]
    Welcome,
    BasicInfo,
    Biological,
    Mental,
    Financial,
    Results,
}

impl SurveyStep {
    pub fn next(self) -> Option<Self> {
        match self {
            SurveyStep::Welcome => Some(SurveyStep::BasicInfo),
            SurveyStep::BasicInfo => Some(SurveyStep::Biological),
            SurveyStep::Biological => Some(SurveyStep::Mental),
            SurveyStep::Mental => Some(SurveyStep::Financial),
            SurveyStep::Financial => Some(SurveyStep::Results),
            SurveyStep::Results => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SurveyStep::Welcome => "welcome",
            SurveyStep::BasicInfo => "basic_info",
            SurveyStep::Biological => "biological",
            SurveyStep::Mental => "mental",
            SurveyStep::Financial => "financial",
            SurveyStep::Results => "results",
        }
    }
}

impl fmt::Display for SurveyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload completing the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "answers", rename_all = "snake_case")]
pub enum StepSubmission {
    Begin,
    BasicInfo(ParticipantProfile),
    Biological(AnswerRecord),
    Mental(AnswerRecord),
    Financial(AnswerRecord),
}

impl StepSubmission {
    /// The step this submission completes.
    pub fn step(&self) -> SurveyStep {
        match self {
            StepSubmission::Begin => SurveyStep::Welcome,
            StepSubmission::BasicInfo(_) => SurveyStep::BasicInfo,
            StepSubmission::Biological(_) => SurveyStep::Biological,
            StepSubmission::Mental(_) => SurveyStep::Mental,
            StepSubmission::Financial(_) => SurveyStep::Financial,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveySession {
    #[serde(default)]
    step: SurveyStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<ParticipantProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    biological: Option<AnswerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mental: Option<AnswerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    financial: Option<AnswerRecord>,
}

impl SurveySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SurveyStep {
        self.step
    }

    pub fn profile(&self) -> Option<&ParticipantProfile> {
        self.profile.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == SurveyStep::Results
    }

    /// Applies `submission` and returns the session positioned at the next step.
    pub fn advance(&self, submission: StepSubmission) -> Result<Self, FlowError> {
        let Some(following) = self.step.next() else {
            return Err(FlowError::AlreadyComplete);
        };

        if submission.step() != self.step {
            return Err(FlowError::OutOfOrder {
                expected: self.step,
                received: submission.step(),
            });
        }

        let mut next = self.clone();
        match submission {
            StepSubmission::Begin => {}
            StepSubmission::BasicInfo(profile) => {
                validate_profile(&profile)?;
                next.profile = Some(profile);
            }
            StepSubmission::Biological(record) => {
                validate_section(Section::Biological, &record)?;
                next.biological = Some(record);
            }
            StepSubmission::Mental(record) => {
                validate_section(Section::Mental, &record)?;
                next.mental = Some(record);
            }
            StepSubmission::Financial(record) => {
                validate_section(Section::Financial, &record)?;
                next.financial = Some(record);
            }
        }
        next.step = following;

        debug!(from = %self.step, to = %following, "survey advanced");
        Ok(next)
    }

    /// Profile and answers, available once the results step is reached.
    ///
    /// Sessions travel through clients between requests, so the stored
    /// profile and records are validated again before they are handed out.
    pub fn completed(&self) -> Result<(ParticipantProfile, AnswerSet), FlowError> {
        if !self.is_complete() {
            return Err(FlowError::Incomplete { step: self.step });
        }

        let profile = self.profile.clone().ok_or(FlowError::Incomplete {
            step: SurveyStep::BasicInfo,
        })?;
        validate_profile(&profile)?;

        let answers = AnswerSet {
            biological: stored_record(self.biological.as_ref(), Section::Biological)?,
            mental: stored_record(self.mental.as_ref(), Section::Mental)?,
            financial: stored_record(self.financial.as_ref(), Section::Financial)?,
        };

        Ok((profile, answers))
    }

    pub fn restart(&self) -> Self {
        Self::new()
    }
}

fn stored_record(
    record: Option<&AnswerRecord>,
    section: Section,
) -> Result<AnswerRecord, FlowError> {
    let step = match section {
        Section::Biological => SurveyStep::Biological,
        Section::Mental => SurveyStep::Mental,
        Section::Financial => SurveyStep::Financial,
    };
    let record = record.ok_or(FlowError::Incomplete { step })?;
    validate_section(section, record)?;
    Ok(record.clone())
}

fn validate_profile(profile: &ParticipantProfile) -> Result<(), FlowError> {
    for (field, value) in [
        ("first_name", &profile.first_name),
        ("last_name", &profile.last_name),
        ("email", &profile.email),
    ] {
        if value.trim().is_empty() {
            return Err(FlowError::MissingRequired { field });
        }
    }

    if !AGE_RANGES.iter().any(|option| *option == profile.age_range) {
        return Err(FlowError::InvalidOption {
            field: "age_range",
            value: profile.age_range.clone(),
        });
    }

    if !PRIMARY_GOALS.iter().any(|option| *option == profile.primary_goal) {
        return Err(FlowError::InvalidOption {
            field: "primary_goal",
            value: profile.primary_goal.clone(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("expected a {expected} submission, received {received}")]
    OutOfOrder {
        expected: SurveyStep,
        received: SurveyStep,
    },
    #[error("please fill in the required field '{field}'")]
    MissingRequired { field: &'static str },
    #[error("'{value}' is not a valid option for '{field}'")]
    InvalidOption { field: &'static str, value: String },
    #[error(transparent)]
    Answers(#[from] ScoringError),
    #[error("assessment already complete; restart to take it again")]
    AlreadyComplete,
    #[error("assessment has not reached results (stopped at {step})")]
    Incomplete { step: SurveyStep },
}

impl FlowError {
    pub fn field(&self) -> Option<&str> {
        match self {
            FlowError::MissingRequired { field } | FlowError::InvalidOption { field, .. } => {
                Some(field)
            }
            FlowError::Answers(err) => Some(err.field()),
            FlowError::OutOfOrder { .. }
            | FlowError::AlreadyComplete
            | FlowError::Incomplete { .. } => None,
        }
    }
}
