//! Human 2.0 assessment: questionnaire, scoring, survey flow and narrative report.

pub mod answers;
pub mod flow;
pub mod narrative;
pub mod questionnaire;
pub mod router;
pub mod scoring;
pub mod service;
pub mod tables;

#[cfg(test)]
mod tests;

pub use answers::{
    AnswerKind, AnswerRecord, AnswerSet, AnswerValue, ParticipantProfile, Section,
};
pub use flow::{FlowError, StepSubmission, SurveySession, SurveyStep};
pub use narrative::{
    Narrative, NarrativeProvider, NarrativeRequest, NarrativeService, NarrativeServiceError,
    NarrativeSource,
};
pub use questionnaire::{catalog, validate_section, CatalogView, Question, QuestionKind};
pub use router::assessment_router;
pub use scoring::{
    BiologicalBreakdown, CategoryScore, FinancialBreakdown, MentalBreakdown, ScoreBreakdown,
    ScoreCard, ScoringEngine, ScoringError,
};
pub use service::{
    AdvanceRequest, AssessmentReport, AssessmentRequest, AssessmentService, CallToAction,
};
