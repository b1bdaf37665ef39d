use super::common::*;

use crate::assessment::answers::{AnswerKind, AnswerRecord, AnswerSet, AnswerValue, Section};
use crate::assessment::questionnaire::{questions, QuestionKind};
use crate::assessment::scoring::{
    ScoringEngine, ScoringError, BIOLOGICAL_WEIGHT, FINANCIAL_WEIGHT, MENTAL_WEIGHT,
};

#[test]
fn sample_answers_produce_expected_breakdown() {
    let card = ScoringEngine::new().evaluate(&answers()).expect("answers score");

    assert_close(card.breakdown.biological.sleep, 200.0 / 3.0);
    assert_close(card.breakdown.biological.energy, 100.0);
    assert_close(card.breakdown.biological.stress, 220.0 / 3.0);
    assert_close(card.breakdown.biological.nutrition, 75.0);

    assert_close(card.breakdown.mental.cognitive, 70.0);
    assert_close(card.breakdown.mental.emotional, 77.5);
    assert_close(card.breakdown.mental.mindset, 245.0 / 3.0);

    assert_close(card.breakdown.financial.wealth, 87.5);
    assert_close(card.breakdown.financial.stability, 77.5);
    assert_close(card.breakdown.financial.investment, 60.0);
    assert_close(card.breakdown.financial.money_mindset, 60.0);
}

#[test]
fn sample_answers_produce_expected_categories() {
    let scores = ScoringEngine::new().score(&answers()).expect("answers score");

    assert_close(scores.biological, 78.833_333_333_333_33);
    assert_close(scores.mental, 76.708_333_333_333_33);
    assert_close(scores.financial, 72.625);
    assert!((scores.overall - 76.021_25).abs() < 1e-6);
}

#[test]
fn overall_is_the_weighted_category_sum() {
    let scores = ScoringEngine::new().score(&answers()).expect("answers score");
    let expected = scores.biological * BIOLOGICAL_WEIGHT
        + scores.mental * MENTAL_WEIGHT
        + scores.financial * FINANCIAL_WEIGHT;

    assert_close(scores.overall, expected);
}

#[test]
fn scoring_is_pure() {
    let engine = ScoringEngine::new();
    let input = answers();

    let first = engine.evaluate(&input).expect("first run");
    let second = engine.evaluate(&input).expect("second run");

    assert_eq!(first, second);
    assert_eq!(input, answers());
}

#[test]
fn sleep_example_scores_two_thirds() {
    let card = ScoringEngine::new().evaluate(&answers()).expect("answers score");
    assert!((card.breakdown.biological.sleep - 66.67).abs() < 0.01);
}

#[test]
fn unknown_wake_refreshed_label_scores_neutral() {
    let mut input = answers();
    input.biological.insert("wake_refreshed", "Most mornings");

    let card = ScoringEngine::new().evaluate(&input).expect("default applies");

    // (50 + 75 + 50) / 3
    assert_close(card.breakdown.biological.sleep, 175.0 / 3.0);
}

#[test]
fn unknown_label_elsewhere_is_rejected() {
    let mut input = answers();
    input.financial.insert("savings_rate", "50%");

    let err = ScoringEngine::new().score(&input).expect_err("label rejected");

    assert_eq!(
        err,
        ScoringError::InvalidCategoryValue {
            field: "savings_rate".to_string(),
            value: "50%".to_string(),
        }
    );
}

#[test]
fn missing_answer_names_the_field() {
    let mut input = answers();
    input.mental.remove("empathy_level");

    let err = ScoringEngine::new().score(&input).expect_err("missing field");

    assert_eq!(
        err,
        ScoringError::MissingField {
            field: "empathy_level".to_string()
        }
    );
    assert_eq!(err.field(), "empathy_level");
}

#[test]
fn out_of_range_slider_is_rejected() {
    let mut input = answers();
    input.biological.insert("sleep_hours", 13);

    let err = ScoringEngine::new().score(&input).expect_err("out of range");

    assert_eq!(
        err,
        ScoringError::ValueOutOfRange {
            field: "sleep_hours".to_string(),
            value: 13,
            min: 4,
            max: 12,
        }
    );
}

#[test]
fn text_where_slider_expected_is_rejected() {
    let mut input = answers();
    input.financial.insert("money_stress", "high");

    let err = ScoringEngine::new().score(&input).expect_err("wrong kind");

    assert_eq!(
        err,
        ScoringError::UnexpectedAnswerKind {
            field: "money_stress".to_string(),
            expected: AnswerKind::Scale,
            found: AnswerKind::Choice,
        }
    );
}

#[test]
fn unscored_fields_do_not_move_scores() {
    let mut input = answers();
    input.financial.remove("business_revenue");
    input.financial.insert("entrepreneurial_interest", 1);

    let baseline = ScoringEngine::new().score(&answers()).expect("baseline");
    let varied = ScoringEngine::new().score(&input).expect("varied");

    assert_eq!(baseline, varied);
}

/// Answers every question with the `pick`-th option or slider position.
fn uniform_record(section: Section, pick: usize) -> AnswerRecord {
    let mut record = AnswerRecord::new();
    for question in questions(section) {
        let value = match question.kind {
            QuestionKind::Scale { range: (min, max), .. } => {
                let span = max - min;
                AnswerValue::Scale(min + span * (pick as i32 % 3) / 2)
            }
            QuestionKind::MultiChoice { .. } => AnswerValue::Selections(Vec::new()),
            ref kind => {
                let options = kind.options();
                AnswerValue::from(options[pick % options.len()])
            }
        };
        record.insert(question.id, value);
    }
    record
}

#[test]
fn every_category_stays_within_bounds() {
    let engine = ScoringEngine::new();

    for pick in 0..7 {
        let input = AnswerSet {
            biological: uniform_record(Section::Biological, pick),
            mental: uniform_record(Section::Mental, pick),
            financial: uniform_record(Section::Financial, pick),
        };

        let scores = engine.score(&input).expect("uniform answers score");

        for value in [
            scores.biological,
            scores.mental,
            scores.financial,
            scores.overall,
        ] {
            assert!((0.0..=100.0).contains(&value), "pick {pick}: {value}");
        }
        assert_close(
            scores.overall,
            scores.biological * BIOLOGICAL_WEIGHT
                + scores.mental * MENTAL_WEIGHT
                + scores.financial * FINANCIAL_WEIGHT,
        );
    }
}

#[test]
fn best_answers_reach_the_top_of_the_scale() {
    let mut input = answers();
    for (field, value) in [
        ("sleep_hours", AnswerValue::Scale(12)),
        ("sleep_quality", "Excellent".into()),
        ("wake_refreshed", "Always".into()),
        ("stress_level", AnswerValue::Scale(1)),
        ("stress_management", "Excellent".into()),
        ("recovery_time", "Very quickly".into()),
        ("nutrition_quality", "Excellent".into()),
        ("exercise_frequency", "Daily".into()),
    ] {
        input.biological.insert(field, value);
    }

    let card = ScoringEngine::new().evaluate(&input).expect("answers score");

    assert_close(card.breakdown.biological.sleep, 100.0);
    assert_close(card.breakdown.biological.stress, 290.0 / 3.0);
    assert_close(card.breakdown.biological.nutrition, 100.0);
}
