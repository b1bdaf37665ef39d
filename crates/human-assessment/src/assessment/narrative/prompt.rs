use crate::assessment::answers::{AnswerRecord, AnswerSet, ParticipantProfile};
use crate::assessment::scoring::CategoryScore;

/// Renders the fixed analysis prompt for one participant.
pub fn build_prompt(
    profile: &ParticipantProfile,
    scores: &CategoryScore,
    answers: &AnswerSet,
    brand_message: &str,
) -> String {
    format!(
        "As a Human 2.0 Optimization Expert, analyze this comprehensive assessment data and \
         provide personalized insights and recommendations.\n\
         \n\
         ASSESSMENT SCORES:\n\
         - Biological Optimization: {biological:.1}/100\n\
         - Mental Architecture: {mental:.1}/100\n\
         - Financial Intelligence: {financial:.1}/100\n\
         - Overall Human 2.0 Score: {overall:.1}/100\n\
         \n\
         PARTICIPANT PROFILE:\n\
         Name: {name}\n\
         Age: {age}\n\
         Occupation: {occupation}\n\
         Primary Goal: {goal}\n\
         \n\
         BIOLOGICAL DATA: {biological_data}\n\
         MENTAL DATA: {mental_data}\n\
         FINANCIAL DATA: {financial_data}\n\
         \n\
         Provide a comprehensive analysis that includes:\n\
         1. Overall Human 2.0 readiness assessment\n\
         2. Top 3 optimization opportunities with specific impact potential\n\
         3. Interconnection analysis (how improving one area will amplify others)\n\
         4. Personalized \"dangerous upgrade\" recommendations\n\
         5. Specific AI tools and strategies that would be most beneficial\n\
         6. 30-60-90 day optimization roadmap\n\
         \n\
         Write in an engaging, motivational tone that aligns with \"{brand_message}\" messaging.\n\
         Be specific and actionable while maintaining authenticity and street-smart wisdom.\n",
        biological = scores.biological,
        mental = scores.mental,
        financial = scores.financial,
        overall = scores.overall,
        name = profile.full_name(),
        age = profile.age_range,
        occupation = blank_as_unspecified(&profile.occupation),
        goal = profile.goal(),
        biological_data = render_record(&answers.biological),
        mental_data = render_record(&answers.mental),
        financial_data = render_record(&answers.financial),
    )
}

fn render_record(record: &AnswerRecord) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
}

fn blank_as_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}
