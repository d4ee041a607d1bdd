//! Prompt construction for the text-generation provider.
//!
//! The reply contract (`Title:` line, then `Description:` line) is what
//! [`super::parser::parse_reply`] looks for, so the instruction block below
//! and the parser must change together.

use super::types::IdeaRequest;

const PREAMBLE: &str = "Generate a creative and romantic date night idea. ";

const INSTRUCTIONS: &str = "\n\nRespond in this exact format:\n\
Title: [Creative title]\n\
Description: [2-3 sentence description of the date idea]\n\n\
Make it specific, romantic, and actionable.";

/// Build the single user message sent to the provider.
///
/// Clauses are appended in a fixed order: mood, budget, then location,
/// time of day and occasion when present.
pub fn build_prompt(request: &IdeaRequest) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + INSTRUCTIONS.len() + 128);
    prompt.push_str(PREAMBLE);

    prompt.push_str(&format!("Mood: {}. ", request.mood().unwrap_or_default()));
    prompt.push_str(&format!("Budget: {}. ", request.budget().unwrap_or_default()));

    if let Some(location) = request.location() {
        prompt.push_str(&format!("Location preference: {location}. "));
    }
    if let Some(time_of_day) = request.time_of_day() {
        prompt.push_str(&format!("Time of day: {time_of_day}. "));
    }
    if let Some(occasion) = request.occasion() {
        prompt.push_str(&format!("Occasion: {occasion}. "));
    }

    prompt.push_str(INSTRUCTIONS);
    prompt
}
