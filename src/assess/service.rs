// src/assess/service.rs
// Contract with the generative-scoring collaborator: request building
// and reply parsing only. No transport lives here; the wire call is a
// synchronous request/response owned by whoever implements it.

use std::error::Error;

use crate::model::{HeroAssessment, HeroProfile};

pub const SYSTEM_MESSAGE: &str = "\
You are an Overwatch hero historian and data analyst. You will be \
provided with JSON data describing one hero's abilities and their \
changelog history over several patches. Analyze this data and generate \
a historical assessment of the hero's changes: the hero's name, \
per-ability change scores, and an overall judgement per patch. Respond \
in JSON with this shape:
{
    \"hero_name\": \"Hero Name\",
    \"hero_assessment\": \"Your assessment of the hero's changes.\",
    \"historical_changes\": [
        {
            \"patch_date\": \"Patch Date\",
            \"ability_changes_judgements\": {
                \"Ability Name\": [
                    { \"score\": 0, \"changes\": [\"Change description (Score)\"] }
                ]
            },
            \"overall_judgement\": \"Overall judgement of the hero's state.\"
        }
    ]
}";

pub const INITIAL_PROMPT: &str = "\
Please provide the JSON data for the hero you want analyzed, including \
their abilities and changelog history. Once I have the data, I will \
generate the historical assessment.";

pub const USER_PROMPT: &str = "\
Analyze the JSON data I am providing: one hero, their abilities and \
stats, and a changelog of how the abilities changed across patches. \
Score the sentiment of each change with these rules:
 - Cooldown reduction is positive. Cooldown increase is negative.
 - Increased health/armor/shields is positive. Converting health to \
armor/shields is positive. Converting armor/shields to health is \
negative.
 - Increased damage is positive. Reduced damage is negative.
 - Reduced delays are positive. Increased delays are negative.
 - Increased effect durations are positive. Reduced effect durations \
are negative.
 - No longer dealing damage to self is positive.
 - Reduced ultimate cost is positive. Increased ultimate cost is \
negative.
If a change is reverted in a later patch, the revert's score is the \
inverse of the original change's score.
The hero_assessment must state the number of positive and negative \
changes, the direction the changes have pushed the hero, and a score \
out of 10 for the hero's current state. Present the result in the \
format given in the system prompt.";

/// One message of the request. Roles follow the chat-completion
/// convention: system, user, assistant.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Fixed instruction messages plus the serialized hero profile.
pub fn build_request(profile: &HeroProfile) -> Result<Vec<ChatMessage>, Box<dyn Error>> {
    Ok(vec![
        ChatMessage { role: "system", content: s!(SYSTEM_MESSAGE) },
        ChatMessage { role: "user", content: s!(USER_PROMPT) },
        ChatMessage { role: "assistant", content: s!(INITIAL_PROMPT) },
        ChatMessage { role: "user", content: serde_json::to_string(profile)? },
    ])
}

/// What came back: structured data, or text to persist verbatim. The
/// caller picks the persistence target from the variant, never from a
/// caught failure.
#[derive(Clone, Debug, PartialEq)]
pub enum AssessorReply {
    Parsed(HeroAssessment),
    Unstructured(String),
}

/// Parse a reply into the judgement schema. Replies often wrap the
/// JSON in prose, so the outermost brace slice gets a second try
/// before the text is declared unstructured.
pub fn parse_reply(raw: &str) -> AssessorReply {
    if let Ok(parsed) = serde_json::from_str::<HeroAssessment>(raw) {
        return AssessorReply::Parsed(parsed);
    }
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Ok(parsed) = serde_json::from_str::<HeroAssessment>(&raw[start..=end]) {
                return AssessorReply::Parsed(parsed);
            }
        }
    }
    AssessorReply::Unstructured(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "hero_name": "Ana",
        "hero_assessment": "Mostly buffed. Current state: 7/10.",
        "historical_changes": [
            {
                "patch_date": "2023-01-01",
                "ability_changes_judgements": {
                    "Sleep Dart": [ { "score": 1, "changes": ["Cooldown reduced from 14 to 12 seconds (1)"] } ]
                },
                "overall_judgement": "buffed (net +1)"
            }
        ]
    }"#;

    #[test]
    fn whole_reply_parses() {
        let AssessorReply::Parsed(a) = parse_reply(REPLY) else {
            panic!("expected structured reply");
        };
        assert_eq!(a.hero_name, "Ana");
        assert_eq!(a.historical_changes.len(), 1);
    }

    #[test]
    fn json_embedded_in_prose_is_salvaged() {
        let wrapped = format!("Here is the assessment you asked for:\n{REPLY}\nLet me know!");
        assert!(matches!(parse_reply(&wrapped), AssessorReply::Parsed(_)));
    }

    #[test]
    fn non_conforming_text_is_kept_verbatim() {
        let raw = "I'm sorry, I cannot produce JSON today. {not json}";
        assert_eq!(parse_reply(raw), AssessorReply::Unstructured(s!(raw)));
    }

    #[test]
    fn request_carries_the_serialized_profile_last() {
        let profile = HeroProfile {
            name: s!("Ana"),
            abilities: Vec::new(),
            changelog: Vec::new(),
        };
        let messages = build_request(&profile).unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert!(messages[3].content.contains("\"Name\":\"Ana\""));
    }
}
