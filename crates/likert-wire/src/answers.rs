use std::collections::BTreeMap;

use serde::Deserialize;

use likert_core::models::answer::{Answer, AnswerSet};

use crate::error::WireError;

/// The three shapes the historical system recorded per question: a bare
/// string (radio/select), an array of strings (checkbox), or an object
/// carrying free text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyAnswer {
    Code(String),
    Codes(Vec<String>),
    Text { content: String },
}

/// Parse a legacy answer payload, keyed by question code.
pub fn parse_answers(input: &str) -> Result<AnswerSet, WireError> {
    let legacy: BTreeMap<String, LegacyAnswer> = serde_json::from_str(input)?;

    let mut answers = AnswerSet::new();
    for (question_code, answer) in legacy {
        let answer = match answer {
            LegacyAnswer::Code(code) => Answer::select([code]),
            LegacyAnswer::Codes(codes) => Answer::select(codes),
            LegacyAnswer::Text { content } => Answer::text(content),
        };
        answers.insert(question_code, answer);
    }
    Ok(answers)
}
