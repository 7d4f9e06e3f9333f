use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One respondent's answer to one question: selected option codes (possibly
/// empty) and/or a free-text value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    #[serde(default)]
    pub selected: BTreeSet<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Answer {
    /// An answer selecting the given option codes.
    pub fn select<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer {
            selected: codes.into_iter().map(Into::into).collect(),
            text: None,
        }
    }

    /// A free-text answer.
    pub fn text(value: impl Into<String>) -> Self {
        Answer {
            selected: BTreeSet::new(),
            text: Some(value.into()),
        }
    }

    /// Whether this answer records anything at all.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.text.as_deref().is_none_or(str::is_empty)
    }
}

/// A respondent's answers, keyed by question code. Ordered so that
/// serialization is stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet {
    answers: BTreeMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_code: impl Into<String>, answer: Answer) {
        self.answers.insert(question_code.into(), answer);
    }

    pub fn get(&self, question_code: &str) -> Option<&Answer> {
        self.answers.get(question_code)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.answers.iter()
    }

    /// A copy containing only answers to the given question codes.
    pub fn restricted_to(&self, question_codes: &BTreeSet<String>) -> AnswerSet {
        AnswerSet {
            answers: self
                .answers
                .iter()
                .filter(|(code, _)| question_codes.contains(*code))
                .map(|(code, answer)| (code.clone(), answer.clone()))
                .collect(),
        }
    }
}
