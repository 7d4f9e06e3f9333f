use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::visibility::VisibilityRule;
use crate::error::CoreError;

/// The capture-widget kind the authoring tool placed for a question.
/// Selection semantics derive from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    Radio,
    Checkbox,
    Select,
    Input,
    Textarea,
    Date,
    Rate,
}

impl QuestionKind {
    /// Whether the widget allows more than one selected option.
    pub fn is_multi_select(&self) -> bool {
        matches!(self, QuestionKind::Checkbox)
    }

    /// Whether the widget selects from authored options at all.
    /// Free-text kinds record a text value instead.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionKind::Radio | QuestionKind::Checkbox | QuestionKind::Select | QuestionKind::Rate
        )
    }
}

impl FromStr for QuestionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "radio" => Ok(QuestionKind::Radio),
            "checkbox" => Ok(QuestionKind::Checkbox),
            "select" => Ok(QuestionKind::Select),
            "input" => Ok(QuestionKind::Input),
            "textarea" => Ok(QuestionKind::Textarea),
            "date" => Ok(QuestionKind::Date),
            "rate" => Ok(QuestionKind::Rate),
            other => Err(CoreError::UnknownQuestionKind(other.to_string())),
        }
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionOption {
    pub code: String,
    pub content: String,
    pub score: Option<f64>,
}

/// An authored question: unique code, widget kind, ordinal position in the
/// questionnaire, prompt text, ordered options, and an optional visibility
/// rule over earlier questions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub code: String,
    pub kind: QuestionKind,
    pub position: u32,
    pub content: String,
    pub options: Vec<QuestionOption>,
    pub visibility: Option<VisibilityRule>,
}

impl Question {
    /// Look up an option by code.
    pub fn option(&self, code: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.code == code)
    }
}
