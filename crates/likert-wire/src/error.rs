use thiserror::Error;

use likert_core::error::CoreError;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid questionnaire: {0}")]
    Core(#[from] CoreError),

    #[error("unknown factor kind: {0}")]
    UnknownFactorKind(String),

    #[error(
        "visibility rule on question '{question_code}' selects no option codes of '{controller_code}'"
    )]
    EmptyRule {
        question_code: String,
        controller_code: String,
    },
}
