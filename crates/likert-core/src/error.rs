use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown question kind: {0}")]
    UnknownQuestionKind(String),

    #[error("unknown formula: {0}")]
    UnknownFormula(String),
}
