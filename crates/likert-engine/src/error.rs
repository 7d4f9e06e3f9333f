use thiserror::Error;

/// Structural evaluation failures. All three are authoring defects, never
/// transient: they propagate synchronously with no partial result and are
/// never retried.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("cyclic factor dependency: {}", cycle.join(" -> "))]
    CyclicFactor { cycle: Vec<String> },

    #[error("factor '{factor_code}' is required non-empty but resolved no source items")]
    EmptyFactor { factor_code: String },
}

/// A ruleset reference that should have been rejected by the authoring tool
/// before publish. The engine re-checks defensively but performs no repair.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("question '{question_code}' is controlled by unknown question '{controller_code}'")]
    UnknownController {
        question_code: String,
        controller_code: String,
    },

    #[error(
        "question '{question_code}' is controlled by '{controller_code}', which is not positioned before it"
    )]
    ControllerNotBefore {
        question_code: String,
        controller_code: String,
    },

    #[error("factor '{factor_code}' references unknown question '{question_code}'")]
    UnknownSourceQuestion {
        factor_code: String,
        question_code: String,
    },

    #[error("factor '{factor_code}' references unknown factor '{source_code}'")]
    UnknownSourceFactor {
        factor_code: String,
        source_code: String,
    },

    #[error("count_matching is only valid on leaf factors, but '{factor_code}' is composite")]
    CountMatchingOnComposite { factor_code: String },

    #[error("max attainable score is only defined for leaf factors, but '{factor_code}' is composite")]
    MaxAttainableOnComposite { factor_code: String },

    #[error("factor graph beneath '{factor_code}' exceeds maximum depth {max_depth}")]
    DepthExceeded {
        factor_code: String,
        max_depth: usize,
    },
}
