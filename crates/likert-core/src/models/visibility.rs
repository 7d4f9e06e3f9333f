use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How a condition's option codes are matched against the controlling
/// question's selected options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MatchMode {
    /// Every listed option code must be selected.
    All,
    /// At least one listed option code must be selected.
    Any,
}

/// How a rule combines its conditions: `All` = AND, `Any` = OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Combinator {
    All,
    Any,
}

/// One condition over an earlier (controlling) question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ControllingCondition {
    pub question_code: String,
    pub match_mode: MatchMode,
    pub option_codes: BTreeSet<String>,
}

/// Visibility rule attached to a question. The controlling questions must
/// all be positioned before the controlled question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisibilityRule {
    pub combinator: Combinator,
    pub conditions: Vec<ControllingCondition>,
}
