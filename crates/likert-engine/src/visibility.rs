use std::collections::{BTreeMap, BTreeSet};

use likert_core::models::answer::AnswerSet;
use likert_core::models::question::Question;
use likert_core::models::visibility::{Combinator, ControllingCondition, MatchMode};

use crate::error::{ConfigurationError, EngineError};

/// Determine which questions are currently shown given the respondent's
/// answers so far.
///
/// Questions are swept in ascending position order (ties broken by
/// declaration order) with a running map of selected-option sets for the
/// questions already decided: a hidden question contributes an empty set to
/// every later condition referencing it. A question with no rule is always
/// visible. Pure function, no side effects.
pub fn evaluate(
    questions: &[Question],
    answers: &AnswerSet,
) -> Result<BTreeSet<String>, EngineError> {
    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by_key(|q| q.position);

    let known: BTreeSet<&str> = questions.iter().map(|q| q.code.as_str()).collect();

    let mut visible = BTreeSet::new();
    // Selected options of every question decided so far, hidden or not.
    let mut selections: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();

    for question in ordered {
        let shown = match &question.visibility {
            None => true,
            Some(rule) => {
                let mut results = rule.conditions.iter().map(|condition| {
                    condition_holds(&question.code, condition, &selections, &known)
                });
                match rule.combinator {
                    Combinator::All => {
                        results.try_fold(true, |acc, r| Ok::<bool, EngineError>(acc && r?))?
                    }
                    Combinator::Any => {
                        results.try_fold(false, |acc, r| Ok::<bool, EngineError>(acc || r?))?
                    }
                }
            }
        };

        let selected = if shown {
            visible.insert(question.code.clone());
            answers
                .get(&question.code)
                .map(|a| a.selected.clone())
                .unwrap_or_default()
        } else {
            BTreeSet::new()
        };
        selections.insert(question.code.as_str(), selected);
    }

    Ok(visible)
}

fn condition_holds(
    question_code: &str,
    condition: &ControllingCondition,
    selections: &BTreeMap<&str, BTreeSet<String>>,
    known: &BTreeSet<&str>,
) -> Result<bool, EngineError> {
    let Some(selected) = selections.get(condition.question_code.as_str()) else {
        // Not decided yet: either the code is absent from the ruleset or the
        // controller sits at/after the controlled question.
        let error = if known.contains(condition.question_code.as_str()) {
            ConfigurationError::ControllerNotBefore {
                question_code: question_code.to_string(),
                controller_code: condition.question_code.clone(),
            }
        } else {
            ConfigurationError::UnknownController {
                question_code: question_code.to_string(),
                controller_code: condition.question_code.clone(),
            }
        };
        return Err(error.into());
    };

    let holds = match condition.match_mode {
        MatchMode::Any => condition.option_codes.iter().any(|c| selected.contains(c)),
        MatchMode::All => condition.option_codes.iter().all(|c| selected.contains(c)),
    };
    Ok(holds)
}
