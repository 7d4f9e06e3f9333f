use std::collections::BTreeMap;

use likert_core::models::answer::{Answer, AnswerSet};
use likert_core::models::factor::{Factor, FactorKind, Formula};
use likert_core::models::question::Question;

use crate::error::{ConfigurationError, EngineError};

/// Abort traversal past this depth rather than walking an adversarially
/// deep composite graph.
pub const MAX_FACTOR_DEPTH: usize = 64;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Compute every factor's score over the given answers.
///
/// The composite dependency graph is walked iteratively in post-order with
/// explicit visiting/done markers per node, so a cycle is detected as
/// `CyclicFactorError` without unbounded recursion. Callers that care about
/// visibility pass answers already restricted to visible questions; an
/// absent answer scores the same as a hidden question.
pub fn compute(
    factors: &[Factor],
    questions: &[Question],
    answers: &AnswerSet,
) -> Result<BTreeMap<String, f64>, EngineError> {
    let factor_index: BTreeMap<&str, &Factor> =
        factors.iter().map(|f| (f.code.as_str(), f)).collect();
    let question_index: BTreeMap<&str, &Question> =
        questions.iter().map(|q| (q.code.as_str(), q)).collect();

    let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();

    for root in factors {
        if marks.get(root.code.as_str()) == Some(&Mark::Done) {
            continue;
        }

        // (factor, children already pushed)
        let mut stack: Vec<(&Factor, bool)> = vec![(root, false)];
        // Codes currently marked Visiting, outermost first.
        let mut path: Vec<&str> = Vec::new();

        while let Some((factor, entered)) = stack.pop() {
            if entered {
                let score = score_factor(factor, &question_index, &scores, answers)?;
                scores.insert(factor.code.clone(), score);
                marks.insert(&factor.code, Mark::Done);
                path.pop();
                continue;
            }

            match marks.get(factor.code.as_str()).unwrap_or(&Mark::Unvisited) {
                Mark::Done => continue,
                Mark::Visiting => {
                    let start = path
                        .iter()
                        .position(|c| *c == factor.code)
                        .unwrap_or_default();
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|c| c.to_string()).collect();
                    cycle.push(factor.code.clone());
                    return Err(EngineError::CyclicFactor { cycle });
                }
                Mark::Unvisited => {}
            }

            marks.insert(&factor.code, Mark::Visiting);
            path.push(&factor.code);
            if path.len() > MAX_FACTOR_DEPTH {
                return Err(ConfigurationError::DepthExceeded {
                    factor_code: root.code.clone(),
                    max_depth: MAX_FACTOR_DEPTH,
                }
                .into());
            }
            stack.push((factor, true));

            if factor.kind == FactorKind::Composite {
                for source in factor.source_codes.iter().rev() {
                    let Some(&child) = factor_index.get(source.as_str()) else {
                        return Err(ConfigurationError::UnknownSourceFactor {
                            factor_code: factor.code.clone(),
                            source_code: source.clone(),
                        }
                        .into());
                    };
                    stack.push((child, false));
                }
            }
        }
    }

    Ok(scores)
}

/// Aggregate one factor once every composite source is already scored.
fn score_factor(
    factor: &Factor,
    question_index: &BTreeMap<&str, &Question>,
    scores: &BTreeMap<String, f64>,
    answers: &AnswerSet,
) -> Result<f64, EngineError> {
    if factor.formula == Formula::CountMatching {
        return count_matching(factor, question_index, answers);
    }

    let items = match factor.kind {
        FactorKind::Leaf => {
            let mut items = Vec::with_capacity(factor.source_codes.len());
            for source in &factor.source_codes {
                let Some(question) = question_index.get(source.as_str()) else {
                    return Err(ConfigurationError::UnknownSourceQuestion {
                        factor_code: factor.code.clone(),
                        question_code: source.clone(),
                    }
                    .into());
                };
                items.push(item_score(question, answers.get(source)));
            }
            items
        }
        FactorKind::Composite => factor
            .source_codes
            .iter()
            // The post-order walk scored every source before this factor.
            .filter_map(|source| scores.get(source).copied())
            .collect(),
    };

    if items.is_empty() && factor.required_non_empty {
        return Err(EngineError::EmptyFactor {
            factor_code: factor.code.clone(),
        });
    }

    let total: f64 = items.iter().sum();
    let score = match factor.formula {
        Formula::Sum => total,
        Formula::Avg => {
            if items.is_empty() {
                0.0
            } else {
                total / items.len() as f64
            }
        }
        Formula::CountMatching => unreachable!("handled above"),
    };
    Ok(score)
}

/// One source question's contribution to a leaf factor. A selected code
/// that matches no current option is stale and treated as not selected, so
/// historical answers keep scoring against evolved rulesets.
fn item_score(question: &Question, answer: Option<&Answer>) -> f64 {
    let Some(answer) = answer else { return 0.0 };

    if question.kind.is_multi_select() {
        answer
            .selected
            .iter()
            .filter_map(|code| question.option(code))
            .filter_map(|option| option.score)
            .sum()
    } else {
        // Single-select: the first selected code in the question's declared
        // option order wins, so extra stale codes cannot skew the score.
        question
            .options
            .iter()
            .find(|option| answer.selected.contains(&option.code))
            .and_then(|option| option.score)
            .unwrap_or(0.0)
    }
}

/// Count source questions whose recorded answer content is in the factor's
/// target set. Numeric option scores are ignored; hidden and unanswered
/// sources are excluded from both count and denominator.
fn count_matching(
    factor: &Factor,
    question_index: &BTreeMap<&str, &Question>,
    answers: &AnswerSet,
) -> Result<f64, EngineError> {
    if factor.kind == FactorKind::Composite {
        return Err(ConfigurationError::CountMatchingOnComposite {
            factor_code: factor.code.clone(),
        }
        .into());
    }

    let mut answered = 0usize;
    let mut matching = 0usize;
    for source in &factor.source_codes {
        let Some(question) = question_index.get(source.as_str()) else {
            return Err(ConfigurationError::UnknownSourceQuestion {
                factor_code: factor.code.clone(),
                question_code: source.clone(),
            }
            .into());
        };
        let Some(answer) = answers.get(source).filter(|a| !a.is_empty()) else {
            continue;
        };
        answered += 1;
        if answer_content_matches(question, answer, factor) {
            matching += 1;
        }
    }

    if answered == 0 && factor.required_non_empty {
        return Err(EngineError::EmptyFactor {
            factor_code: factor.code.clone(),
        });
    }
    Ok(matching as f64)
}

fn answer_content_matches(question: &Question, answer: &Answer, factor: &Factor) -> bool {
    if question.kind.has_options() {
        answer
            .selected
            .iter()
            .filter_map(|code| question.option(code))
            .any(|option| factor.target_contents.contains(&option.content))
    } else {
        answer
            .text
            .as_deref()
            .is_some_and(|text| factor.target_contents.contains(text))
    }
}

/// The highest score the given leaf factor could produce, summing each
/// source question's single best option score. For multi-select questions
/// this is a known approximation (one option, not all selectable options),
/// carried forward unchanged from the authoring tool.
pub fn max_attainable_score(
    factor: &Factor,
    questions: &[Question],
) -> Result<f64, EngineError> {
    if factor.kind == FactorKind::Composite {
        return Err(ConfigurationError::MaxAttainableOnComposite {
            factor_code: factor.code.clone(),
        }
        .into());
    }

    let question_index: BTreeMap<&str, &Question> =
        questions.iter().map(|q| (q.code.as_str(), q)).collect();

    let mut total = 0.0;
    for source in &factor.source_codes {
        let Some(question) = question_index.get(source.as_str()) else {
            return Err(ConfigurationError::UnknownSourceQuestion {
                factor_code: factor.code.clone(),
                question_code: source.clone(),
            }
            .into());
        };
        total += question
            .options
            .iter()
            .filter_map(|option| option.score)
            .fold(0.0, f64::max);
    }
    Ok(total)
}
