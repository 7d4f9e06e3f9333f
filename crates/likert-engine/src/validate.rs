use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use likert_core::models::factor::{Factor, FactorKind, Formula};
use likert_core::models::ruleset::Ruleset;

/// What an authoring-time check found wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IssueKind {
    DuplicateQuestionCode,
    DuplicateOptionCode,
    DuplicateFactorCode,
    UnknownController,
    ControllerNotBefore,
    UnknownConditionOption,
    UnknownFactorSource,
    FactorCycle,
    MultipleTotalScoreFactors,
    CountMatchingOnComposite,
    EmptyTargetContents,
    InvertedBand,
}

/// One defect in an authored ruleset, addressed to the authoring tool.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// The question or factor code the issue is about.
    pub subject: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, subject: &str, message: String) -> Self {
        ValidationIssue {
            kind,
            subject: subject.to_string(),
            message,
        }
    }
}

/// Check a ruleset for authoring defects before publish.
///
/// Collects every issue rather than aborting at the first, so the authoring
/// tool can show them all at once. A ruleset that passes here cannot raise
/// `ConfigurationError` or `CyclicFactorError` at evaluation time.
pub fn validate(ruleset: &Ruleset) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_questions(ruleset, &mut issues);
    check_factors(ruleset, &mut issues);
    check_factor_cycles(&ruleset.factors, &mut issues);

    issues
}

fn check_questions(ruleset: &Ruleset, issues: &mut Vec<ValidationIssue>) {
    let mut seen_codes = BTreeSet::new();
    for question in &ruleset.questions {
        if !seen_codes.insert(question.code.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateQuestionCode,
                &question.code,
                format!("question code '{}' is declared more than once", question.code),
            ));
        }

        let mut seen_options = BTreeSet::new();
        for option in &question.options {
            if !seen_options.insert(option.code.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::DuplicateOptionCode,
                    &question.code,
                    format!(
                        "question '{}' declares option code '{}' more than once",
                        question.code, option.code
                    ),
                ));
            }
        }

        let Some(rule) = &question.visibility else {
            continue;
        };
        for condition in &rule.conditions {
            let Some(controller) = ruleset.question(&condition.question_code) else {
                issues.push(ValidationIssue::new(
                    IssueKind::UnknownController,
                    &question.code,
                    format!(
                        "question '{}' is controlled by unknown question '{}'",
                        question.code, condition.question_code
                    ),
                ));
                continue;
            };
            if controller.position >= question.position {
                issues.push(ValidationIssue::new(
                    IssueKind::ControllerNotBefore,
                    &question.code,
                    format!(
                        "question '{}' is controlled by '{}', which is not positioned before it",
                        question.code, condition.question_code
                    ),
                ));
            }
            for code in &condition.option_codes {
                if controller.option(code).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::UnknownConditionOption,
                        &question.code,
                        format!(
                            "condition on question '{}' references option '{}' absent from '{}'",
                            question.code, code, condition.question_code
                        ),
                    ));
                }
            }
        }
    }
}

fn check_factors(ruleset: &Ruleset, issues: &mut Vec<ValidationIssue>) {
    let mut seen_codes = BTreeSet::new();
    let mut total_codes = Vec::new();

    for factor in &ruleset.factors {
        if !seen_codes.insert(factor.code.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateFactorCode,
                &factor.code,
                format!("factor code '{}' is declared more than once", factor.code),
            ));
        }
        if factor.is_total_score {
            total_codes.push(factor.code.as_str());
        }

        for source in &factor.source_codes {
            let known = match factor.kind {
                FactorKind::Leaf => ruleset.question(source).is_some(),
                FactorKind::Composite => ruleset.factor(source).is_some(),
            };
            if !known {
                issues.push(ValidationIssue::new(
                    IssueKind::UnknownFactorSource,
                    &factor.code,
                    format!(
                        "factor '{}' references unknown source '{}'",
                        factor.code, source
                    ),
                ));
            }
        }

        if factor.formula == Formula::CountMatching {
            if factor.kind == FactorKind::Composite {
                issues.push(ValidationIssue::new(
                    IssueKind::CountMatchingOnComposite,
                    &factor.code,
                    format!(
                        "factor '{}' uses count_matching but is composite",
                        factor.code
                    ),
                ));
            }
            if factor.target_contents.is_empty() {
                issues.push(ValidationIssue::new(
                    IssueKind::EmptyTargetContents,
                    &factor.code,
                    format!(
                        "factor '{}' uses count_matching with no target contents",
                        factor.code
                    ),
                ));
            }
        }

        if let Some(table) = &factor.interpretation {
            for band in &table.bands {
                if band.start > band.end {
                    issues.push(ValidationIssue::new(
                        IssueKind::InvertedBand,
                        &factor.code,
                        format!(
                            "factor '{}' has a band with start {} greater than end {}",
                            factor.code, band.start, band.end
                        ),
                    ));
                }
            }
        }
    }

    if total_codes.len() > 1 {
        issues.push(ValidationIssue::new(
            IssueKind::MultipleTotalScoreFactors,
            total_codes[1],
            format!(
                "more than one factor is flagged as the total score: {}",
                total_codes.join(", ")
            ),
        ));
    }
}

/// Iterative DFS over the composite graph; unknown sources are skipped here
/// because `check_factors` already reported them.
fn check_factor_cycles(factors: &[Factor], issues: &mut Vec<ValidationIssue>) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    let index: BTreeMap<&str, &Factor> = factors.iter().map(|f| (f.code.as_str(), f)).collect();
    let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();

    for root in factors {
        if marks.contains_key(root.code.as_str()) {
            continue;
        }
        let mut stack: Vec<(&Factor, bool)> = vec![(root, false)];
        let mut path: Vec<&str> = Vec::new();

        while let Some((factor, entered)) = stack.pop() {
            if entered {
                marks.insert(&factor.code, Mark::Done);
                path.pop();
                continue;
            }
            match marks.get(factor.code.as_str()) {
                Some(Mark::Done) => continue,
                Some(Mark::Visiting) => {
                    let start = path
                        .iter()
                        .position(|c| *c == factor.code)
                        .unwrap_or_default();
                    let mut cycle: Vec<&str> = path[start..].to_vec();
                    cycle.push(&factor.code);
                    issues.push(ValidationIssue::new(
                        IssueKind::FactorCycle,
                        &factor.code,
                        format!("factor dependency cycle: {}", cycle.join(" -> ")),
                    ));
                    continue;
                }
                None => {}
            }

            marks.insert(&factor.code, Mark::Visiting);
            path.push(&factor.code);
            stack.push((factor, true));

            if factor.kind == FactorKind::Composite {
                for source in factor.source_codes.iter().rev() {
                    if let Some(&child) = index.get(source.as_str()) {
                        stack.push((child, false));
                    }
                }
            }
        }
    }
}
