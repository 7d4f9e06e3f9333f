use std::collections::BTreeSet;

use serde::Deserialize;
use uuid::Uuid;

use likert_core::models::factor::{Factor, FactorKind, Formula};
use likert_core::models::interpretation::{Band, InterpretationTable};
use likert_core::models::question::{Question, QuestionOption};
use likert_core::models::ruleset::Ruleset;
use likert_core::models::visibility::{
    Combinator, ControllingCondition, MatchMode, VisibilityRule,
};

use crate::error::WireError;

#[derive(Debug, Deserialize)]
struct LegacyQuestionnaire {
    title: String,
    #[serde(default)]
    version: u32,
    questions: Vec<LegacyQuestion>,
    #[serde(default)]
    factors: Vec<LegacyFactor>,
}

#[derive(Debug, Deserialize)]
struct LegacyQuestion {
    code: String,
    #[serde(rename = "type")]
    kind: String,
    content: String,
    position: Option<u32>,
    #[serde(default)]
    options: Vec<LegacyOption>,
    #[serde(default)]
    visible_rules: Vec<LegacyVisibleRule>,
    /// "and" (default) or "or" across controlling questions.
    logic: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyOption {
    code: String,
    content: String,
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LegacyVisibleRule {
    question_code: String,
    #[serde(default)]
    select_option_codes: Vec<LegacySelector>,
}

/// The ambiguous legacy encoding: a bare string is one OR alternative, a
/// nested array is an AND-group.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacySelector {
    Code(String),
    Group(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct LegacyFactor {
    code: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    source_codes: Vec<String>,
    formula: String,
    #[serde(default)]
    count_contents: Vec<String>,
    is_total: Option<bool>,
    required: Option<bool>,
    display: Option<bool>,
    interpretation: Option<Vec<LegacyBand>>,
}

#[derive(Debug, Deserialize)]
struct LegacyBand {
    start: f64,
    end: f64,
    content: String,
}

/// Parse a legacy questionnaire payload into a published ruleset.
///
/// The legacy payload carries no id or publish time; the adapter assigns
/// both at conversion.
pub fn parse_questionnaire(input: &str) -> Result<Ruleset, WireError> {
    let legacy: LegacyQuestionnaire = serde_json::from_str(input)?;

    let mut questions = Vec::with_capacity(legacy.questions.len());
    for (index, question) in legacy.questions.into_iter().enumerate() {
        questions.push(convert_question(question, index as u32)?);
    }

    let mut factors = Vec::with_capacity(legacy.factors.len());
    for factor in legacy.factors {
        factors.push(convert_factor(factor)?);
    }

    Ok(Ruleset {
        id: Uuid::new_v4(),
        title: legacy.title,
        version: legacy.version,
        published_at: jiff::Timestamp::now(),
        questions,
        factors,
    })
}

fn convert_question(question: LegacyQuestion, index: u32) -> Result<Question, WireError> {
    let kind = question.kind.parse().map_err(WireError::Core)?;

    let options = question
        .options
        .into_iter()
        .map(|o| QuestionOption {
            code: o.code,
            content: o.content,
            score: o.score,
        })
        .collect();

    let visibility = if question.visible_rules.is_empty() {
        None
    } else {
        let combinator = match question.logic.as_deref() {
            Some("or") => Combinator::Any,
            _ => Combinator::All,
        };
        let mut conditions = Vec::new();
        for rule in question.visible_rules {
            conditions.extend(convert_rule(&question.code, rule)?);
        }
        Some(VisibilityRule { combinator, conditions })
    };

    Ok(Question {
        code: question.code,
        kind,
        position: question.position.unwrap_or(index),
        content: question.content,
        options,
        visibility,
    })
}

/// Disambiguate one `select_option_codes` list: bare strings accumulate
/// into a single `any` condition, every nested array becomes its own `all`
/// condition. The historical format only ever carried one nested array per
/// controlling question, but more are accepted rather than rejected.
fn convert_rule(
    question_code: &str,
    rule: LegacyVisibleRule,
) -> Result<Vec<ControllingCondition>, WireError> {
    let mut or_codes = BTreeSet::new();
    let mut conditions = Vec::new();

    for selector in rule.select_option_codes {
        match selector {
            LegacySelector::Code(code) => {
                or_codes.insert(code);
            }
            LegacySelector::Group(codes) => conditions.push(ControllingCondition {
                question_code: rule.question_code.clone(),
                match_mode: MatchMode::All,
                option_codes: codes.into_iter().collect(),
            }),
        }
    }
    if !or_codes.is_empty() {
        conditions.push(ControllingCondition {
            question_code: rule.question_code.clone(),
            match_mode: MatchMode::Any,
            option_codes: or_codes,
        });
    }

    if conditions.is_empty() {
        return Err(WireError::EmptyRule {
            question_code: question_code.to_string(),
            controller_code: rule.question_code,
        });
    }
    Ok(conditions)
}

fn convert_factor(factor: LegacyFactor) -> Result<Factor, WireError> {
    let kind = match factor.kind.as_str() {
        "leaf" => FactorKind::Leaf,
        "composite" => FactorKind::Composite,
        other => return Err(WireError::UnknownFactorKind(other.to_string())),
    };
    let formula: Formula = factor.formula.parse().map_err(WireError::Core)?;

    let interpretation = factor.interpretation.map(|bands| InterpretationTable {
        bands: bands
            .into_iter()
            .map(|b| Band {
                start: b.start,
                end: b.end,
                text: b.content,
            })
            .collect(),
    });

    Ok(Factor {
        code: factor.code,
        title: factor.title,
        kind,
        source_codes: factor.source_codes,
        formula,
        target_contents: factor.count_contents.into_iter().collect(),
        is_total_score: factor.is_total.unwrap_or(false),
        required_non_empty: factor.required.unwrap_or(false),
        // The historical form builder showed every factor unless told not to.
        displayable: factor.display.unwrap_or(true),
        interpretation,
    })
}
