use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use likert_core::models::answer::AnswerSet;
use likert_core::models::ruleset::Ruleset;

use crate::error::EngineError;
use crate::{factor, interpret, visibility};

/// The complete outcome of scoring one answer set against one ruleset.
/// Keyed collections are ordered so identical inputs serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub visible_question_codes: BTreeSet<String>,
    pub factor_scores: BTreeMap<String, f64>,
    pub total_score: Option<f64>,
    /// Resolved text per displayable factor that matched a band.
    pub interpretations: BTreeMap<String, String>,
    /// The total-score factor's table resolved against `total_score`.
    pub total_interpretation: Option<String>,
}

/// Score one respondent's answers against a published ruleset.
///
/// Runs visibility, aggregates factors over the visible answers, exposes
/// the total-score factor if one is flagged, and resolves interpretations.
/// Every sub-step is pure, so identical inputs always produce the
/// identical result.
pub fn score(ruleset: &Ruleset, answers: &AnswerSet) -> Result<AssessmentResult, EngineError> {
    info!(
        ruleset_id = %ruleset.id,
        version = ruleset.version,
        answer_count = answers.len(),
        "scoring assessment"
    );

    let visible = visibility::evaluate(&ruleset.questions, answers)?;
    let visible_answers = answers.restricted_to(&visible);
    let factor_scores = factor::compute(&ruleset.factors, &ruleset.questions, &visible_answers)?;

    let total_factor = ruleset.total_factor();
    let total_score = total_factor.and_then(|f| factor_scores.get(&f.code).copied());

    let mut interpretations = BTreeMap::new();
    for factor in &ruleset.factors {
        if !factor.displayable {
            continue;
        }
        let Some(table) = &factor.interpretation else {
            continue;
        };
        let Some(score) = factor_scores.get(&factor.code) else {
            continue;
        };
        if let Some(text) = interpret::resolve(table, *score) {
            interpretations.insert(factor.code.clone(), text.to_string());
        }
    }

    let total_interpretation = total_factor
        .and_then(|f| f.interpretation.as_ref())
        .zip(total_score)
        .and_then(|(table, score)| interpret::resolve(table, score))
        .map(str::to_string);

    info!(
        ruleset_id = %ruleset.id,
        visible_count = visible.len(),
        factor_count = factor_scores.len(),
        "scoring complete"
    );

    Ok(AssessmentResult {
        visible_question_codes: visible,
        factor_scores,
        total_score,
        interpretations,
        total_interpretation,
    })
}
