use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::factor::Factor;
use super::question::Question;

/// The versioned bundle of questions and factors for one questionnaire
/// version. Published as a unit and immutable afterwards; once answers have
/// been submitted against a version it must remain retrievable so scoring
/// stays reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ruleset {
    pub id: Uuid,
    pub title: String,
    pub version: u32,
    pub published_at: jiff::Timestamp,
    /// Ascending position order.
    pub questions: Vec<Question>,
    pub factors: Vec<Factor>,
}

impl Ruleset {
    pub fn question(&self, code: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.code == code)
    }

    pub fn factor(&self, code: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.code == code)
    }

    /// The factor flagged as the overall questionnaire score, if any.
    pub fn total_factor(&self) -> Option<&Factor> {
        self.factors.iter().find(|f| f.is_total_score)
    }
}
