use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An inclusive [start, end] score range paired with interpretive text.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Band {
    pub fn contains(&self, score: f64) -> bool {
        self.start <= score && score <= self.end
    }
}

/// Bands in authoring order. They need not be sorted or non-overlapping;
/// the first matching band is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationTable {
    pub bands: Vec<Band>,
}
