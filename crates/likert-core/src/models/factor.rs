use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::interpretation::InterpretationTable;
use crate::error::CoreError;

/// Whether a factor draws from question answers or from other factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FactorKind {
    Leaf,
    Composite,
}

/// How a factor's item scores aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Formula {
    Sum,
    Avg,
    CountMatching,
}

impl FromStr for Formula {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Formula::Sum),
            "avg" => Ok(Formula::Avg),
            "count" => Ok(Formula::CountMatching),
            other => Err(CoreError::UnknownFormula(other.to_string())),
        }
    }
}

/// A scoring factor. `source_codes` are question codes for a leaf factor and
/// factor codes for a composite one; the composite graph must be acyclic.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Factor {
    pub code: String,
    pub title: String,
    pub kind: FactorKind,
    pub source_codes: Vec<String>,
    pub formula: Formula,
    /// Target answer contents for `count_matching`; empty otherwise.
    #[serde(default)]
    pub target_contents: BTreeSet<String>,
    /// At most one factor per ruleset carries this flag.
    #[serde(default)]
    pub is_total_score: bool,
    /// If set, resolving zero source items is an error instead of 0.
    #[serde(default)]
    pub required_non_empty: bool,
    #[serde(default)]
    pub displayable: bool,
    #[serde(default)]
    pub interpretation: Option<InterpretationTable>,
}
