use likert_core::models::interpretation::InterpretationTable;

/// The interpretive text of the first band (in authoring order) whose
/// inclusive range contains the score, or `None` when nothing matches.
/// Overlapping bands are an authoring concern; first match wins.
pub fn resolve(table: &InterpretationTable, score: f64) -> Option<&str> {
    table
        .bands
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.text.as_str())
}
