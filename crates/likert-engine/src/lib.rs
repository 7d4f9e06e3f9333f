//! likert-engine
//!
//! Deterministic evaluation over a published ruleset: which questions a
//! respondent currently sees, how their answers aggregate into factor
//! scores, and which fixed-text interpretation each score falls into.
//! Synchronous and side-effect free — safe to call concurrently, one
//! invocation per ruleset + answer snapshot.

pub mod error;
pub mod factor;
pub mod interpret;
pub mod score;
pub mod validate;
pub mod visibility;
