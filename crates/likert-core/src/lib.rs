//! likert-core
//!
//! Pure domain types for authored questionnaires: questions, visibility
//! rules, scoring factors, interpretation bands, and the published ruleset
//! bundle. No I/O — this is the shared vocabulary of the Likert system.

pub mod error;
pub mod models;
