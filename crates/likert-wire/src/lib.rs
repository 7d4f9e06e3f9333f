//! likert-wire
//!
//! Adapter for the historical JSON payloads. The legacy questionnaire
//! format encodes AND/OR matching ambiguously by mixing bare strings and
//! nested arrays inside one `select_option_codes` list; this crate
//! disambiguates into the explicit `{match, option_codes}` form before the
//! engine ever sees it. The engine itself never parses legacy JSON.

pub mod answers;
pub mod error;
pub mod questionnaire;
